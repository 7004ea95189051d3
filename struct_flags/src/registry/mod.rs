//! Flag registry backed by clap's builder API.
//!
//! The registry owns one [`TypedFlag`] per annotated field, turns them into a
//! [`clap::Command`], and parses a token list into a name-to-value map.

mod normalise;

use std::collections::HashMap;
use std::ffi::OsString;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::descriptor::FlagDescriptor;
use crate::error::{FlagsError, FlagsResult};
use crate::value::{FlagKind, FlagValue};

/// A flag descriptor bound to the primitive kind of its field.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedFlag {
    /// Parsed annotation.
    pub descriptor: FlagDescriptor,
    /// Kind of the annotated field.
    pub kind: FlagKind,
    /// Decoded default, or the kind's zero value.
    pub default: FlagValue,
}

impl TypedFlag {
    /// Name of the flag.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    fn takes_value(&self) -> bool {
        self.kind != FlagKind::Bool
    }

    fn to_arg(&self) -> Arg {
        let kind = self.kind;
        let name = self.descriptor.name.clone();
        let mut arg = Arg::new(name.clone())
            .long(name)
            .help(self.help_text())
            .value_name(kind.label())
            .action(ArgAction::Set)
            .value_parser(move |text: &str| kind.decode(text));
        arg = if self.takes_value() {
            arg.num_args(1).allow_hyphen_values(true)
        } else {
            arg.num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
        };
        if !self.descriptor.default_text.is_empty() {
            arg = arg.default_value(self.descriptor.default_text.clone());
        }
        arg
    }

    fn help_text(&self) -> String {
        if self.descriptor.required {
            format!("{} (required)", self.descriptor.usage)
                .trim_start()
                .to_owned()
        } else {
            self.descriptor.usage.clone()
        }
    }
}

/// Settings shaping the generated command and its usage text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSettings {
    /// Program name shown in usage text.
    pub bin_name: String,
    /// Paragraph shown above the flag list.
    pub about: Option<String>,
}

/// Values produced by a successful parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFlags {
    values: HashMap<String, FlagValue>,
    supplied: Vec<String>,
}

impl ParsedFlags {
    /// Value for `name`: the parsed value when supplied, else its default.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FlagValue> {
        self.values.get(name)
    }

    /// Removes and returns the value for `name`.
    pub fn take(&mut self, name: &str) -> Option<FlagValue> {
        self.values.remove(name)
    }

    /// Names given explicitly on the command line, in registration order.
    #[must_use]
    pub fn supplied(&self) -> &[String] {
        &self.supplied
    }
}

/// Registered flags for one load.
#[derive(Debug, Clone, Default)]
pub struct FlagRegistry {
    flags: Vec<TypedFlag>,
    index: HashMap<String, usize>,
}

impl FlagRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a flag.
    ///
    /// # Errors
    ///
    /// Returns [`FlagsError::DuplicateFlag`] when the name is already taken.
    pub fn register(&mut self, flag: TypedFlag) -> FlagsResult<()> {
        if self.index.contains_key(flag.name()) {
            return Err(FlagsError::DuplicateFlag {
                name: flag.descriptor.name,
            });
        }
        tracing::trace!(
            name = flag.name(),
            kind = %flag.kind,
            required = flag.descriptor.required,
            "registered flag"
        );
        self.index.insert(flag.descriptor.name.clone(), self.flags.len());
        self.flags.push(flag);
        Ok(())
    }

    /// Looks up a registered flag.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypedFlag> {
        self.index.get(name).and_then(|&i| self.flags.get(i))
    }

    /// Registered flags in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TypedFlag> {
        self.flags.iter()
    }

    /// Number of registered flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether no flags are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Builds the clap command describing every registered flag.
    #[must_use]
    pub fn command(&self, settings: &CommandSettings) -> Command {
        let mut command = Command::new(settings.bin_name.clone())
            .no_binary_name(true)
            .args_override_self(true)
            .disable_version_flag(true);
        if let Some(about) = &settings.about {
            command = command.about(about.clone());
        }
        self.flags
            .iter()
            .fold(command, |command, flag| command.arg(flag.to_arg()))
    }

    /// Parses `tokens` (program name excluded) against the registered flags.
    ///
    /// # Errors
    ///
    /// - [`FlagsError::HelpRequested`] for `-h`, `-help`, `--h` or `--help`.
    /// - [`FlagsError::UnrecognizedArgument`] for an unknown flag, a stray
    ///   positional token or a bare `--`.
    /// - [`FlagsError::CliParsing`] for any other parser failure, such as a
    ///   value that does not decode.
    pub fn parse<I, T>(&self, settings: &CommandSettings, tokens: I) -> FlagsResult<ParsedFlags>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let normalised =
            normalise::normalise(tokens, |name| self.get(name).map(TypedFlag::takes_value));
        let matches = self
            .command(settings)
            .try_get_matches_from(normalised.tokens.iter().cloned())
            .map_err(|err| classify(err, &normalised))?;
        if normalised.terminated {
            return Err(FlagsError::UnrecognizedArgument {
                argument: "--".to_owned(),
            });
        }
        Ok(self.collect(&matches))
    }

    fn collect(&self, matches: &ArgMatches) -> ParsedFlags {
        let mut parsed = ParsedFlags::default();
        for flag in &self.flags {
            let name = flag.name();
            let value = matches
                .try_get_one::<FlagValue>(name)
                .ok()
                .flatten()
                .cloned()
                .unwrap_or_else(|| flag.default.clone());
            if matches.value_source(name) == Some(ValueSource::CommandLine) {
                parsed.supplied.push(name.to_owned());
            }
            parsed.values.insert(name.to_owned(), value);
        }
        parsed
    }
}

fn classify(err: clap::Error, normalised: &normalise::Normalised) -> FlagsError {
    match err.kind() {
        ErrorKind::DisplayHelp => FlagsError::HelpRequested(Box::new(err)),
        ErrorKind::UnknownArgument => match err.get(ContextKind::InvalidArg) {
            Some(ContextValue::String(reported)) => FlagsError::UnrecognizedArgument {
                argument: normalised.original(reported).to_owned(),
            },
            _ => FlagsError::from(err),
        },
        _ => FlagsError::from(err),
    }
}
