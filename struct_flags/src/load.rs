//! The loading pipeline and its configuration.
//!
//! A load moves through [`Stage`]s in order: collect metadata, parse tokens,
//! run hooks, validate required flags. Any failure resets the target to its
//! default value before the error is returned, so callers never observe a
//! partly loaded record.

use std::ffi::OsString;
use std::path::Path;

use clap::Command;

use crate::assign::assign;
use crate::collector::collect;
use crate::error::{FlagsError, FlagsResult, is_display_request};
use crate::extension::run_hooks;
use crate::record::FlagRecord;
use crate::registry::CommandSettings;
use crate::validator::validate;

/// Program name used when the executable name cannot be determined.
const FALLBACK_BIN_NAME: &str = "app";

/// Furthest point a load reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Nothing has run yet.
    Init,
    /// Flags, required names and hooks were collected.
    MetadataCollected,
    /// Tokens were parsed and written into the record.
    TokensParsed,
    /// Post-parse hooks ran.
    Extended,
    /// Required flags were checked.
    Validated,
    /// The load succeeded.
    Done,
    /// A stage failed and the target was reset.
    Failed,
}

/// Loads command-line flags into [`FlagRecord`] values.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use struct_flags::{FlagLoader, FlagRecord};
///
/// #[derive(Debug, Default, FlagRecord)]
/// struct Params {
///     #[flag("str|Testing string||required")]
///     text: String,
///     #[flag("num|Testing number|123|")]
///     number: isize,
///     #[flag("dur|Timeout|10m")]
///     timeout: Duration,
/// }
///
/// let loader = FlagLoader::new().bin_name("demo");
/// let mut params = Params::default();
/// loader.try_load_from(&mut params, ["-str=x"]).expect("flags load");
/// assert_eq!(params.text, "x");
/// assert_eq!(params.number, 123);
/// assert_eq!(params.timeout, Duration::from_secs(600));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagLoader {
    bin_name: Option<String>,
    about: Option<String>,
}

impl FlagLoader {
    /// Creates a loader with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the program name shown in usage text.
    #[must_use]
    pub fn bin_name(mut self, name: impl Into<String>) -> Self {
        self.bin_name = Some(name.into());
        self
    }

    /// Sets a paragraph shown above the flag list in usage text.
    #[must_use]
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Loads flags from the process arguments.
    ///
    /// On `-h` or `-help` the generated usage text is printed and the process
    /// exits with status 0.
    ///
    /// # Errors
    ///
    /// Returns any [`FlagsError`] other than a help request; `target` is reset
    /// to its default value first.
    pub fn load<T>(&self, target: &mut T) -> FlagsResult<()>
    where
        T: FlagRecord + Default,
    {
        match self.try_load_from(target, std::env::args_os().skip(1)) {
            Err(FlagsError::HelpRequested(help)) if is_display_request(&help) => help.exit(),
            outcome => outcome,
        }
    }

    /// Loads flags from `args`, which must not include the program name.
    ///
    /// # Errors
    ///
    /// Returns the first failure of any stage, including
    /// [`FlagsError::HelpRequested`]. `target` is reset to its default value
    /// before the error is returned.
    pub fn try_load_from<T, I, S>(&self, target: &mut T, args: I) -> FlagsResult<()>
    where
        T: FlagRecord + Default,
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut stage = Stage::Init;
        let outcome = self.run(target, args, &mut stage);
        match &outcome {
            Ok(()) => advance(&mut stage, Stage::Done),
            Err(err) => {
                tracing::debug!(stage = ?stage, error = %err, "flag loading failed; resetting target");
                *target = T::default();
                advance(&mut stage, Stage::Failed);
            }
        }
        outcome
    }

    /// Builds the clap command for `target` without parsing anything, for
    /// example to render usage text.
    ///
    /// # Errors
    ///
    /// Returns metadata errors found while collecting flags.
    pub fn command_for<T>(&self, target: &mut T) -> FlagsResult<Command>
    where
        T: FlagRecord,
    {
        let collection = collect(target)?;
        Ok(collection.registry.command(&self.settings()))
    }

    fn run<T, I, S>(&self, target: &mut T, args: I, stage: &mut Stage) -> FlagsResult<()>
    where
        T: FlagRecord,
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let collection = collect(target)?;
        advance(stage, Stage::MetadataCollected);

        let parsed = collection.registry.parse(&self.settings(), args)?;
        tracing::debug!(supplied = ?parsed.supplied(), "parsed command-line flags");
        assign(target, parsed)?;
        advance(stage, Stage::TokensParsed);

        run_hooks(target, &collection.hooks)?;
        advance(stage, Stage::Extended);

        validate(target, &collection.required)?;
        advance(stage, Stage::Validated);
        Ok(())
    }

    fn settings(&self) -> CommandSettings {
        CommandSettings {
            bin_name: self.bin_name.clone().unwrap_or_else(current_bin_name),
            about: self.about.clone(),
        }
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    tracing::trace!(from = ?*stage, to = ?next, "flag loading stage");
    *stage = next;
}

fn current_bin_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .map_or_else(
            || FALLBACK_BIN_NAME.to_owned(),
            |name| name.to_string_lossy().into_owned(),
        )
}

/// Loads flags from the process arguments with a default [`FlagLoader`].
///
/// Prints usage and exits with status 0 on `-h` or `-help`.
///
/// # Errors
///
/// See [`FlagLoader::load`].
pub fn parse_and_load<T>(target: &mut T) -> FlagsResult<()>
where
    T: FlagRecord + Default,
{
    FlagLoader::new().load(target)
}

/// Loads flags from `args` (program name excluded) with a default
/// [`FlagLoader`].
///
/// # Errors
///
/// See [`FlagLoader::try_load_from`].
pub fn try_parse_and_load_from<T, I, S>(target: &mut T, args: I) -> FlagsResult<()>
where
    T: FlagRecord + Default,
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    FlagLoader::new().try_load_from(target, args)
}
