//! Primary error enum for flag loading flows.

use thiserror::Error;

use crate::value::ValueError;

/// Boxed error returned by a [`crate::PostParseHook`].
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias used throughout the crate.
pub type FlagsResult<T> = Result<T, FlagsError>;

/// Errors that can occur while loading flags into a record.
///
/// Every variant is terminal for the current load: the target record is reset
/// to its default value before the error reaches the caller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlagsError {
    /// The fourth metadata segment held something other than `required`.
    #[error("unsupported value {value:?} in the fourth segment of flag metadata {annotation:?}")]
    MalformedMetadata {
        /// Raw annotation that failed to parse.
        annotation: String,
        /// Offending fourth segment.
        value: String,
    },

    /// The flag name was empty or contained characters a flag cannot carry.
    #[error("invalid flag name {name:?} in flag metadata {annotation:?}")]
    InvalidName {
        /// Raw annotation that failed to parse.
        annotation: String,
        /// Trimmed name segment.
        name: String,
    },

    /// An annotated field claimed `h` or `help`.
    #[error("flag name {name:?} is reserved for help output")]
    ReservedName {
        /// Reserved name found in the annotation.
        name: String,
    },

    /// An annotated field's type is outside the supported primitive set.
    #[error("unsupported flag type `{type_name}` for flag {name:?}")]
    UnsupportedFieldType {
        /// Flag name from the annotation.
        name: String,
        /// Rust type of the annotated field.
        type_name: &'static str,
    },

    /// The default value text could not be decoded as the field's type.
    #[error("invalid default value for flag {name:?}: {source}")]
    DefaultValue {
        /// Flag whose default failed to decode.
        name: String,
        /// Decoder failure.
        #[source]
        source: ValueError,
    },

    /// Two fields in the record tree claimed the same flag name.
    #[error("flag {name:?} is defined more than once")]
    DuplicateFlag {
        /// Name registered twice.
        name: String,
    },

    /// A token did not match any registered flag.
    #[error("unexpected cli argument {argument:?}")]
    UnrecognizedArgument {
        /// Token as reported by the parser.
        argument: String,
    },

    /// Any other failure reported by the command-line parser.
    #[error("failed to parse command-line arguments: {0}")]
    CliParsing(Box<clap::Error>),

    /// `-h`, `-help`, `--h` or `--help` was supplied.
    ///
    /// The wrapped [`clap::Error`] renders the generated usage text; calling
    /// [`clap::Error::exit`] prints it and terminates with status 0.
    #[error("help requested")]
    HelpRequested(Box<clap::Error>),

    /// One required flag remained at its zero value.
    #[error("missing required flag {0:?}")]
    MissingRequired(String),

    /// Several required flags remained at their zero values.
    #[error("missing required flags {0:?}")]
    MissingRequiredMany(Vec<String>),

    /// A hand-written [`crate::FlagRecord`] described different fields or
    /// hooks to a later loading stage than to the collector.
    #[error("record fields changed between loading stages: {reason}")]
    RecordChanged {
        /// What differed.
        reason: String,
    },

    /// A post-parse hook failed; later hooks were not run.
    #[error("running flag extensions failed: {source}")]
    Extension {
        /// Type name of the record whose hook failed.
        hook: &'static str,
        /// Error returned by the hook.
        #[source]
        source: HookError,
    },
}

impl FlagsError {
    /// Builds the missing-flag error for `names`, choosing singular or plural
    /// phrasing. Returns `None` when nothing is missing.
    #[must_use]
    pub fn missing_required(mut names: Vec<String>) -> Option<Self> {
        match names.len() {
            0 => None,
            1 => names.pop().map(Self::MissingRequired),
            _ => Some(Self::MissingRequiredMany(names)),
        }
    }

    /// Names of the required flags reported missing, if any.
    #[must_use]
    pub fn missing_names(&self) -> Vec<&str> {
        match self {
            Self::MissingRequired(name) => vec![name.as_str()],
            Self::MissingRequiredMany(names) => names.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<clap::Error> for FlagsError {
    fn from(err: clap::Error) -> Self {
        Self::CliParsing(Box::new(err))
    }
}
