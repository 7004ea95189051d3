//! Helpers for classifying loader errors.

use clap::{Error as ClapError, error::ErrorKind};

use super::FlagsError;

/// Whether a parser error asks for usage or version text rather than
/// reporting a failure.
///
/// [`crate::FlagLoader::load`] exits through [`clap::Error::exit`] only for
/// these, so the process ends with status 0.
#[must_use]
pub fn is_display_request(err: &ClapError) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}

/// Returns `true` when loading stopped because the user asked for usage text.
///
/// Callers using [`crate::try_parse_and_load_from`] check this to decide
/// whether to print help and exit successfully instead of reporting a failure.
#[must_use]
pub const fn is_help_request(err: &FlagsError) -> bool {
    matches!(err, FlagsError::HelpRequested(_))
}
