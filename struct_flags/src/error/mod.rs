//! Error types produced while loading flags into a record.

mod helpers;
mod types;

pub use helpers::{is_display_request, is_help_request};
pub use types::{FlagsError, FlagsResult, HookError};
