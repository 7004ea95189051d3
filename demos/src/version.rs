//! A reusable `-v` flag.

use std::io::{self, Write};

use struct_flags::{FlagRecord, HookError, PostParseHook};

/// Version printed by `-v`.
///
/// Set `FLAG_DEMOS_BUILD_VERSION` at compile time to override the package
/// version, for example with a release tag.
pub const BUILD_VERSION: &str = match option_env!("FLAG_DEMOS_BUILD_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Embed in a flag record to support `-v`.
///
/// When the flag is set, the hook prints [`BUILD_VERSION`] and exits with
/// status 0 before any required flag is checked.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, FlagRecord)]
pub struct VersionFlag {
    #[flag("v|prints out version (in semver aka v1.4.78 format)")]
    requested: bool,
}

impl VersionFlag {
    /// Whether `-v` was given.
    #[must_use]
    pub const fn requested(&self) -> bool {
        self.requested
    }

    /// Writes the version line to `out` if `-v` was given.
    ///
    /// # Errors
    ///
    /// Returns any error from writing to `out`.
    pub fn write_version(&self, out: &mut impl Write) -> io::Result<bool> {
        if !self.requested {
            return Ok(false);
        }
        writeln!(out, "{BUILD_VERSION}")?;
        Ok(true)
    }
}

impl PostParseHook for VersionFlag {
    fn post_parse(&mut self) -> Result<(), HookError> {
        if self.write_version(&mut io::stdout().lock())? {
            std::process::exit(0);
        }
        Ok(())
    }
}
