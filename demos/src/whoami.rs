//! Flags and logic for `whoami`.
//!
//! The hook validates the username and derives `is_admin`, a field with no
//! flag of its own.

use struct_flags::{FlagRecord, HookError, PostParseHook};

use crate::version::VersionFlag;

/// Username that receives admin privileges.
pub const ADMIN_USERNAME: &str = "admin";

/// Flags accepted by `whoami`.
#[derive(Debug, Default, Clone, PartialEq, Eq, FlagRecord)]
pub struct UserParams {
    /// Name of the current user.
    #[flag("u|Username||required")]
    pub username: String,
    /// Set by the post-parse hook.
    is_admin: bool,
    /// `-v` support.
    pub version: VersionFlag,
}

impl UserParams {
    /// Whether the user runs with admin privileges.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// The line printed by `whoami`.
    #[must_use]
    pub fn describe(&self) -> String {
        let privileges = if self.is_admin {
            "with admin privileges"
        } else {
            "without admin privileges"
        };
        format!("Running the program as a user {:?} {privileges}", self.username)
    }
}

impl PostParseHook for UserParams {
    fn post_parse(&mut self) -> Result<(), HookError> {
        if self.username.contains(char::is_whitespace) {
            return Err("username cannot contain whitespace".into());
        }
        self.is_admin = self.username == ADMIN_USERNAME;
        Ok(())
    }
}
