//! Flags for `connect`, grouped in nested records.

use struct_flags::FlagRecord;

use crate::version::VersionFlag;

/// Credentials.
#[derive(Debug, Default, Clone, PartialEq, Eq, FlagRecord)]
pub struct UserAuth {
    /// Login name.
    #[flag("user|Username||required")]
    pub username: String,
    /// Password; never printed.
    #[flag("pass|Password")]
    pub password: String,
}

/// Server address.
#[derive(Debug, Default, Clone, PartialEq, Eq, FlagRecord)]
pub struct ServerInfo {
    /// Host name or address.
    #[flag("a|Server host address|127.0.0.1")]
    pub host: String,
    /// TCP port.
    #[flag("p|Server port|80")]
    pub port: isize,
}

/// Flags accepted by `connect`.
#[derive(Debug, Default, Clone, PartialEq, Eq, FlagRecord)]
pub struct ConnectParams {
    /// Credentials group.
    pub auth: UserAuth,
    /// Server group.
    pub server: ServerInfo,
    /// `-v` support.
    pub version: VersionFlag,
}

impl ConnectParams {
    /// The line printed by `connect`.
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "Connecting server at {}:{}, username {}, password: *** (not gonna print that!)",
            self.server.host, self.server.port, self.auth.username
        )
    }
}
