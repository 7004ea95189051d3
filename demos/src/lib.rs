//! Small programs showing how `struct_flags` records are declared and loaded.
//!
//! Each binary under `src/bin` pairs a flag record from this library with a
//! few lines of program logic:
//!
//! - `copy-bytes` copies up to `-n` bytes of the file named by `-in`;
//! - `whoami` validates a username in a post-parse hook;
//! - `connect` groups server and credential flags in nested records.
//!
//! Every binary also embeds [`VersionFlag`], so `-v` prints the build version.

pub mod connect;
pub mod copy;
pub mod error;
pub mod telemetry;
pub mod version;
pub mod whoami;

pub use error::{DemoError, Result};
pub use version::{BUILD_VERSION, VersionFlag};
