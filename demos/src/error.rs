//! Error types shared by the demo binaries.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures the demo programs report before exiting.
#[derive(Debug, Error)]
pub enum DemoError {
    /// Loading command-line flags failed.
    #[error("error while parsing the cli parameters: {0}")]
    Flags(#[from] struct_flags::FlagsError),
    /// The input file could not be opened.
    #[error("error while opening the input file on path {path}: {source}")]
    OpenInput {
        /// Path given with `-in`.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Writing to standard output failed.
    #[error("error writing to stdout: {0}")]
    Output(#[source] io::Error),
}

/// Convenience alias for demo results.
pub type Result<T> = std::result::Result<T, DemoError>;
