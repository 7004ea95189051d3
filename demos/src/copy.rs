//! Flags and logic for `copy-bytes`.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use struct_flags::FlagRecord;

use crate::error::{DemoError, Result};
use crate::version::VersionFlag;

/// Value of `-n` meaning "copy everything".
pub const COPY_ALL: i64 = -1;

/// Flags accepted by `copy-bytes`.
#[derive(Debug, Default, Clone, PartialEq, Eq, FlagRecord)]
pub struct CopyParams {
    /// Path of the file to read.
    #[flag("in|Path to the input file||required")]
    pub input_path: String,
    /// Maximum number of bytes to copy, or [`COPY_ALL`].
    #[flag("n|Maximum number of characters to read (-1 for all)|-1")]
    pub output_len: i64,
    /// `-v` support.
    pub version: VersionFlag,
}

impl CopyParams {
    /// The requested byte limit, or `None` to copy everything.
    ///
    /// Any negative `-n` is treated like [`COPY_ALL`].
    #[must_use]
    pub fn limit(&self) -> Option<u64> {
        u64::try_from(self.output_len).ok()
    }
}

/// Copies at most `limit` bytes from `reader` to `writer`.
///
/// # Errors
///
/// Returns [`DemoError::Output`] when reading or writing fails.
pub fn copy_prefix(
    mut reader: impl Read,
    writer: &mut impl Write,
    limit: Option<u64>,
) -> Result<u64> {
    let copied = match limit {
        Some(max) => io::copy(&mut reader.take(max), writer),
        None => io::copy(&mut reader, writer),
    };
    copied.map_err(DemoError::Output)
}

/// Opens the input file and copies the requested prefix to standard output.
///
/// # Errors
///
/// Returns [`DemoError::OpenInput`] when the file cannot be opened and
/// [`DemoError::Output`] when copying fails.
pub fn run(params: &CopyParams) -> Result<u64> {
    let path = Path::new(&params.input_path);
    let file = File::open(path).map_err(|source| DemoError::OpenInput {
        path: PathBuf::from(path),
        source,
    })?;
    tracing::debug!(path = %path.display(), limit = ?params.limit(), "copying input");
    copy_prefix(file, &mut io::stdout().lock(), params.limit())
}
