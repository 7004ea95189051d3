//! Copies up to `-n` bytes of the file named by `-in` to standard output.
//!
//! `-in` is required; `-n` defaults to -1, meaning the whole file. `-h` lists
//! the flags.

use flag_demos::copy::{CopyParams, run};
use flag_demos::{DemoError, telemetry};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    telemetry::init();
    let mut params = CopyParams::default();
    struct_flags::parse_and_load(&mut params).map_err(DemoError::from)?;
    run(&params)?;
    Ok(())
}
