//! Pretends to connect to `-a`:`-p` as `-user`.

use std::io::{self, Write};

use flag_demos::connect::ConnectParams;
use flag_demos::{DemoError, telemetry};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    telemetry::init();
    let mut params = ConnectParams::default();
    struct_flags::parse_and_load(&mut params).map_err(DemoError::from)?;
    writeln!(io::stdout().lock(), "{}", params.describe()).map_err(DemoError::Output)?;
    Ok(())
}
