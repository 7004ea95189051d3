//! Trybuild fixture verifying `#[flags(crate = "...")]` works with a
//! rename via `use ... as`.

use struct_flags as cli_flags;
use cli_flags::{FlagRecord, HookError, PostParseHook};

/// Generated code must reach every item through `cli_flags`.
#[derive(Debug, Default, FlagRecord)]
#[flags(crate = "cli_flags")]
struct AliasedParams {
    #[flag("verbose|Chatty output")]
    verbose: bool,
    inner: Inner,
}

#[derive(Debug, Default, FlagRecord)]
#[flags(crate = "cli_flags")]
struct Inner {
    #[flag("level|Log level|info")]
    level: String,
}

impl PostParseHook for AliasedParams {
    fn post_parse(&mut self) -> Result<(), HookError> {
        if self.verbose {
            self.inner.level = "debug".to_owned();
        }
        Ok(())
    }
}

fn main() {
    let mut params = AliasedParams::default();
    let result: cli_flags::FlagsResult<()> =
        cli_flags::try_parse_and_load_from(&mut params, ["-verbose"]);
    let _ = (result, params.inner.level);
}
