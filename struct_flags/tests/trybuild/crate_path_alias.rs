use struct_flags::{FlagRecord, FlagsResult};

/// `#[flags(crate = "struct_flags")]` names the crate itself, so no
/// dependency rename is needed.
#[derive(Debug, Default, FlagRecord)]
#[flags(crate = "struct_flags")]
struct CratePathParams {
    #[flag("name|A name|world")]
    name: String,
    #[flag("count|How many|1")]
    count: u64,
}

fn main() {
    let mut params = CratePathParams::default();
    let result: FlagsResult<()> = struct_flags::try_parse_and_load_from(&mut params, ["-count=2"]);
    let _ = (result, params.name, params.count);
}
