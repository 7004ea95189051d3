//! Post-parse hooks, metadata errors and loader configuration.

use std::cell::{Cell, RefCell};
use std::error::Error as _;
use std::time::Duration;

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use struct_flags::{
    FlagLoader, FlagRecord, FlagsError, HookError, PostParseHook, collect,
    try_parse_and_load_from,
};

thread_local! {
    static HOOK_CALLS: Cell<usize> = const { Cell::new(0) };
    static HOOK_LOG: RefCell<Vec<&'static str>> = const { RefCell::new(Vec::new()) };
}

fn log_hook(name: &'static str) {
    HOOK_LOG.with(|log| log.borrow_mut().push(name));
}

#[derive(Debug, Default, PartialEq, FlagRecord)]
struct FailingParams {
    #[flag("name|Some name|bob")]
    name: String,
}

impl PostParseHook for FailingParams {
    fn post_parse(&mut self) -> Result<(), HookError> {
        Err("failing params".into())
    }
}

#[rstest]
fn failing_hook_aborts_and_resets() -> Result<()> {
    let mut params = FailingParams {
        name: "kept?".to_owned(),
    };
    let err = try_parse_and_load_from(&mut params, std::iter::empty::<&str>())
        .err()
        .ok_or_else(|| anyhow!("hook failure should propagate"))?;
    ensure!(
        err.to_string() == "running flag extensions failed: failing params",
        "unexpected error: {err}"
    );
    let source = err.source().map(ToString::to_string);
    ensure!(source.as_deref() == Some("failing params"));
    ensure!(params == FailingParams::default(), "record not reset: {params:?}");
    Ok(())
}

#[derive(Debug, Default, FlagRecord)]
struct Rejecting {
    #[flag("mode|Mode|fast")]
    mode: String,
}

impl PostParseHook for Rejecting {
    fn post_parse(&mut self) -> Result<(), HookError> {
        log_hook("rejecting");
        Err(format!("mode {:?} is not allowed", self.mode).into())
    }
}

#[derive(Debug, Default, FlagRecord)]
struct Sibling {
    #[flag("level|Level|3")]
    level: u64,
}

impl PostParseHook for Sibling {
    fn post_parse(&mut self) -> Result<(), HookError> {
        log_hook("sibling");
        Ok(())
    }
}

#[derive(Debug, Default, FlagRecord)]
struct Outer {
    rejecting: Rejecting,
    sibling: Sibling,
    #[flag("name|Name")]
    name: String,
}

impl PostParseHook for Outer {
    fn post_parse(&mut self) -> Result<(), HookError> {
        log_hook("outer");
        Ok(())
    }
}

#[rstest]
fn nested_hook_failure_stops_later_hooks_and_resets() -> Result<()> {
    HOOK_LOG.with(|log| log.borrow_mut().clear());
    let mut outer = Outer::default();
    let err = try_parse_and_load_from(&mut outer, ["-name=n", "-level=7"])
        .err()
        .ok_or_else(|| anyhow!("nested hook failure should propagate"))?;
    ensure!(
        matches!(err, FlagsError::Extension { hook, .. } if hook.ends_with("Rejecting")),
        "unexpected error: {err:?}"
    );
    let ran = HOOK_LOG.with(|log| log.borrow().clone());
    ensure!(ran == ["rejecting"], "later hooks ran: {ran:?}");
    ensure!(outer.name.is_empty() && outer.sibling.level == 0, "record not reset: {outer:?}");
    ensure!(outer.rejecting.mode.is_empty(), "record not reset: {outer:?}");
    Ok(())
}

#[derive(Debug, Default, FlagRecord)]
struct Login {
    #[flag("u|Username||required")]
    username: String,
    #[flag("t|Token for the session||required")]
    token: String,
}

impl PostParseHook for Login {
    fn post_parse(&mut self) -> Result<(), HookError> {
        HOOK_CALLS.with(|calls| calls.set(calls.get() + 1));
        if self.token.is_empty() {
            self.token = format!("token-for-{}", self.username);
        }
        Ok(())
    }
}

#[rstest]
fn hook_can_satisfy_required_flag() -> Result<()> {
    let mut login = Login::default();
    try_parse_and_load_from(&mut login, ["-u", "alice"]).map_err(|err| anyhow!(err))?;
    ensure!(login.token == "token-for-alice", "got {login:?}");
    Ok(())
}

#[rstest]
fn hooks_do_not_run_when_parsing_fails() -> Result<()> {
    HOOK_CALLS.with(|calls| calls.set(0));
    let mut login = Login::default();
    let outcome = try_parse_and_load_from(&mut login, ["-u", "alice", "extra"]);
    ensure!(outcome.is_err());
    ensure!(HOOK_CALLS.with(Cell::get) == 0, "hook ran after a parse failure");
    Ok(())
}

#[derive(Debug, Default, FlagRecord)]
struct Reserved {
    #[flag("h|Shadows help")]
    host: String,
}

#[derive(Debug, Default, FlagRecord)]
struct BadMarker {
    #[flag("x|Usage||mandatory")]
    x: String,
}

#[derive(Debug, Default, FlagRecord)]
struct BadName {
    #[flag("-x|Usage")]
    x: String,
}

#[derive(Debug, Default, FlagRecord)]
struct Unsupported {
    #[flag("list|Not a primitive")]
    list: Vec<String>,
}

#[derive(Debug, Default, FlagRecord)]
struct BadDefault {
    #[flag("n|Count|lots")]
    n: u64,
}

#[derive(Debug, Default, FlagRecord)]
struct Half {
    #[flag("port|Port|80")]
    port: u64,
}

#[derive(Debug, Default, FlagRecord)]
struct Duplicated {
    first: Half,
    second: Half,
}

fn load_err<T: FlagRecord + Default>(record: &mut T) -> Result<FlagsError> {
    try_parse_and_load_from(record, std::iter::empty::<&str>())
        .err()
        .ok_or_else(|| anyhow!("loading should fail"))
}

#[rstest]
#[case::no_tokens(&[])]
#[case::help_token(&["-h"])]
#[case::long_help_token(&["-help"])]
fn reserved_names_are_rejected_before_parsing(#[case] args: &[&str]) -> Result<()> {
    let mut record = Reserved::default();
    let err = try_parse_and_load_from(&mut record, args.iter().copied())
        .err()
        .ok_or_else(|| anyhow!("reserved name should fail"))?;
    ensure!(
        matches!(err, FlagsError::ReservedName { ref name } if name == "h"),
        "expected ReservedName, got {err:?}"
    );
    Ok(())
}

#[rstest]
fn unknown_marker_is_malformed_metadata() -> Result<()> {
    let err = load_err(&mut BadMarker::default())?;
    ensure!(
        matches!(err, FlagsError::MalformedMetadata { ref value, .. } if value == "mandatory"),
        "{err:?}"
    );
    Ok(())
}

#[rstest]
fn hyphenated_name_is_invalid() -> Result<()> {
    let err = load_err(&mut BadName::default())?;
    ensure!(matches!(err, FlagsError::InvalidName { ref name, .. } if name == "-x"), "{err:?}");
    Ok(())
}

#[rstest]
fn unsupported_field_type_is_named() -> Result<()> {
    let err = load_err(&mut Unsupported::default())?;
    ensure!(
        matches!(err, FlagsError::UnsupportedFieldType { ref name, type_name } if name == "list" && type_name.contains("Vec")),
        "{err:?}"
    );
    Ok(())
}

#[rstest]
fn undecodable_default_is_reported() -> Result<()> {
    let err = load_err(&mut BadDefault::default())?;
    ensure!(matches!(err, FlagsError::DefaultValue { ref name, .. } if name == "n"), "{err:?}");
    Ok(())
}

#[rstest]
fn duplicate_names_across_records_are_rejected() -> Result<()> {
    let err = load_err(&mut Duplicated::default())?;
    ensure!(matches!(err, FlagsError::DuplicateFlag { ref name } if name == "port"), "{err:?}");
    Ok(())
}

#[derive(Debug, Default, FlagRecord)]
struct Connect {
    #[flag("addr|Address to dial|localhost:80")]
    addr: String,
    #[flag("timeout|Dial timeout|1.5s")]
    timeout: Duration,
    #[flag("user|User name||required")]
    user: String,
}

#[rstest]
fn collect_reports_registry_required_and_hooks() -> Result<()> {
    let collection = collect(&mut Login::default()).map_err(|err| anyhow!(err))?;
    ensure!(collection.registry.len() == 2);
    ensure!(collection.required.iter().collect::<Vec<_>>() == ["u", "t"]);
    ensure!(collection.hooks.len() == 1);

    let collection = collect(&mut Connect::default()).map_err(|err| anyhow!(err))?;
    ensure!(collection.hooks.is_empty());
    ensure!(collection.required.contains("user"));
    Ok(())
}

#[rstest]
fn loader_renders_usage_with_settings() -> Result<()> {
    let loader = FlagLoader::new()
        .bin_name("connect")
        .about("Dials a remote address.");
    let mut command = loader
        .command_for(&mut Connect::default())
        .map_err(|err| anyhow!(err))?;
    let usage = command.render_help().to_string();
    ensure!(usage.contains("Dials a remote address."), "{usage}");
    ensure!(usage.contains("--timeout <duration>"), "{usage}");
    ensure!(usage.contains("[default: 1.5s]"), "{usage}");
    ensure!(usage.contains("User name (required)"), "{usage}");
    Ok(())
}

#[rstest]
fn loader_applies_defaults() -> Result<()> {
    let mut connect = Connect::default();
    FlagLoader::new()
        .bin_name("connect")
        .try_load_from(&mut connect, ["-user=root"])
        .map_err(|err| anyhow!(err))?;
    ensure!(connect.addr == "localhost:80");
    ensure!(connect.timeout == Duration::from_millis(1500));
    Ok(())
}
