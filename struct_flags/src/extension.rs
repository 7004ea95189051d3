//! Third walk: run post-parse hooks.

use crate::collector::HookList;
use crate::error::{FlagsError, FlagsResult};
use crate::record::{FieldVisitor, FlagField, FlagRecord, PostParseHook};

/// Runs every hook in `hooks` order, stopping at the first failure.
///
/// The walk must meet the hooks in exactly the order the collector listed
/// them.
///
/// # Errors
///
/// - [`FlagsError::Extension`] wrapping the failing hook's error.
/// - [`FlagsError::RecordChanged`] when the walk meets a hook out of order,
///   an unlisted hook, or misses a listed one.
pub(crate) fn run_hooks(record: &mut dyn FlagRecord, hooks: &HookList) -> FlagsResult<()> {
    let mut runner = HookRunner {
        planned: hooks.iter(),
        ran: 0,
    };
    record.visit_fields(&mut runner)?;
    if let Some(missed) = runner.planned.next() {
        return Err(FlagsError::RecordChanged {
            reason: format!("hook {missed} was collected but not visited"),
        });
    }
    tracing::debug!(ran = runner.ran, "post-parse hooks finished");
    Ok(())
}

struct HookRunner<I> {
    planned: I,
    ran: usize,
}

impl<I> FieldVisitor for HookRunner<I>
where
    I: Iterator<Item = &'static str>,
{
    fn visit_flag(&mut self, _field: FlagField<'_>) -> FlagsResult<()> {
        Ok(())
    }

    fn visit_record(&mut self, record: &mut dyn FlagRecord) -> FlagsResult<()> {
        record.visit_fields(self)
    }

    fn visit_extension(&mut self, hook: &mut dyn PostParseHook) -> FlagsResult<()> {
        let name = hook.hook_name();
        match self.planned.next() {
            Some(expected) if expected == name => {}
            expected => {
                return Err(FlagsError::RecordChanged {
                    reason: format!("hook {name} visited where {expected:?} was collected"),
                });
            }
        }
        tracing::debug!(hook = name, "running post-parse hook");
        hook.post_parse()
            .map_err(|source| FlagsError::Extension { hook: name, source })?;
        self.ran += 1;
        Ok(())
    }
}
