//! Second walk: write parsed values into their fields.

use crate::descriptor::FlagDescriptor;
use crate::error::{FlagsError, FlagsResult};
use crate::record::{FieldVisitor, FlagField, FlagRecord, PostParseHook};
use crate::registry::ParsedFlags;
use crate::value::FieldSlot;

/// Writes every parsed value into the field that declared it.
///
/// # Errors
///
/// [`FlagsError::RecordChanged`] when a hand-written record describes a flag
/// that was not collected, or a field of another type than at collection.
pub(crate) fn assign(record: &mut dyn FlagRecord, parsed: ParsedFlags) -> FlagsResult<()> {
    let mut assigner = Assigner { parsed };
    record.visit_fields(&mut assigner)
}

struct Assigner {
    parsed: ParsedFlags,
}

impl FieldVisitor for Assigner {
    fn visit_flag(&mut self, field: FlagField<'_>) -> FlagsResult<()> {
        let Some(descriptor) = FlagDescriptor::parse(field.annotation())? else {
            return Ok(());
        };
        let Some(value) = self.parsed.take(&descriptor.name) else {
            return Err(FlagsError::RecordChanged {
                reason: format!("flag {:?} was not collected", descriptor.name),
            });
        };
        let kind = value.kind();
        let type_name = field.type_name();
        let written = FieldSlot::resolve(field.into_value()).is_some_and(|slot| slot.assign(value));
        if !written {
            return Err(FlagsError::RecordChanged {
                reason: format!(
                    "flag {:?} was collected as {kind} but now holds `{type_name}`",
                    descriptor.name
                ),
            });
        }
        tracing::trace!(name = %descriptor.name, %kind, "assigned flag value");
        Ok(())
    }

    fn visit_record(&mut self, record: &mut dyn FlagRecord) -> FlagsResult<()> {
        record.visit_fields(self)
    }

    fn visit_extension(&mut self, _hook: &mut dyn PostParseHook) -> FlagsResult<()> {
        Ok(())
    }
}
