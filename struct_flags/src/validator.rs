//! Last walk: check that required fields hold non-zero values.

use crate::collector::RequiredSet;
use crate::descriptor::FlagDescriptor;
use crate::error::{FlagsError, FlagsResult};
use crate::record::{FieldVisitor, FlagField, FlagRecord, PostParseHook};
use crate::value::FieldSlot;

/// Reports every required flag whose field is still zero.
///
/// # Errors
///
/// [`FlagsError::MissingRequired`] for one offender,
/// [`FlagsError::MissingRequiredMany`] for several, named in field order.
pub(crate) fn validate(record: &mut dyn FlagRecord, required: &RequiredSet) -> FlagsResult<()> {
    if required.is_empty() {
        return Ok(());
    }
    let mut validator = Validator {
        required,
        missing: Vec::new(),
    };
    record.visit_fields(&mut validator)?;
    FlagsError::missing_required(validator.missing).map_or(Ok(()), Err)
}

struct Validator<'r> {
    required: &'r RequiredSet,
    missing: Vec<String>,
}

impl FieldVisitor for Validator<'_> {
    fn visit_flag(&mut self, field: FlagField<'_>) -> FlagsResult<()> {
        let Some(descriptor) = FlagDescriptor::parse(field.annotation())? else {
            return Ok(());
        };
        if !self.required.contains(&descriptor.name) {
            return Ok(());
        }
        if FieldSlot::resolve(field.into_value()).is_some_and(|slot| slot.is_zero()) {
            self.missing.push(descriptor.name);
        }
        Ok(())
    }

    fn visit_record(&mut self, record: &mut dyn FlagRecord) -> FlagsResult<()> {
        record.visit_fields(self)
    }

    fn visit_extension(&mut self, _hook: &mut dyn PostParseHook) -> FlagsResult<()> {
        Ok(())
    }
}
