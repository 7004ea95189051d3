//! First walk over a record: build the registry, the required set and the
//! hook list.

use crate::descriptor::FlagDescriptor;
use crate::error::{FlagsError, FlagsResult};
use crate::record::{FieldVisitor, FlagField, FlagRecord, PostParseHook};
use crate::registry::{FlagRegistry, TypedFlag};
use crate::value::FieldSlot;

/// Names of the flags that must be non-zero once hooks have run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredSet(Vec<String>);

impl RequiredSet {
    /// Whether `name` is required.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    /// Required names in walk order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of required flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no flag is required.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Post-parse hooks in the order they will run.
///
/// A record's hook comes after the hooks of the records nested in it, so the
/// top-level record's hook is always last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookList(Vec<&'static str>);

impl HookList {
    /// Type names of the hook owners, in run order.
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().copied()
    }

    /// Number of hooks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the tree has no hooks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything learnt from the first walk.
#[derive(Debug, Clone, Default)]
pub struct FlagCollection {
    /// One typed flag per annotated field.
    pub registry: FlagRegistry,
    /// Required flag names.
    pub required: RequiredSet,
    /// Hook owners in run order.
    pub hooks: HookList,
}

/// Walks `record` and collects its flags.
///
/// # Errors
///
/// Stops at the first malformed annotation, reserved or duplicate name,
/// unsupported field type or undecodable default.
pub fn collect(record: &mut dyn FlagRecord) -> FlagsResult<FlagCollection> {
    let mut collector = Collector::default();
    record.visit_fields(&mut collector)?;
    Ok(collector.collection)
}

#[derive(Default)]
struct Collector {
    collection: FlagCollection,
}

impl FieldVisitor for Collector {
    fn visit_flag(&mut self, field: FlagField<'_>) -> FlagsResult<()> {
        let Some(descriptor) = FlagDescriptor::parse(field.annotation())? else {
            tracing::trace!(type_name = field.type_name(), "skipping field without flag metadata");
            return Ok(());
        };
        let type_name = field.type_name();
        let Some(kind) = FieldSlot::resolve(field.into_value()).map(|slot| slot.kind()) else {
            return Err(FlagsError::UnsupportedFieldType {
                name: descriptor.name,
                type_name,
            });
        };
        let default = kind
            .decode_default(&descriptor.default_text)
            .map_err(|source| FlagsError::DefaultValue {
                name: descriptor.name.clone(),
                source,
            })?;
        let name = descriptor.name.clone();
        let required = descriptor.required;
        self.collection.registry.register(TypedFlag {
            descriptor,
            kind,
            default,
        })?;
        if required {
            self.collection.required.0.push(name);
        }
        Ok(())
    }

    fn visit_record(&mut self, record: &mut dyn FlagRecord) -> FlagsResult<()> {
        record.visit_fields(self)
    }

    fn visit_extension(&mut self, hook: &mut dyn PostParseHook) -> FlagsResult<()> {
        self.collection.hooks.0.push(hook.hook_name());
        Ok(())
    }
}
