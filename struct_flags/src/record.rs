//! The schema seam between annotated structs and the loader.
//!
//! [`FlagRecord`] describes a struct's fields to a [`FieldVisitor`]. The
//! derive macro writes this description from `#[flag("...")]` attributes; it
//! can also be written by hand:
//!
//! ```
//! use struct_flags::{FieldVisitor, FlagField, FlagRecord, FlagsResult};
//!
//! #[derive(Default)]
//! struct Server {
//!     host: String,
//!     port: isize,
//! }
//!
//! impl FlagRecord for Server {
//!     fn visit_fields(&mut self, visitor: &mut dyn FieldVisitor) -> FlagsResult<()> {
//!         visitor.visit_flag(FlagField::new("a|Server host address|127.0.0.1", &mut self.host))?;
//!         visitor.visit_flag(FlagField::new("p|Server port|80", &mut self.port))
//!     }
//! }
//!
//! let mut server = Server::default();
//! struct_flags::try_parse_and_load_from(&mut server, ["-p", "8080"]).expect("flags load");
//! assert_eq!((server.host.as_str(), server.port), ("127.0.0.1", 8080));
//! ```

use std::any::{Any, type_name};

use crate::error::{FlagsResult, HookError};

/// A struct whose fields can be loaded from command-line flags.
pub trait FlagRecord {
    /// Visits every field in declaration order.
    ///
    /// Annotated primitive fields go to [`FieldVisitor::visit_flag`], nested
    /// records to [`FieldVisitor::visit_record`]. A record implementing
    /// [`PostParseHook`] finishes with [`FieldVisitor::visit_extension`] on
    /// itself, after all of its fields.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by the visitor.
    fn visit_fields(&mut self, visitor: &mut dyn FieldVisitor) -> FlagsResult<()>;
}

/// Receives the fields of a [`FlagRecord`].
///
/// Each loading stage is a visitor; see the crate documentation for the order
/// in which they run.
pub trait FieldVisitor {
    /// Called for a field carrying a flag annotation.
    ///
    /// # Errors
    ///
    /// Returns an error to abort the walk.
    fn visit_flag(&mut self, field: FlagField<'_>) -> FlagsResult<()>;

    /// Called for a nested record. Implementations normally recurse with
    /// `record.visit_fields(self)`.
    ///
    /// # Errors
    ///
    /// Returns an error to abort the walk.
    fn visit_record(&mut self, record: &mut dyn FlagRecord) -> FlagsResult<()>;

    /// Called once per record that implements [`PostParseHook`].
    ///
    /// # Errors
    ///
    /// Returns an error to abort the walk.
    fn visit_extension(&mut self, hook: &mut dyn PostParseHook) -> FlagsResult<()>;
}

/// An annotated field handed to [`FieldVisitor::visit_flag`].
pub struct FlagField<'a> {
    annotation: &'a str,
    value: &'a mut (dyn Any + 'static),
    type_name: &'static str,
}

impl<'a> FlagField<'a> {
    /// Pairs a raw annotation with the field it describes.
    pub fn new<T: Any>(annotation: &'a str, value: &'a mut T) -> Self {
        Self {
            annotation,
            value,
            type_name: type_name::<T>(),
        }
    }

    /// Raw annotation text.
    #[must_use]
    pub const fn annotation(&self) -> &'a str {
        self.annotation
    }

    /// Rust type name of the field, for diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The field itself.
    pub fn value_mut(&mut self) -> &mut (dyn Any + 'static) {
        self.value
    }

    pub(crate) fn into_value(self) -> &'a mut (dyn Any + 'static) {
        self.value
    }
}

impl std::fmt::Debug for FlagField<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlagField")
            .field("annotation", &self.annotation)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Logic run after flags are parsed and before required flags are checked.
///
/// A hook may validate the loaded values or derive fields that carry no flag
/// annotation; a required field set by a hook counts as supplied.
///
/// # Examples
///
/// ```
/// use struct_flags::{FlagRecord, HookError, PostParseHook};
///
/// #[derive(Debug, Default, FlagRecord)]
/// struct Params {
///     #[flag("u|Username||required")]
///     username: String,
///     is_admin: bool,
/// }
///
/// impl PostParseHook for Params {
///     fn post_parse(&mut self) -> Result<(), HookError> {
///         if self.username.contains(' ') {
///             return Err("username cannot contain whitespace".into());
///         }
///         self.is_admin = self.username == "admin";
///         Ok(())
///     }
/// }
///
/// let mut params = Params::default();
/// struct_flags::try_parse_and_load_from(&mut params, ["-u", "admin"]).expect("flags load");
/// assert!(params.is_admin);
/// ```
pub trait PostParseHook {
    /// Adjusts or validates the record after parsing.
    ///
    /// # Errors
    ///
    /// Any error aborts loading; later hooks do not run.
    fn post_parse(&mut self) -> Result<(), HookError>;

    /// Name used for this hook in diagnostics.
    fn hook_name(&self) -> &'static str {
        type_name::<Self>()
    }
}

/// Support items for code generated by `#[derive(FlagRecord)]`.
///
/// Capability probes decide at compile time whether a field is a nested
/// record and whether a record has a [`PostParseHook`]. The more specific
/// trait is implemented on `Probe<T>`, the fallback on `&Probe<T>`, so method
/// resolution on `(&Probe::of(x))` picks the specific one when its bound
/// holds.
#[doc(hidden)]
pub mod __private {
    use std::any::Any;
    use std::marker::PhantomData;

    use super::{FieldVisitor, FlagField, FlagRecord, PostParseHook};
    use crate::error::FlagsResult;

    pub struct Probe<T: ?Sized>(PhantomData<*const T>);

    impl<T: ?Sized> Probe<T> {
        pub const fn of(_: &T) -> Self {
            Self(PhantomData)
        }
    }

    pub struct RecordField;
    pub struct PlainField;
    pub struct WithHook;
    pub struct WithoutHook;

    /// Capability probes. Generated code glob-imports this module so the
    /// probe traits are in scope for method resolution.
    pub mod kinds {
        use super::{FlagRecord, PlainField, PostParseHook, Probe, RecordField, WithHook, WithoutHook};

        pub trait ViaRecord {
            fn field_kind(&self) -> RecordField {
                RecordField
            }
        }
        impl<T: FlagRecord> ViaRecord for Probe<T> {}

        pub trait ViaPlain {
            fn field_kind(&self) -> PlainField {
                PlainField
            }
        }
        impl<T: ?Sized> ViaPlain for &Probe<T> {}

        pub trait ViaHook {
            fn hook_kind(&self) -> WithHook {
                WithHook
            }
        }
        impl<T: PostParseHook> ViaHook for Probe<T> {}

        pub trait ViaNoHook {
            fn hook_kind(&self) -> WithoutHook {
                WithoutHook
            }
        }
        impl<T: ?Sized> ViaNoHook for &Probe<T> {}
    }

    impl RecordField {
        pub fn visit_annotated<T: FlagRecord>(
            self,
            _annotation: &str,
            field: &mut T,
            visitor: &mut dyn FieldVisitor,
        ) -> FlagsResult<()> {
            visitor.visit_record(field)
        }

        pub fn visit_unannotated<T: FlagRecord>(
            self,
            field: &mut T,
            visitor: &mut dyn FieldVisitor,
        ) -> FlagsResult<()> {
            visitor.visit_record(field)
        }
    }

    impl PlainField {
        pub fn visit_annotated<T: Any>(
            self,
            annotation: &str,
            field: &mut T,
            visitor: &mut dyn FieldVisitor,
        ) -> FlagsResult<()> {
            visitor.visit_flag(FlagField::new(annotation, field))
        }

        pub fn visit_unannotated<T: ?Sized>(
            self,
            _field: &mut T,
            _visitor: &mut dyn FieldVisitor,
        ) -> FlagsResult<()> {
            Ok(())
        }
    }

    impl WithHook {
        pub fn visit<T: PostParseHook>(
            self,
            record: &mut T,
            visitor: &mut dyn FieldVisitor,
        ) -> FlagsResult<()> {
            visitor.visit_extension(record)
        }
    }

    impl WithoutHook {
        pub fn visit<T: ?Sized>(
            self,
            _record: &mut T,
            _visitor: &mut dyn FieldVisitor,
        ) -> FlagsResult<()> {
            Ok(())
        }
    }
}
