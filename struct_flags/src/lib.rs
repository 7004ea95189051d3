//! Command-line flags loaded straight into annotated structs.
//!
//! Each field of a struct deriving [`FlagRecord`] may carry a
//! `#[flag("name|usage|default|required")]` annotation. Only the name is
//! mandatory; a `required` marker in the fourth segment discards any default.
//! Fields without an annotation are ignored unless their type is itself a
//! [`FlagRecord`], in which case its fields are loaded too.
//!
//! ```
//! use struct_flags::{FlagRecord, FlagsError};
//!
//! #[derive(Debug, Default, FlagRecord)]
//! struct UserAuth {
//!     #[flag("user|Username||required")]
//!     username: String,
//!     #[flag("pass|Password")]
//!     password: String,
//! }
//!
//! #[derive(Debug, Default, FlagRecord)]
//! struct Params {
//!     auth: UserAuth,
//!     #[flag("p|Server port|80")]
//!     port: isize,
//! }
//!
//! let mut params = Params::default();
//! struct_flags::try_parse_and_load_from(&mut params, ["-user=alice"]).expect("flags load");
//! assert_eq!(params.auth.username, "alice");
//! assert_eq!(params.port, 80);
//!
//! let err = struct_flags::try_parse_and_load_from(&mut params, ["-p", "8080"]).unwrap_err();
//! assert!(matches!(err, FlagsError::MissingRequired(name) if name == "user"));
//! assert_eq!(params.port, 0, "a failed load resets the record");
//! ```
//!
//! Supported field types are `String`, `bool`, `isize`, `i64`, `usize`,
//! `u64`, `f64` and [`std::time::Duration`]. Flags are written `-name value`,
//! `-name=value` or with two leading hyphens; boolean flags also accept a bare
//! `-name`. `-h` and `-help` print usage.
//!
//! Loading runs in four stages, each a walk over the record tree:
//!
//! 1. collect annotations into a [`FlagRegistry`], a [`RequiredSet`] and a
//!    [`HookList`];
//! 2. parse the tokens with clap and write the values into their fields;
//! 3. run [`PostParseHook`]s, innermost records first;
//! 4. check that every required field is non-zero.

pub use struct_flags_macros::FlagRecord;

mod assign;
mod collector;
mod descriptor;
mod error;
mod extension;
mod load;
mod record;
mod registry;
mod validator;
mod value;

pub use collector::{FlagCollection, HookList, RequiredSet, collect};
pub use descriptor::{FlagDescriptor, REQUIRED_MARKER, RESERVED_NAMES, SEGMENT_DELIMITER};
pub use error::{FlagsError, FlagsResult, HookError, is_display_request, is_help_request};
pub use load::{FlagLoader, Stage, parse_and_load, try_parse_and_load_from};
pub use record::{FieldVisitor, FlagField, FlagRecord, PostParseHook};
#[doc(hidden)]
pub use record::__private;
pub use registry::{CommandSettings, FlagRegistry, ParsedFlags, TypedFlag};
pub use value::{FlagKind, FlagValue, ValueError};
