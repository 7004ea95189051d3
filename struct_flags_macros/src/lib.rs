//! Procedural macros for `struct_flags`.
//!
//! The [`FlagRecord`] derive turns `#[flag("...")]` field attributes into an
//! implementation of `struct_flags::FlagRecord`. Annotations are passed
//! through verbatim; `struct_flags` parses them when flags are loaded.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `struct_flags::FlagRecord`.
///
/// Field attributes:
///
/// - `#[flag("name|usage|default|required")]` or `#[flag = "..."]` marks a
///   flag field.
///
/// Fields without `#[flag]` are skipped unless their type implements
/// `FlagRecord`, in which case they are walked as nested records. If the
/// struct implements `struct_flags::PostParseHook`, the hook is registered
/// automatically.
///
/// Struct attributes:
///
/// - `#[flags(crate = "path")]` points generated code at a renamed
///   `struct_flags` dependency.
#[proc_macro_derive(FlagRecord, attributes(flag, flags))]
pub fn derive_flag_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
