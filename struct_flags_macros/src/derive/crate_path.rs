//! Crate path resolution for dependency aliasing support.
//!
//! Converts the optional `#[flags(crate = "...")]` attribute value into the
//! path generated code uses to reach `struct_flags`.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed struct attribute.
///
/// Defaults to `::struct_flags` when no override is present.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::struct_flags }, |path| quote! { #path })
}
