//! Token generation for the `FlagRecord` implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use super::crate_path;
use super::parse::{FieldSpec, StructAttrs};

/// Builds `impl FlagRecord`.
///
/// Every field goes through a capability probe: nested records are walked,
/// annotated primitives are visited as flags, anything else is skipped. The
/// struct's own hook probe runs after the fields.
pub(crate) fn generate_impl(
    input: &DeriveInput,
    attrs: &StructAttrs,
    fields: &[FieldSpec],
) -> TokenStream {
    let krate = crate_path::resolve(attrs.crate_path.as_ref());
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let visits = fields.iter().map(|field| field_visit(&krate, field));

    quote! {
        impl #impl_generics #krate::FlagRecord for #ident #ty_generics #where_clause {
            fn visit_fields(
                &mut self,
                visitor: &mut dyn #krate::FieldVisitor,
            ) -> #krate::FlagsResult<()> {
                use #krate::__private::kinds::*;
                #( #visits )*
                (&#krate::__private::Probe::of(&*self))
                    .hook_kind()
                    .visit(self, visitor)
            }
        }
    }
}

fn field_visit(krate: &TokenStream, field: &FieldSpec) -> TokenStream {
    let ident = &field.ident;
    field.annotation.as_ref().map_or_else(
        || {
            quote! {
                (&#krate::__private::Probe::of(&self.#ident))
                    .field_kind()
                    .visit_unannotated(&mut self.#ident, visitor)?;
            }
        },
        |annotation| {
            quote! {
                (&#krate::__private::Probe::of(&self.#ident))
                    .field_kind()
                    .visit_annotated(#annotation, &mut self.#ident, visitor)?;
            }
        },
    )
}
