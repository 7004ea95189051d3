//! Expansion of `#[derive(FlagRecord)]`.

mod crate_path;
mod generate;
mod parse;

use proc_macro2::TokenStream;
use syn::DeriveInput;

use generate::generate_impl;
use parse::parse_input;

/// Parses `input` and produces the trait implementation.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let (attrs, fields) = parse_input(input)?;
    Ok(generate_impl(input, &attrs, &fields))
}
