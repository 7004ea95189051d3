//! Attribute parsing for the `FlagRecord` derive.

use syn::{Attribute, Data, DeriveInput, Expr, ExprLit, Fields, Ident, Lit, LitStr, Meta};

/// Struct-level `#[flags(...)]` options.
#[derive(Default)]
pub(crate) struct StructAttrs {
    pub crate_path: Option<syn::Path>,
}

/// One named field and its optional annotation.
pub(crate) struct FieldSpec {
    pub ident: Ident,
    pub annotation: Option<LitStr>,
}

/// Gathers struct attributes and per-field annotations in one pass so
/// expansion fails fast with a spanned error.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<(StructAttrs, Vec<FieldSpec>)> {
    let attrs = parse_struct_attrs(&input.attrs)?;
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "FlagRecord requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "FlagRecord can only be derived for structs",
            ));
        }
    };

    let specs = fields
        .iter()
        .map(|field| {
            let ident = field
                .ident
                .clone()
                .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
            Ok(FieldSpec {
                ident,
                annotation: parse_flag_attr(&field.attrs)?,
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;
    Ok((attrs, specs))
}

fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("flags")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                out.crate_path = Some(lit.parse()?);
                Ok(())
            } else {
                Err(meta.error("unknown flags attribute"))
            }
        })?;
    }
    Ok(out)
}

/// Reads the single `#[flag(...)]` or `#[flag = ...]` attribute of a field.
fn parse_flag_attr(attrs: &[Attribute]) -> syn::Result<Option<LitStr>> {
    let mut found: Option<LitStr> = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("flag")) {
        if found.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate #[flag] attribute"));
        }
        let annotation = match &attr.meta {
            Meta::List(_) => attr.parse_args::<LitStr>()?,
            Meta::NameValue(pair) => match &pair.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) => lit.clone(),
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "flag metadata must be a string literal",
                    ));
                }
            },
            Meta::Path(_) => {
                return Err(syn::Error::new_spanned(
                    attr,
                    r#"expected #[flag("name|usage|default|required")]"#,
                ));
            }
        };
        found = Some(annotation);
    }
    Ok(found)
}
