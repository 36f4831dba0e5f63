//! Attribute parsing for the Filterable derive macro.
//!
//! This module provides the parser for the `#[filter(...)]` field attribute.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Lit, Meta, Result, Token,
};

/// Field-level attributes from `#[filter(...)]`.
#[derive(Debug, Clone)]
pub struct FilterAttr {
    /// Leave this field out of the generated selectors.
    pub skip: bool,
    /// Custom field name for descriptors (default: field name).
    pub rename: Option<String>,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for FilterAttr {
    fn default() -> Self {
        FilterAttr {
            skip: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl Parse for FilterAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = FilterAttr {
            span: input.span(),
            ..FilterAttr::default()
        };

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => {
                    attr.skip = true;
                }

                // rename = "custom_name"
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    {
                        if s.value().is_empty() {
                            return Err(Error::new(s.span(), "rename must not be empty"));
                        }
                        attr.rename = Some(s.value());
                    } else {
                        return Err(Error::new(
                            nv.value.span(),
                            "rename must be a string literal",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown filter attribute. Expected: skip or rename = \"...\"",
                    ));
                }
            }
        }

        if attr.skip && attr.rename.is_some() {
            return Err(Error::new(attr.span, "skip and rename cannot be combined"));
        }

        Ok(attr)
    }
}

/// Extract the `#[filter(...)]` attribute from a field's attributes.
///
/// A field may carry at most one; options go in a single list.
pub fn parse_filter_attrs(attrs: &[Attribute]) -> Result<FilterAttr> {
    let mut found: Option<FilterAttr> = None;
    for attr in attrs {
        if !attr.path().is_ident("filter") {
            continue;
        }
        if found.is_some() {
            return Err(Error::new(
                attr.span(),
                "duplicate #[filter] attribute; combine options in one list",
            ));
        }
        found = Some(attr.parse_args::<FilterAttr>()?);
    }
    Ok(found.unwrap_or_default())
}
