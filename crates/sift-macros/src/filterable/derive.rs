//! Implementation of the `#[derive(Filterable)]` macro.
//!
//! This macro generates one typed `Field` constant per struct field and an
//! implementation of the `Filterable` trait that resolves field names to
//! those constants.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::parse_filter_attrs;

/// Main implementation of the Filterable derive macro.
pub fn filterable_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.generics.span(),
            "Filterable cannot be derived for generic structs",
        ));
    }

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Filterable can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Filterable can only be derived for structs",
            ))
        }
    };

    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut field_names: Vec<String> = Vec::new();
    let mut const_names: Vec<String> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let filter_attrs = parse_filter_attrs(&field.attrs)?;
        if filter_attrs.skip {
            continue;
        }

        let filter_name = filter_attrs
            .rename
            .unwrap_or_else(|| field_name.to_string().trim_start_matches("r#").to_string());
        if field_names.contains(&filter_name) {
            return Err(Error::new(
                field.span(),
                format!("duplicate filter field name: '{filter_name}'"),
            ));
        }

        let screaming = to_screaming_snake_case(&filter_name);
        if let Some(index) = const_names.iter().position(|c| *c == screaming) {
            return Err(Error::new(
                field.span(),
                format!(
                    "'{}' and '{filter_name}' both generate the constant {screaming}",
                    field_names[index]
                ),
            ));
        }
        let const_name = format_ident!("{}", screaming);
        let ty = &field.ty;
        let doc = format!("Typed selector for the `{filter_name}` field.");

        field_constants.push(quote! {
            #[doc = #doc]
            pub const #const_name: ::sift::Field<#struct_name, #ty> = {
                fn read(item: &#struct_name) -> &#ty {
                    &item.#field_name
                }
                ::sift::Field::new(#filter_name, read)
            };
        });

        field_matches.push(quote! {
            #filter_name => ::core::option::Option::Some(Self::#const_name.accessor()),
        });

        field_names.push(filter_name);
        const_names.push(screaming);
    }

    let expanded = quote! {
        impl #struct_name {
            #(#field_constants)*
        }

        impl ::sift::Filterable for #struct_name {
            fn field(name: &str) -> ::core::option::Option<::sift::Accessor<Self>> {
                match name {
                    #(#field_matches)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_names() -> &'static [&'static str] {
                &[#(#field_names),*]
            }
        }
    };

    Ok(expanded)
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == '.' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(input: DeriveInput) -> Result<String> {
        filterable_derive_impl(input).map(|tokens| tokens.to_string())
    }

    #[test]
    fn test_screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("name"), "NAME");
        assert_eq!(to_screaming_snake_case("created_at"), "CREATED_AT");
        assert_eq!(to_screaming_snake_case("createdAt"), "CREATED_AT");
        assert_eq!(to_screaming_snake_case("my-field"), "MY_FIELD");
        assert_eq!(to_screaming_snake_case("owner.email"), "OWNER_EMAIL");
    }

    #[test]
    fn test_generates_constants_and_lookup() {
        let out = expand(syn::parse_quote! {
            struct Person {
                name: String,
                #[filter(rename = "years")]
                age: u32,
                #[filter(skip)]
                cache: Vec<u8>,
            }
        })
        .unwrap();

        assert!(out.contains("pub const NAME"));
        assert!(out.contains("pub const YEARS"));
        assert!(!out.contains("CACHE"));
        assert!(out.contains("\"years\" =>"));
        assert!(out.contains("impl :: sift :: Filterable for Person"));
    }

    #[test]
    fn test_rejects_tuple_structs() {
        let err = expand(syn::parse_quote! {
            struct Pair(u32, u32);
        })
        .unwrap_err();
        assert!(err.to_string().contains("named fields"));
    }

    #[test]
    fn test_rejects_enums() {
        let err = expand(syn::parse_quote! {
            enum Status { Open, Closed }
        })
        .unwrap_err();
        assert!(err.to_string().contains("only be derived for structs"));
    }

    #[test]
    fn test_rejects_generics() {
        let err = expand(syn::parse_quote! {
            struct Wrapper<T> { inner: T }
        })
        .unwrap_err();
        assert!(err.to_string().contains("generic"));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = expand(syn::parse_quote! {
            struct Clash {
                name: String,
                #[filter(rename = "name")]
                alias: String,
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("duplicate filter field name"));
    }

    #[test]
    fn test_rejects_colliding_constant_names() {
        let err = expand(syn::parse_quote! {
            struct Event {
                created_at: u64,
                #[filter(rename = "createdAt")]
                created: u64,
            }
        })
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'created_at' and 'createdAt'"), "{message}");
        assert!(message.contains("CREATED_AT"), "{message}");
    }
}
