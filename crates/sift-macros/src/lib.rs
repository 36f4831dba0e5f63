//! Proc macros for Sift.
//!
//! # Available Macros
//!
//! ## Derive Macros
//!
//! - [`Filterable`] - Generate typed field selectors and by-name lookup
//!
//! # Examples
//!
//! For working examples, see `sift/tests/derive.rs`.

mod filterable;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Filterable` trait and typed field selectors.
///
/// Every named field becomes a `sift::Field` constant and is resolvable by
/// name through `Filterable::field`. Field types must implement
/// `sift::FieldValue`; mark any other field with `#[filter(skip)]`.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `skip` | Exclude this field from filtering |
/// | `rename = "..."` | Use a custom name for descriptors |
///
/// # Generated Code
///
/// The macro generates:
///
/// 1. Field selector constants (e.g., `Task::TITLE: Field<Task, String>`)
/// 2. Implementation of `Filterable::field()` and `Filterable::field_names()`
///
/// # Example
///
/// ```ignore
/// use sift::{Comparison, FilterDescriptor, SiftIterExt};
/// use sift_macros::Filterable;
///
/// #[derive(Filterable)]
/// struct Task {
///     title: String,
///     priority: u8,
///     #[filter(rename = "done")]
///     completed: bool,
///     #[filter(skip)]
///     notes: Vec<String>,
/// }
///
/// // Typed selectors
/// let urgent = Task::PRIORITY.gte(4);
///
/// // Or by name, checked when the predicate is built
/// let open = FilterDescriptor::<Task>::named("done", Comparison::Equal, false);
///
/// let hits = tasks.iter().filter_by(&[urgent, open])?.count();
/// ```
///
/// # Errors
///
/// Deriving fails for enums, tuple structs, generic structs, and structs
/// where two fields resolve to the same filter name.
#[proc_macro_derive(Filterable, attributes(filter))]
pub fn filterable_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    filterable::filterable_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
