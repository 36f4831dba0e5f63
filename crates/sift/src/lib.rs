//! Sift - Composable filter predicates for Rust struct collections.
//!
//! Sift turns filter conditions described as data into checked,
//! executable predicates. It supports:
//!
//! - Filter descriptors: field, comparison, connector, and value
//! - Build-time checks for unknown fields, mismatched values, and
//!   unsupported operations
//! - Left-to-right composition with And/Or connectors
//! - Combining independently built predicates with `and` / `or`
//! - Paging over iterators, slices, and queryable sources
//! - Push-down to deferred sources, including parameterised SQL
//!
//! # Quick Start
//!
//! ```rust
//! use sift::{Field, SiftIterExt};
//!
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! impl Person {
//!     const NAME: Field<Person, String> = Field::new("name", |p| &p.name);
//!     const AGE: Field<Person, i32> = Field::new("age", |p| &p.age);
//! }
//!
//! let people = vec![
//!     Person { name: "Ann".into(), age: 17 },
//!     Person { name: "Bob".into(), age: 20 },
//!     Person { name: "Dana".into(), age: 30 },
//! ];
//!
//! let adults_or_anns: Vec<&str> = people
//!     .iter()
//!     .filter_by(&[
//!         Person::AGE.gt(18),
//!         Person::NAME.contains("ann".to_string()).or(),
//!     ])
//!     .unwrap()
//!     .map(|p| p.name.as_str())
//!     .collect();
//!
//! assert_eq!(adults_or_anns, ["Ann", "Bob", "Dana"]);
//! ```
//!
//! # Composition Semantics
//!
//! Descriptors fold strictly left to right, with no operator precedence:
//!
//! ```text
//! [d0, d1 (Or), d2 (And), d3 (Or)]  =>  (((d0 || d1) && d2) || d3)
//! ```
//!
//! The connector of the first descriptor is ignored, and an empty list
//! accepts every element. For grouped logic, compose the groups separately
//! and join them with [`and`] / [`or`].
//!
//! # Field Kinds and Comparisons
//!
//! | Kind | Comparisons |
//! |------|-------------|
//! | String | `Equal`, `NotEqual`, `GreaterThan`, `LessThan`, `GreaterThanOrEqual`, `LessThanOrEqual`, `Contains` |
//! | Number | `Equal`, `NotEqual`, `GreaterThan`, `LessThan`, `GreaterThanOrEqual`, `LessThanOrEqual` |
//! | Timestamp | `Equal`, `NotEqual`, `GreaterThan`, `LessThan`, `GreaterThanOrEqual`, `LessThanOrEqual` |
//! | Bool | `Equal`, `NotEqual` |
//!
//! `Contains` is case-insensitive unless [`ComposeOptions`] say otherwise.
//! Optional fields compare against `None` with `Equal` / `NotEqual`; every
//! other test against an absent value is false.
//!
//! # Deriving Fields
//!
//! The `sift-macros` crate derives [`Filterable`] and one [`Field`]
//! constant per struct field, so descriptors can also name fields by
//! string via [`FilterDescriptor::named`].

mod build;
pub mod combinator;
mod compose;
mod descriptor;
mod error;
mod eval;
mod expr;
mod ext;
mod field;
mod literal;
mod op;
mod options;
mod page;
mod predicate;
mod queryable;
mod rebind;
mod sql;
mod translate;
mod value;

// Re-export public API
pub use build::build_expr;
pub use combinator::{all_of, always_false, always_true, and, any_of, or};
pub use compose::{compose, filter_queryable, filter_sequence, Composer};
pub use descriptor::{FieldSelector, FilterDescriptor};
pub use error::{Result, SiftError};
pub use eval::{compare, evaluate};
pub use expr::{Expr, FieldRef, Param};
pub use ext::{Filtered, SiftIterExt};
pub use field::{Accessor, Field, FieldAccess, FieldValue, Filterable};
pub use literal::Literal;
pub use op::{Comparison, Connector, Relation};
pub use options::{CaseSensitivity, ComposeOptions};
pub use page::{
    page, page_queryable, page_slice, page_with, PageRequest, Window, DEFAULT_START_INDEX,
};
pub use predicate::Predicate;
pub use queryable::{MemoryQuery, Queryable};
pub use rebind::ParamRebinder;
pub use sql::{escape_like, quote_ident, SqlCondition, SqlQuery, SqlSelect, SqlTranslator};
pub use translate::{translate, Translator};
pub use value::{Number, Timestamp, Value, ValueKind};
