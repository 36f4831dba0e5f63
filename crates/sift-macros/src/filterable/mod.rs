//! Implementation of the `#[derive(Filterable)]` macro.
//!
//! This module generates typed field selectors and by-name field resolution
//! for the sift predicate engine.

mod attrs;
mod derive;

pub use derive::filterable_derive_impl;
