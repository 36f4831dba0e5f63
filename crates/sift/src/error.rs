//! Error types for the sift crate.

use thiserror::Error;

/// Errors that can occur when building, combining, or paging predicates.
///
/// Every variant is raised before any element is evaluated: a composition
/// either produces a usable predicate or fails as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SiftError {
    /// A descriptor names a field that the element type does not expose.
    #[error("field '{field}' does not exist on {type_name}")]
    FieldResolution {
        field: String,
        type_name: &'static str,
    },

    /// The comparison is not available for the field's value type.
    #[error("operator '{op}' is not supported for field type {type_name}")]
    UnsupportedOperation {
        op: &'static str,
        type_name: &'static str,
    },

    /// The descriptor value cannot be compared with the field's value type.
    #[error("type mismatch on field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Two predicates with different parameter counts cannot be unified.
    #[error("cannot unify predicates with {expected} and {actual} parameters")]
    ArityMismatch { expected: usize, actual: usize },

    /// An expression references a parameter its predicate does not bind.
    #[error("parameter '{param}' is not bound by the predicate")]
    UnboundParameter { param: String },

    /// A predicate must bind at least one parameter.
    #[error("a predicate needs at least one parameter")]
    EmptyParameterList,

    /// Page size must be positive.
    #[error("page size must be positive, got {size}")]
    InvalidPageSize { size: i64 },

    /// Page index lies before the first page.
    #[error("page index {index} is before the first page ({start_index})")]
    InvalidPageIndex { index: i64, start_index: i64 },
}

/// Result type for sift operations.
pub type Result<T> = std::result::Result<T, SiftError>;
