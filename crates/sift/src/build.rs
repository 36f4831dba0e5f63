//! Translation of one descriptor into one expression node.
//!
//! All checks happen here, before any element is seen: the field must
//! resolve, the value must have the field's kind, ordering comparisons need
//! an ordered kind, and `Contains` needs a kind with a containment test.

use tracing::trace;

use crate::descriptor::FilterDescriptor;
use crate::error::{Result, SiftError};
use crate::expr::{Expr, FieldRef, Param};
use crate::literal::Literal;
use crate::op::{Comparison, Relation};
use crate::options::ComposeOptions;

/// Builds the expression for `descriptor`, bound to `param`.
pub fn build_expr<T>(
    descriptor: &FilterDescriptor<T>,
    param: &Param,
    options: &ComposeOptions,
) -> Result<Expr<T>> {
    let field = FieldRef::new(param.clone(), descriptor.field().resolve()?);
    let value = descriptor.value();

    let relation = match descriptor.comparison() {
        Comparison::Equal => {
            check_kind(&field, value)?;
            return Ok(traced(Expr::Equal(field, value.clone())));
        }
        Comparison::NotEqual => {
            check_kind(&field, value)?;
            return Ok(traced(Expr::NotEqual(field, value.clone())));
        }
        Comparison::Contains => return build_contains(field, value, options).map(traced),
        Comparison::GreaterThan => Relation::GreaterThan,
        Comparison::LessThan => Relation::LessThan,
        Comparison::GreaterThanOrEqual => Relation::GreaterThanOrEqual,
        Comparison::LessThanOrEqual => Relation::LessThanOrEqual,
    };

    let accessor = field.accessor();
    if !accessor.kind().supports_ordering() {
        return Err(SiftError::UnsupportedOperation {
            op: descriptor.comparison().as_str(),
            type_name: accessor.type_name(),
        });
    }
    if value.is_null() {
        return Err(mismatch(&field, value));
    }
    check_kind(&field, value)?;

    Ok(traced(Expr::Relational(relation, field, value.clone())))
}

fn build_contains<T>(
    field: FieldRef<T>,
    value: &Literal,
    options: &ComposeOptions,
) -> Result<Expr<T>> {
    let accessor = field.accessor();
    if !accessor.kind().supports_contains() {
        return Err(SiftError::UnsupportedOperation {
            op: Comparison::Contains.as_str(),
            type_name: accessor.type_name(),
        });
    }

    match value {
        Literal::String(needle) => Ok(Expr::Contains {
            needle: needle.clone(),
            case: options.contains_policy(),
            field,
        }),
        other => Err(mismatch(&field, other)),
    }
}

// Null is accepted here; callers reject it where it has no meaning.
fn check_kind<T>(field: &FieldRef<T>, value: &Literal) -> Result<()> {
    match value.kind() {
        Some(kind) if kind != field.accessor().kind() => Err(mismatch(field, value)),
        _ => Ok(()),
    }
}

fn mismatch<T>(field: &FieldRef<T>, value: &Literal) -> SiftError {
    SiftError::TypeMismatch {
        field: field.name().to_string(),
        expected: field.accessor().kind().as_str(),
        actual: value.kind_name(),
    }
}

fn traced<T>(expr: Expr<T>) -> Expr<T> {
    trace!(expr = %expr, "built descriptor expression");
    expr
}
