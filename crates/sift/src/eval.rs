//! In-memory evaluation of expression trees.
//!
//! Null handling is lifted: an absent value equals only the `Null` literal,
//! and every ordering or containment test against an absent value is false.

use std::cmp::Ordering;

use crate::expr::Expr;
use crate::literal::Literal;
use crate::op::Connector;
use crate::value::Value;

/// Evaluates `expr` with every parameter bound to `item`.
///
/// Logical nodes short-circuit. Pending right operands are kept on a heap
/// stack, so a long descriptor chain never deepens the call stack.
pub fn evaluate<T>(expr: &Expr<T>, item: &T) -> bool {
    let mut pending: Vec<(Connector, &Expr<T>)> = Vec::new();
    let mut node = expr;
    loop {
        let value = loop {
            match node {
                Expr::And(left, right) => {
                    pending.push((Connector::And, right));
                    node = left;
                }
                Expr::Or(left, right) => {
                    pending.push((Connector::Or, right));
                    node = left;
                }
                Expr::Constant(b) => break *b,
                Expr::Equal(field, literal) => break equals(&field.read(item), literal),
                Expr::NotEqual(field, literal) => break !equals(&field.read(item), literal),
                Expr::Relational(relation, field, literal) => {
                    break compare(&field.read(item), literal)
                        .is_some_and(|ordering| relation.holds(ordering))
                }
                Expr::Contains {
                    field,
                    needle,
                    case,
                } => {
                    break field
                        .read(item)
                        .as_str()
                        .is_some_and(|haystack| case.contains(haystack, needle))
                }
            }
        };

        // The right operand decides the node only when the left one did not.
        loop {
            match pending.pop() {
                None => return value,
                Some((Connector::And, right)) if value => {
                    node = right;
                    break;
                }
                Some((Connector::Or, right)) if !value => {
                    node = right;
                    break;
                }
                Some(_) => {}
            }
        }
    }
}

fn equals(value: &Value<'_>, literal: &Literal) -> bool {
    match (value, literal) {
        (Value::None, Literal::Null) => true,
        (Value::None, _) | (_, Literal::Null) => false,
        _ => compare(value, literal) == Some(Ordering::Equal),
    }
}

/// Orders a field value against a literal of the same kind.
///
/// Returns `None` for mismatched kinds, absent values, and NaN.
pub fn compare(value: &Value<'_>, literal: &Literal) -> Option<Ordering> {
    match (value, literal) {
        (Value::String(a), Literal::String(b)) => Some((*a).cmp(b.as_str())),
        (Value::Number(a), Literal::Number(b)) => a.compare(*b),
        (Value::Bool(a), Literal::Bool(b)) => Some(a.cmp(b)),
        (Value::Timestamp(a), Literal::Timestamp(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
