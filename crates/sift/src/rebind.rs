//! Parameter unification for combining independently built predicates.
//!
//! Two predicates built separately bind different [`Param`]s. Before their
//! bodies can share one scope, every reference to the second predicate's
//! parameters is retargeted to the first's. The rewrite walks the whole tree
//! and produces a new one; the input is never modified.

use std::collections::HashMap;

use tracing::trace;

use crate::error::{Result, SiftError};
use crate::expr::{Expr, FieldRef, Param};
use crate::literal::Literal;
use crate::op::Relation;
use crate::options::CaseSensitivity;
use crate::predicate::Predicate;
use crate::translate::{translate, Translator};

/// A parameter substitution applied across an expression tree.
#[derive(Debug, Clone, Default)]
pub struct ParamRebinder {
    map: HashMap<Param, Param>,
}

impl ParamRebinder {
    /// Creates a rebinder from an explicit mapping.
    pub fn new(map: HashMap<Param, Param>) -> Self {
        ParamRebinder { map }
    }

    /// Maps `from[i]` to `to[i]` for every position.
    ///
    /// Fails with [`SiftError::ArityMismatch`] when the lists differ in
    /// length.
    pub fn positional(from: &[Param], to: &[Param]) -> Result<Self> {
        if from.len() != to.len() {
            return Err(SiftError::ArityMismatch {
                expected: to.len(),
                actual: from.len(),
            });
        }
        let map = from.iter().cloned().zip(to.iter().cloned()).collect();
        Ok(ParamRebinder { map })
    }

    /// Returns the replacement for `param`, or `param` itself if unmapped.
    pub fn target<'a>(&'a self, param: &'a Param) -> &'a Param {
        self.map.get(param).unwrap_or(param)
    }

    /// Returns a copy of `expr` with every mapped parameter replaced.
    pub fn rebind<T>(&self, expr: &Expr<T>) -> Expr<T> {
        translate(expr, &mut Rebind { rebinder: self })
    }

    fn rebound<T>(&self, field: &FieldRef<T>) -> FieldRef<T> {
        field.rebound(self.target(field.param()).clone())
    }
}

// Rebuilds the tree node by node on top of the iterative walk.
struct Rebind<'r> {
    rebinder: &'r ParamRebinder,
}

impl<T> Translator<T> for Rebind<'_> {
    type Output = Expr<T>;

    fn constant(&mut self, value: bool) -> Expr<T> {
        Expr::Constant(value)
    }

    fn equal(&mut self, field: &FieldRef<T>, value: &Literal) -> Expr<T> {
        Expr::Equal(self.rebinder.rebound(field), value.clone())
    }

    fn not_equal(&mut self, field: &FieldRef<T>, value: &Literal) -> Expr<T> {
        Expr::NotEqual(self.rebinder.rebound(field), value.clone())
    }

    fn relational(&mut self, relation: Relation, field: &FieldRef<T>, value: &Literal) -> Expr<T> {
        Expr::Relational(relation, self.rebinder.rebound(field), value.clone())
    }

    fn contains(&mut self, field: &FieldRef<T>, needle: &str, case: CaseSensitivity) -> Expr<T> {
        Expr::Contains {
            field: self.rebinder.rebound(field),
            needle: needle.to_string(),
            case,
        }
    }

    fn and(&mut self, left: Expr<T>, right: Expr<T>) -> Expr<T> {
        Expr::and(left, right)
    }

    fn or(&mut self, left: Expr<T>, right: Expr<T>) -> Expr<T> {
        Expr::or(left, right)
    }
}

/// Merges two predicates under the first one's parameters.
///
/// The second predicate's parameters are mapped positionally onto the
/// first's, its body is rewritten, and `merge` joins the two bodies.
pub fn compose<T, F>(first: Predicate<T>, second: Predicate<T>, merge: F) -> Result<Predicate<T>>
where
    F: FnOnce(Expr<T>, Expr<T>) -> Expr<T>,
{
    let (first_params, first_body) = first.into_parts();
    let rebinder = ParamRebinder::positional(second.params(), &first_params)?;
    let second_body = rebinder.rebind(second.body());

    trace!(
        params = first_params.len(),
        second = %second_body,
        "rebound predicate parameters"
    );

    Ok(Predicate::closed(first_params, merge(first_body, second_body)))
}
