//! Closed predicates and their in-memory execution.
//!
//! A [`Predicate`] pairs an expression body with the parameters it binds.
//! Every parameter the body references is in the list, so a predicate can be
//! evaluated on its own or handed to a push-down target.

use std::fmt;

use crate::combinator;
use crate::error::{Result, SiftError};
use crate::eval::evaluate;
use crate::expr::{Expr, Param};

/// An executable boolean test over one element of `T`.
pub struct Predicate<T> {
    params: Vec<Param>,
    body: Expr<T>,
}

impl<T> Predicate<T> {
    // Callers guarantee the body references only `params`.
    pub(crate) fn closed(params: Vec<Param>, body: Expr<T>) -> Self {
        Predicate { params, body }
    }

    /// Assembles a predicate from hand-built parts.
    ///
    /// Fails if `params` is empty or the body references a parameter that is
    /// not in `params`.
    pub fn from_parts(params: Vec<Param>, body: Expr<T>) -> Result<Self> {
        if params.is_empty() {
            return Err(SiftError::EmptyParameterList);
        }
        if let Some(stray) = body.params().into_iter().find(|p| !params.contains(p)) {
            return Err(SiftError::UnboundParameter {
                param: stray.name().to_string(),
            });
        }
        Ok(Predicate { params, body })
    }

    /// A predicate with a constant result and a fresh parameter.
    pub fn constant(value: bool) -> Self {
        Predicate::closed(vec![Param::fresh("item")], Expr::Constant(value))
    }

    /// Accepts every element. The identity for `and` folding.
    pub fn always_true() -> Self {
        Predicate::constant(true)
    }

    /// Rejects every element. The identity for `or` folding.
    pub fn always_false() -> Self {
        Predicate::constant(false)
    }

    /// The parameters this predicate binds.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// The expression body.
    pub fn body(&self) -> &Expr<T> {
        &self.body
    }

    /// Splits the predicate into its parameters and body.
    pub fn into_parts(self) -> (Vec<Param>, Expr<T>) {
        (self.params, self.body)
    }

    /// Joins `other` with a logical AND under this predicate's parameters.
    pub fn and(self, other: Predicate<T>) -> Result<Predicate<T>> {
        combinator::and(self, other)
    }

    /// Joins `other` with a logical OR under this predicate's parameters.
    pub fn or(self, other: Predicate<T>) -> Result<Predicate<T>> {
        combinator::or(self, other)
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests if a single item matches.
    pub fn matches(&self, item: &T) -> bool {
        evaluate(&self.body, item)
    }

    /// Filters a slice, returning references to matching items in order.
    pub fn filter<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(item)).collect()
    }

    /// Filters and clones matching items.
    pub fn filter_cloned(&self, items: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        self.filter(items).into_iter().cloned().collect()
    }

    /// Filters a vector in place, keeping only matching items.
    pub fn retain(&self, items: &mut Vec<T>) {
        items.retain(|item| self.matches(item));
    }

    /// Counts matching items.
    pub fn count(&self, items: &[T]) -> usize {
        items.iter().filter(|item| self.matches(item)).count()
    }

    /// Returns `true` if any item matches.
    pub fn any(&self, items: &[T]) -> bool {
        items.iter().any(|item| self.matches(item))
    }

    /// Returns `true` if all items match.
    pub fn all(&self, items: &[T]) -> bool {
        items.iter().all(|item| self.matches(item))
    }

    /// Finds the first matching item.
    pub fn find<'a>(&self, items: &'a [T]) -> Option<&'a T> {
        items.iter().find(|item| self.matches(item))
    }

    /// Finds the index of the first matching item.
    pub fn position(&self, items: &[T]) -> Option<usize> {
        items.iter().position(|item| self.matches(item))
    }

    /// Converts the predicate into a plain closure.
    pub fn into_fn(self) -> impl Fn(&T) -> bool {
        move |item: &T| self.matches(item)
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Predicate {
            params: self.params.clone(),
            body: self.body.clone(),
        }
    }
}

impl<T> fmt::Display for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("|")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, "| {}", self.body)
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({self})")
    }
}
