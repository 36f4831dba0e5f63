//! Joining compiled predicates.
//!
//! Predicates built separately bind different parameters, so joining them
//! first retargets the second onto the first's parameters and then wraps
//! both bodies in one logical node. The constants [`always_true`] and
//! [`always_false`] seed `and` and `or` folds respectively.
//!
//! ```
//! use sift::{Field, combinator};
//!
//! struct Host {
//!     region: String,
//!     load: f32,
//! }
//!
//! const REGION: Field<Host, String> = Field::new("region", |h| &h.region);
//! const LOAD: Field<Host, f32> = Field::new("load", |h| &h.load);
//!
//! let in_eu = sift::compose(&[REGION.eq("eu".to_string())]).unwrap();
//! let idle = sift::compose(&[LOAD.lt(0.2)]).unwrap();
//! let pick = combinator::and(in_eu, idle).unwrap();
//!
//! assert!(pick.matches(&Host { region: "eu".into(), load: 0.1 }));
//! assert!(!pick.matches(&Host { region: "us".into(), load: 0.1 }));
//! ```

use tracing::debug;

use crate::error::Result;
use crate::expr::Expr;
use crate::predicate::Predicate;
use crate::rebind;

/// Accepts an element when both predicates do.
pub fn and<T>(first: Predicate<T>, second: Predicate<T>) -> Result<Predicate<T>> {
    let joined = rebind::compose(first, second, Expr::and)?;
    debug!(predicate = %joined, "combined predicates with and");
    Ok(joined)
}

/// Accepts an element when either predicate does.
pub fn or<T>(first: Predicate<T>, second: Predicate<T>) -> Result<Predicate<T>> {
    let joined = rebind::compose(first, second, Expr::or)?;
    debug!(predicate = %joined, "combined predicates with or");
    Ok(joined)
}

/// A predicate that accepts every element.
pub fn always_true<T>() -> Predicate<T> {
    Predicate::always_true()
}

/// A predicate that rejects every element.
pub fn always_false<T>() -> Predicate<T> {
    Predicate::always_false()
}

/// Joins every predicate with `and`; an empty input accepts everything.
pub fn all_of<T, I>(predicates: I) -> Result<Predicate<T>>
where
    I: IntoIterator<Item = Predicate<T>>,
{
    fold(predicates, always_true, and)
}

/// Joins every predicate with `or`; an empty input rejects everything.
pub fn any_of<T, I>(predicates: I) -> Result<Predicate<T>>
where
    I: IntoIterator<Item = Predicate<T>>,
{
    fold(predicates, always_false, or)
}

fn fold<T, I>(
    predicates: I,
    identity: fn() -> Predicate<T>,
    join: fn(Predicate<T>, Predicate<T>) -> Result<Predicate<T>>,
) -> Result<Predicate<T>>
where
    I: IntoIterator<Item = Predicate<T>>,
{
    let mut iter = predicates.into_iter();
    let Some(first) = iter.next() else {
        return Ok(identity());
    };
    iter.try_fold(first, join)
}
