//! Sources that accept filters and windows without evaluating them.
//!
//! A [`Queryable`] records what the caller asks for and decides for itself
//! when and where to run it. [`MemoryQuery`] is the in-memory form: it
//! keeps the pushed stages and runs them only when iterated. Remote
//! sources translate the same stages into their own query language; see
//! [`SqlSelect`](crate::SqlSelect).

use std::fmt;

use crate::predicate::Predicate;

/// A source that can take filters and skip/take windows for deferred
/// execution.
///
/// Each call consumes the source and returns the extended one. Stages apply
/// in the order they were pushed.
pub trait Queryable<T>: Sized {
    /// Keeps only elements matching `predicate`.
    fn push_filter(self, predicate: Predicate<T>) -> Self;

    /// Drops the first `n` elements.
    fn push_skip(self, n: usize) -> Self;

    /// Keeps at most `n` elements.
    fn push_take(self, n: usize) -> Self;
}

enum Stage<T> {
    Filter(Predicate<T>),
    Skip(usize),
    Take(usize),
}

impl<T> fmt::Display for Stage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Filter(predicate) => write!(f, "filter({predicate})"),
            Stage::Skip(n) => write!(f, "skip({n})"),
            Stage::Take(n) => write!(f, "take({n})"),
        }
    }
}

/// A lazy query over a borrowed slice.
///
/// # Example
///
/// ```
/// use sift::{Field, MemoryQuery, Queryable};
///
/// struct Job {
///     retries: u32,
/// }
///
/// const RETRIES: Field<Job, u32> = Field::new("retries", |j| &j.retries);
///
/// let jobs: Vec<Job> = (0..10).map(|retries| Job { retries }).collect();
/// let query = sift::filter_queryable(MemoryQuery::new(&jobs), &[RETRIES.gte(4)])
///     .unwrap()
///     .push_skip(1)
///     .push_take(2);
///
/// let retries: Vec<u32> = query.iter().map(|j| j.retries).collect();
/// assert_eq!(retries, [5, 6]);
/// ```
pub struct MemoryQuery<'a, T> {
    source: &'a [T],
    stages: Vec<Stage<T>>,
}

impl<'a, T> MemoryQuery<'a, T> {
    /// Creates a query over `source` with no stages.
    pub fn new(source: &'a [T]) -> Self {
        MemoryQuery {
            source,
            stages: Vec::new(),
        }
    }

    /// Number of recorded stages.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Runs the recorded stages lazily over the source.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &'a T> + '_> {
        let mut iter: Box<dyn Iterator<Item = &'a T> + '_> = Box::new(self.source.iter());
        for stage in &self.stages {
            iter = match stage {
                Stage::Filter(predicate) => {
                    Box::new(iter.filter(move |item| predicate.matches(item)))
                }
                Stage::Skip(n) => Box::new(iter.skip(*n)),
                Stage::Take(n) => Box::new(iter.take(*n)),
            };
        }
        iter
    }

    /// Runs the query and collects references to the results.
    pub fn to_vec(&self) -> Vec<&'a T> {
        self.iter().collect()
    }

    /// Runs the query and counts the results.
    pub fn count(&self) -> usize {
        self.iter().count()
    }
}

impl<T> Queryable<T> for MemoryQuery<'_, T> {
    fn push_filter(mut self, predicate: Predicate<T>) -> Self {
        self.stages.push(Stage::Filter(predicate));
        self
    }

    fn push_skip(mut self, n: usize) -> Self {
        self.stages.push(Stage::Skip(n));
        self
    }

    fn push_take(mut self, n: usize) -> Self {
        self.stages.push(Stage::Take(n));
        self
    }
}

impl<T> fmt::Display for MemoryQuery<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "memory[{}]", self.source.len())?;
        for stage in &self.stages {
            write!(f, " | {stage}")?;
        }
        Ok(())
    }
}

impl<T> fmt::Debug for MemoryQuery<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemoryQuery({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;

    struct Slot {
        n: i32,
    }

    const N: Field<Slot, i32> = Field::new("n", |s| &s.n);

    fn slots() -> Vec<Slot> {
        (0..10).map(|n| Slot { n }).collect()
    }

    fn above(min: i32) -> Predicate<Slot> {
        crate::compose(&[N.gt(min)]).unwrap()
    }

    #[test]
    fn no_stages_yields_source() {
        let items = slots();
        let query = MemoryQuery::new(&items);
        assert_eq!(query.count(), 10);
        assert_eq!(query.stage_count(), 0);
    }

    #[test]
    fn stages_apply_in_push_order() {
        let items = slots();

        let filter_then_skip = MemoryQuery::new(&items).push_filter(above(5)).push_skip(2);
        let ns: Vec<i32> = filter_then_skip.iter().map(|s| s.n).collect();
        assert_eq!(ns, [8, 9]);

        let skip_then_filter = MemoryQuery::new(&items).push_skip(8).push_filter(above(5));
        let ns: Vec<i32> = skip_then_filter.iter().map(|s| s.n).collect();
        assert_eq!(ns, [8, 9]);

        let take_then_filter = MemoryQuery::new(&items).push_take(3).push_filter(above(5));
        assert_eq!(take_then_filter.count(), 0);
    }

    #[test]
    fn query_is_reusable() {
        let items = slots();
        let query = MemoryQuery::new(&items).push_filter(above(6)).push_take(2);
        let first: Vec<i32> = query.iter().map(|s| s.n).collect();
        let second: Vec<i32> = query.to_vec().into_iter().map(|s| s.n).collect();
        assert_eq!(first, [7, 8]);
        assert_eq!(first, second);
    }

    #[test]
    fn display_lists_stages() {
        let items = slots();
        let query = MemoryQuery::new(&items).push_skip(3).push_take(1);
        assert_eq!(query.to_string(), "memory[10] | skip(3) | take(1)");
    }
}
