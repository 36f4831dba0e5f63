//! Page windows over ordered sequences.
//!
//! A page is `skip((index - start_index) * size)` followed by `take(size)`.
//! There is no clamping against the source length: a page past the end is
//! empty. Requests with a non-positive size or an index before the start
//! index are rejected before anything is skipped.

use tracing::debug;

use crate::error::{Result, SiftError};
use crate::queryable::Queryable;

/// The start index used when none is given.
pub const DEFAULT_START_INDEX: i64 = 1;

/// A page request: which page, how large, and where numbering starts.
///
/// # Example
///
/// ```
/// use sift::PageRequest;
///
/// let window = PageRequest::new(3, 20).window().unwrap();
/// assert_eq!((window.skip, window.take), (40, 20));
///
/// let zero_based = PageRequest::new(0, 20).starting_at(0).window().unwrap();
/// assert_eq!(zero_based.skip, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    index: i64,
    size: i64,
    start_index: i64,
}

impl PageRequest {
    /// Requests page `index` of `size` elements, numbered from 1.
    pub fn new(index: i64, size: i64) -> Self {
        PageRequest {
            index,
            size,
            start_index: DEFAULT_START_INDEX,
        }
    }

    /// Sets the index of the first page.
    pub fn starting_at(mut self, start_index: i64) -> Self {
        self.start_index = start_index;
        self
    }

    /// The requested page index.
    pub fn index(&self) -> i64 {
        self.index
    }

    /// The requested page size.
    pub fn size(&self) -> i64 {
        self.size
    }

    /// The index of the first page.
    pub fn start_index(&self) -> i64 {
        self.start_index
    }

    /// Resolves the request into element counts.
    ///
    /// An offset too large for `usize` saturates, which skips everything.
    pub fn window(&self) -> Result<Window> {
        if self.size <= 0 {
            return Err(SiftError::InvalidPageSize { size: self.size });
        }
        if self.index < self.start_index {
            return Err(SiftError::InvalidPageIndex {
                index: self.index,
                start_index: self.start_index,
            });
        }

        // Both factors are non-negative, so i128 holds the product exactly.
        let pages = i128::from(self.index) - i128::from(self.start_index);
        let skip = pages * i128::from(self.size);

        Ok(Window {
            skip: usize::try_from(skip).unwrap_or(usize::MAX),
            take: usize::try_from(self.size).unwrap_or(usize::MAX),
        })
    }
}

/// A resolved page: how many elements to skip, then how many to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub skip: usize,
    pub take: usize,
}

impl Window {
    /// Applies the window to an iterator.
    pub fn apply<I: Iterator>(self, iter: I) -> std::iter::Take<std::iter::Skip<I>> {
        iter.skip(self.skip).take(self.take)
    }

    /// Applies the window to a slice.
    pub fn slice<T>(self, items: &[T]) -> &[T] {
        let start = self.skip.min(items.len());
        let end = start.saturating_add(self.take).min(items.len());
        &items[start..end]
    }
}

/// Returns page `index` of `source`, numbered from 1.
///
/// ```
/// let page: Vec<u8> = sift::page(0..10u8, 4, 3).unwrap().collect();
/// assert_eq!(page, [9]);
/// ```
pub fn page<I>(
    source: I,
    index: i64,
    size: i64,
) -> Result<std::iter::Take<std::iter::Skip<I::IntoIter>>>
where
    I: IntoIterator,
{
    page_with(source, PageRequest::new(index, size))
}

/// Returns the page described by `request`.
pub fn page_with<I>(
    source: I,
    request: PageRequest,
) -> Result<std::iter::Take<std::iter::Skip<I::IntoIter>>>
where
    I: IntoIterator,
{
    let window = request.window()?;
    Ok(window.apply(source.into_iter()))
}

/// Returns the page described by `request` as a subslice.
pub fn page_slice<T>(items: &[T], request: PageRequest) -> Result<&[T]> {
    Ok(request.window()?.slice(items))
}

/// Pushes the page described by `request` down to `source`.
///
/// The request is validated first; an invalid one leaves nothing pushed.
pub fn page_queryable<T, Q>(source: Q, request: PageRequest) -> Result<Q>
where
    Q: Queryable<T>,
{
    let window = request.window()?;
    debug!(
        index = request.index,
        size = request.size,
        skip = window.skip,
        take = window.take,
        "pushing page window"
    );
    Ok(source.push_skip(window.skip).push_take(window.take))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten() -> Vec<i32> {
        (0..10).collect()
    }

    fn collect(index: i64, size: i64) -> Vec<i32> {
        page(ten(), index, size).unwrap().collect()
    }

    #[test]
    fn first_middle_last_and_past_the_end() {
        assert_eq!(collect(1, 3), [0, 1, 2]);
        assert_eq!(collect(2, 3), [3, 4, 5]);
        assert_eq!(collect(4, 3), [9]);
        assert!(collect(5, 3).is_empty());
    }

    #[test]
    fn custom_start_index() {
        let request = PageRequest::new(0, 4).starting_at(0);
        let items: Vec<i32> = page_with(ten(), request).unwrap().collect();
        assert_eq!(items, [0, 1, 2, 3]);

        let request = PageRequest::new(-1, 5).starting_at(-2);
        assert_eq!(page_slice(&ten(), request).unwrap(), &[5, 6, 7, 8, 9]);
    }

    #[test]
    fn rejects_non_positive_size() {
        assert_eq!(
            page(ten(), 1, 0).err(),
            Some(SiftError::InvalidPageSize { size: 0 })
        );
        assert!(matches!(
            PageRequest::new(1, -3).window(),
            Err(SiftError::InvalidPageSize { size: -3 })
        ));
    }

    #[test]
    fn rejects_index_before_start() {
        assert_eq!(
            PageRequest::new(0, 10).window(),
            Err(SiftError::InvalidPageIndex {
                index: 0,
                start_index: 1,
            })
        );
    }

    #[test]
    fn huge_offsets_saturate_to_empty() {
        let request = PageRequest::new(i64::MAX, i64::MAX).starting_at(i64::MIN);
        let window = request.window().unwrap();
        assert_eq!(window.skip, usize::MAX);
        assert!(page_slice(&ten(), request).unwrap().is_empty());
        assert_eq!(page_with(ten(), request).unwrap().count(), 0);
    }

    #[test]
    fn slice_and_iterator_agree() {
        let items = ten();
        for index in 1..=5 {
            let request = PageRequest::new(index, 3);
            let from_iter: Vec<i32> = page_with(items.iter().copied(), request).unwrap().collect();
            assert_eq!(page_slice(&items, request).unwrap(), from_iter.as_slice());
        }
    }
}
