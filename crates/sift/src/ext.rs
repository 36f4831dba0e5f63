//! Iterator adapters for descriptor filtering and paging.

use std::borrow::Borrow;
use std::iter::{Skip, Take};

use crate::compose::Composer;
use crate::descriptor::FilterDescriptor;
use crate::error::Result;
use crate::page::PageRequest;
use crate::predicate::Predicate;

/// Adds descriptor filtering and paging to every iterator.
///
/// Works over owned items and references alike:
///
/// ```
/// use sift::{Field, SiftIterExt};
///
/// struct Track {
///     title: String,
///     seconds: u32,
/// }
///
/// const SECONDS: Field<Track, u32> = Field::new("seconds", |t| &t.seconds);
///
/// let tracks: Vec<Track> = (1..=9)
///     .map(|n| Track { title: format!("track {n}"), seconds: n * 60 })
///     .collect();
///
/// let titles: Vec<&str> = tracks
///     .iter()
///     .filter_by(&[SECONDS.gt(120)])
///     .unwrap()
///     .paginate(2, 3)
///     .unwrap()
///     .map(|t| t.title.as_str())
///     .collect();
/// assert_eq!(titles, ["track 6", "track 7", "track 8"]);
/// ```
pub trait SiftIterExt: Iterator + Sized {
    /// Keeps items matching `descriptors`, composed with default options.
    fn filter_by<T>(self, descriptors: &[FilterDescriptor<T>]) -> Result<Filtered<Self, T>>
    where
        Self::Item: Borrow<T>,
    {
        self.filter_by_with(&Composer::new(), descriptors)
    }

    /// Keeps items matching `descriptors`, composed by `composer`.
    fn filter_by_with<T>(
        self,
        composer: &Composer,
        descriptors: &[FilterDescriptor<T>],
    ) -> Result<Filtered<Self, T>>
    where
        Self::Item: Borrow<T>,
    {
        let predicate = composer.compose(descriptors)?;
        Ok(self.filter_with(predicate))
    }

    /// Keeps items matching an already built predicate.
    fn filter_with<T>(self, predicate: Predicate<T>) -> Filtered<Self, T>
    where
        Self::Item: Borrow<T>,
    {
        Filtered {
            iter: self,
            predicate,
        }
    }

    /// Yields page `index` of `size` items, numbered from 1.
    fn paginate(self, index: i64, size: i64) -> Result<Take<Skip<Self>>> {
        self.paginate_from(index, size, crate::page::DEFAULT_START_INDEX)
    }

    /// Yields page `index` of `size` items, numbered from `start_index`.
    fn paginate_from(self, index: i64, size: i64, start_index: i64) -> Result<Take<Skip<Self>>> {
        let window = PageRequest::new(index, size)
            .starting_at(start_index)
            .window()?;
        Ok(window.apply(self))
    }
}

impl<I: Iterator> SiftIterExt for I {}

/// Iterator returned by [`SiftIterExt::filter_by`].
pub struct Filtered<I, T> {
    iter: I,
    predicate: Predicate<T>,
}

impl<I, T> Filtered<I, T> {
    /// The predicate items are tested against.
    pub fn predicate(&self) -> &Predicate<T> {
        &self.predicate
    }
}

impl<I, T> Iterator for Filtered<I, T>
where
    I: Iterator,
    I::Item: Borrow<T>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let predicate = &self.predicate;
        self.iter.find(|item| predicate.matches(item.borrow()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}
