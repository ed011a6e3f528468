//! Inclusive range filtering with a typed key accessor.

use std::fmt;
use std::iter::FusedIterator;

/// Keep the elements whose key lies in `low..=high`.
///
/// Input order is preserved. When `low > high` nothing matches; this is not
/// treated as an error.
pub fn between<T, I, F, K>(items: I, accessor: F, low: K, high: K) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> K,
    K: PartialOrd,
{
    items.into_iter().between(accessor, low, high).collect()
}

/// Iterator adapter yielding elements whose key lies in `low..=high`.
///
/// Created by [`BetweenExt::between`]. Nothing is read from the underlying
/// iterator until the adapter is advanced.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Between<I, F, K> {
    iter: I,
    accessor: F,
    low: K,
    high: K,
}

impl<I, F, K> Between<I, F, K> {
    pub(crate) fn new(iter: I, accessor: F, low: K, high: K) -> Self {
        Self {
            iter,
            accessor,
            low,
            high,
        }
    }
}

impl<I, F, K> Iterator for Between<I, F, K>
where
    I: Iterator,
    F: Fn(&I::Item) -> K,
    K: PartialOrd,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let Self {
            iter,
            accessor,
            low,
            high,
        } = self;
        iter.find(|item| {
            let key = accessor(item);
            *low <= key && key <= *high
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

impl<I, F, K> FusedIterator for Between<I, F, K>
where
    I: FusedIterator,
    F: Fn(&I::Item) -> K,
    K: PartialOrd,
{
}

impl<I: fmt::Debug, F, K: fmt::Debug> fmt::Debug for Between<I, F, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Between")
            .field("iter", &self.iter)
            .field("low", &self.low)
            .field("high", &self.high)
            .finish_non_exhaustive()
    }
}

/// Adds [`between`](BetweenExt::between) to every iterator.
pub trait BetweenExt: Iterator + Sized {
    /// Lazily keep the elements whose key lies in `low..=high`.
    fn between<F, K>(self, accessor: F, low: K, high: K) -> Between<Self, F, K>
    where
        F: Fn(&Self::Item) -> K,
        K: PartialOrd,
    {
        Between::new(self, accessor, low, high)
    }
}

impl<I: Iterator> BetweenExt for I {}
