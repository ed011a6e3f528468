//! Stable multi-key sorting.
//!
//! A pipeline is an ordered list of (key extractor, direction) pairs. Running
//! it extracts every key once per element, sorts element indices with a
//! single stable pass comparing keys lexicographically in registration order,
//! and then permutes the elements into place.

use std::cmp::Ordering;
use std::fmt;

use tracing::debug;

use super::direction::SortDirection;
use super::key::{Key, KeyKind};
use super::selector::KeySelector;
use crate::config::NullOrdering;
use crate::error::{Error, Result};
use crate::record::Fields;
use crate::value::Value;

type Extractor<'a, T> = Box<dyn Fn(&T) -> Key + 'a>;
type Ranker<'a, T> = Box<dyn Fn(&[T]) -> Vec<usize> + 'a>;

enum KeySource<'a, T> {
    /// One key per element, compared by a [`KeyKind`].
    Extract(Extractor<'a, T>),
    /// Dense ranks over the whole input, from a key type's own `Ord`.
    Rank(Ranker<'a, T>),
}

/// One registered sort key.
pub struct SortKey<'a, T> {
    source: KeySource<'a, T>,
    kind: KeyKind,
    direction: SortDirection,
}

impl<'a, T: 'a> SortKey<'a, T> {
    /// A key read through a resolved field path.
    pub fn path(selector: KeySelector, direction: SortDirection) -> Self
    where
        T: Fields,
    {
        let kind = selector.kind().clone();
        Self {
            source: KeySource::Extract(Box::new(move |item: &T| selector.extract(item))),
            kind,
            direction,
        }
    }

    /// A key computed as a [`Value`], compared by its run-time class.
    pub fn accessor<F, K>(accessor: F, direction: SortDirection) -> Self
    where
        F: Fn(&T) -> K + 'a,
        K: Into<Value> + 'a,
    {
        Self {
            source: KeySource::Extract(Box::new(move |item: &T| {
                let value: Value = accessor(item).into();
                Key::from(value)
            })),
            kind: KeyKind::Dynamic,
            direction,
        }
    }

    /// A typed key compared by its own [`Ord`] implementation.
    ///
    /// `None` sorts before `Some` as in the standard library; the configured
    /// null placement does not apply.
    pub fn natural<F, K>(accessor: F, direction: SortDirection) -> Self
    where
        F: Fn(&T) -> K + 'a,
        K: Ord + 'a,
    {
        Self {
            source: KeySource::Rank(Box::new(move |items: &[T]| {
                let keys: Vec<K> = items.iter().map(&accessor).collect();
                dense_ranks(&keys)
            })),
            kind: KeyKind::Numeric,
            direction,
        }
    }

    /// Direction of this key.
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    fn column(&self, items: &[T]) -> Vec<Key> {
        match &self.source {
            KeySource::Extract(extract) => items.iter().map(|item| extract(item)).collect(),
            KeySource::Rank(rank) => rank(items)
                .into_iter()
                .map(|r| Key::Scalar(Value::Int64(r as i64)))
                .collect(),
        }
    }
}

/// Rank each key so that equal keys share a rank and ranks follow `Ord`.
fn dense_ranks<K: Ord>(keys: &[K]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| keys[a].cmp(&keys[b]));

    let mut ranks = vec![0; keys.len()];
    let mut rank = 0;
    for (pos, &i) in order.iter().enumerate() {
        if pos > 0 && keys[order[pos - 1]] != keys[i] {
            rank += 1;
        }
        ranks[i] = rank;
    }
    ranks
}

impl<T> fmt::Debug for SortKey<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortKey")
            .field("kind", &self.kind)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

/// An ordered list of sort keys evaluated as one stable sort.
pub struct Pipeline<'a, T> {
    keys: Vec<SortKey<'a, T>>,
    nulls: NullOrdering,
}

impl<'a, T> Pipeline<'a, T> {
    /// Create an empty pipeline.
    pub fn new(nulls: NullOrdering) -> Self {
        Self {
            keys: Vec::new(),
            nulls,
        }
    }

    /// Append a key. Later keys only break ties left by earlier ones.
    pub fn push(&mut self, key: SortKey<'a, T>) {
        self.keys.push(key);
    }

    /// Builder form of [`Pipeline::push`].
    pub fn then(mut self, key: SortKey<'a, T>) -> Self {
        self.push(key);
        self
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if no keys are registered.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Sort a vector, returning it in key order.
    pub fn sort(&self, mut items: Vec<T>) -> Result<Vec<T>> {
        self.sort_slice(&mut items)?;
        Ok(items)
    }

    /// Sort a slice in place.
    ///
    /// Elements whose keys all compare equal keep their relative order. On
    /// error the slice is left untouched.
    pub fn sort_slice(&self, items: &mut [T]) -> Result<()> {
        if self.keys.is_empty() || items.len() < 2 {
            return Ok(());
        }

        debug!(keys = self.keys.len(), rows = items.len(), "Sorting rows");

        let columns: Vec<Vec<Key>> = self.keys.iter().map(|k| k.column(items)).collect();

        let order = self.sorted_order(&columns, items.len())?;
        apply_permutation(items, order);
        Ok(())
    }

    fn sorted_order(&self, columns: &[Vec<Key>], len: usize) -> Result<Vec<usize>> {
        let mut order: Vec<usize> = (0..len).collect();
        let mut failure: Option<Error> = None;

        // `sort_by` is stable.
        order.sort_by(|&a, &b| {
            if failure.is_some() {
                return Ordering::Equal;
            }
            match self.compare_rows(columns, a, b) {
                Ok(ordering) => ordering,
                Err(e) => {
                    failure = Some(e);
                    Ordering::Equal
                }
            }
        });

        match failure {
            Some(e) => Err(e),
            None => Ok(order),
        }
    }

    fn compare_rows(&self, columns: &[Vec<Key>], a: usize, b: usize) -> Result<Ordering> {
        for (key, column) in self.keys.iter().zip(columns) {
            let ordering = key.kind.compare(&column[a], &column[b], self.nulls)?;
            if ordering != Ordering::Equal {
                return Ok(key.direction.apply(ordering));
            }
        }
        Ok(Ordering::Equal)
    }
}

impl<T> fmt::Debug for Pipeline<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("keys", &self.keys)
            .field("nulls", &self.nulls)
            .finish()
    }
}

/// Reorder `items` so that position `k` holds the element previously at
/// `order[k]`.
fn apply_permutation<T>(items: &mut [T], order: Vec<usize>) {
    let mut placed = vec![false; items.len()];
    for start in 0..items.len() {
        if placed[start] {
            continue;
        }
        let mut current = start;
        loop {
            placed[current] = true;
            let source = order[current];
            if source == start {
                break;
            }
            items.swap(current, source);
            current = source;
        }
    }
}
