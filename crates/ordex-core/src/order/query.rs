//! Deferred, composable ordering.
//!
//! A [`Query`] wraps a lazy source. Ordering calls only record keys; paths are
//! resolved, elements read and keys compared when the result is enumerated.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::direction::{OrderSpec, SortDirection};
use super::path::PathResolver;
use super::pipeline::{Pipeline, SortKey};
use super::selector::KeySelector;
use crate::catalog::{EntityDef, EntityRef};
use crate::config::OrderingConfig;
use crate::error::{Error, Result};
use crate::filter::Between;
use crate::record::{Entity, Fields};

/// A lazy source of records.
pub struct Query<I> {
    source: I,
    entity: Option<EntityRef>,
    config: OrderingConfig,
}

impl<I: Iterator> Query<I> {
    /// Wrap a source of [`Entity`] records.
    pub fn new<S>(source: S) -> Self
    where
        S: IntoIterator<IntoIter = I>,
        I::Item: Entity,
    {
        Self::build(source.into_iter(), Some(EntityRef::of::<I::Item>()))
    }

    /// Wrap a source whose records are described by `entity`.
    pub fn with_entity<S>(source: S, entity: impl Into<EntityRef>) -> Self
    where
        S: IntoIterator<IntoIter = I>,
    {
        Self::build(source.into_iter(), Some(entity.into()))
    }

    /// Wrap a source without field metadata.
    ///
    /// Only typed keys can be used; path keys fail with
    /// [`Error::InvalidArgument`] at enumeration.
    pub fn over<S>(source: S) -> Self
    where
        S: IntoIterator<IntoIter = I>,
    {
        Self::build(source.into_iter(), None)
    }

    fn build(source: I, entity: Option<EntityRef>) -> Self {
        Self {
            source,
            entity,
            config: OrderingConfig::default(),
        }
    }

    /// Replace the ordering configuration.
    pub fn with_config(mut self, config: OrderingConfig) -> Self {
        self.config = config;
        self
    }

    /// Keep only records whose key lies in `low..=high`.
    pub fn between<F, K>(self, accessor: F, low: K, high: K) -> Query<Between<I, F, K>>
    where
        F: Fn(&I::Item) -> K,
        K: PartialOrd,
    {
        Query {
            source: Between::new(self.source, accessor, low, high),
            entity: self.entity,
            config: self.config,
        }
    }

    /// Order by a field path, ascending.
    pub fn order_by<'a>(self, path: &str) -> OrderedQuery<'a, I>
    where
        I::Item: Fields + 'a,
    {
        self.ordered(PendingKey::path(path, SortDirection::Asc))
    }

    /// Order by a field path, descending.
    pub fn order_by_descending<'a>(self, path: &str) -> OrderedQuery<'a, I>
    where
        I::Item: Fields + 'a,
    {
        self.ordered(PendingKey::path(path, SortDirection::Desc))
    }

    /// Order by a typed key, ascending.
    pub fn order_by_key<'a, F, K>(self, accessor: F) -> OrderedQuery<'a, I>
    where
        I::Item: 'a,
        F: Fn(&I::Item) -> K + 'a,
        K: Ord + 'a,
    {
        self.ordered(PendingKey::Ready(SortKey::natural(accessor, SortDirection::Asc)))
    }

    /// Order by a typed key, descending.
    pub fn order_by_key_descending<'a, F, K>(self, accessor: F) -> OrderedQuery<'a, I>
    where
        I::Item: 'a,
        F: Fn(&I::Item) -> K + 'a,
        K: Ord + 'a,
    {
        self.ordered(PendingKey::Ready(SortKey::natural(accessor, SortDirection::Desc)))
    }

    /// Order by a list of specs; the first is the primary key.
    pub fn order_by_specs<'a>(self, specs: &[OrderSpec]) -> Result<OrderedQuery<'a, I>>
    where
        I::Item: Fields + 'a,
    {
        let (first, rest) = specs
            .split_first()
            .ok_or_else(|| Error::invalid("at least one order spec is required"))?;

        let ordered = self.ordered(PendingKey::path(&first.path, first.direction));
        Ok(rest.iter().fold(ordered, |query, spec| {
            query.then(PendingKey::path(&spec.path, spec.direction))
        }))
    }

    fn ordered<'a>(self, key: PendingKey<'a, I::Item>) -> OrderedQuery<'a, I> {
        OrderedQuery {
            source: self.source,
            entity: self.entity,
            config: self.config,
            keys: vec![key],
        }
    }
}

impl<I: Iterator> IntoIterator for Query<I> {
    type Item = I::Item;
    type IntoIter = I;

    fn into_iter(self) -> I {
        self.source
    }
}

impl<I> fmt::Debug for Query<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("entity", &self.entity)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// A sort key whose path has not been resolved yet.
enum PendingKey<'a, T> {
    Path {
        path: String,
        direction: SortDirection,
        build: fn(KeySelector, SortDirection) -> SortKey<'a, T>,
    },
    Ready(SortKey<'a, T>),
}

impl<'a, T: Fields + 'a> PendingKey<'a, T> {
    fn path(path: &str, direction: SortDirection) -> Self {
        PendingKey::Path {
            path: path.to_string(),
            direction,
            build: SortKey::path,
        }
    }
}

/// A lazy source with one or more sort keys.
///
/// Refinement keys added with the `then_by` family break ties left by all
/// earlier keys. Nothing happens until [`OrderedQuery::collect`] or
/// [`OrderedQuery::try_into_iter`] is called.
pub struct OrderedQuery<'a, I: Iterator> {
    source: I,
    entity: Option<EntityRef>,
    config: OrderingConfig,
    keys: Vec<PendingKey<'a, I::Item>>,
}

impl<'a, I: Iterator> OrderedQuery<'a, I> {
    /// Refine by a field path, ascending.
    pub fn then_by(self, path: &str) -> Self
    where
        I::Item: Fields + 'a,
    {
        self.then(PendingKey::path(path, SortDirection::Asc))
    }

    /// Refine by a field path, descending.
    pub fn then_by_descending(self, path: &str) -> Self
    where
        I::Item: Fields + 'a,
    {
        self.then(PendingKey::path(path, SortDirection::Desc))
    }

    /// Refine by a typed key, ascending.
    pub fn then_by_key<F, K>(self, accessor: F) -> Self
    where
        I::Item: 'a,
        F: Fn(&I::Item) -> K + 'a,
        K: Ord + 'a,
    {
        self.then(PendingKey::Ready(SortKey::natural(accessor, SortDirection::Asc)))
    }

    /// Refine by a typed key, descending.
    pub fn then_by_key_descending<F, K>(self, accessor: F) -> Self
    where
        I::Item: 'a,
        F: Fn(&I::Item) -> K + 'a,
        K: Ord + 'a,
    {
        self.then(PendingKey::Ready(SortKey::natural(accessor, SortDirection::Desc)))
    }

    /// Number of registered keys.
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    fn then(mut self, key: PendingKey<'a, I::Item>) -> Self {
        self.keys.push(key);
        self
    }

    /// Resolve all keys, read the source and sort it in one stable pass.
    pub fn collect(self) -> Result<Vec<I::Item>> {
        let OrderedQuery {
            source,
            entity,
            config,
            keys,
        } = self;

        let resolver = PathResolver::with_config(&config);
        let mut definition: Option<Arc<EntityDef>> = None;
        let mut pipeline = Pipeline::new(config.null_ordering);

        for key in keys {
            match key {
                PendingKey::Ready(key) => pipeline.push(key),
                PendingKey::Path {
                    path,
                    direction,
                    build,
                } => {
                    let def = match &definition {
                        Some(def) => Arc::clone(def),
                        None => {
                            let def = entity
                                .as_ref()
                                .ok_or_else(|| {
                                    Error::invalid(format!(
                                        "cannot order by '{}': query has no entity definition",
                                        path
                                    ))
                                })?
                                .load();
                            definition = Some(Arc::clone(&def));
                            def
                        }
                    };
                    let selector = KeySelector::build(resolver.resolve(&def, &path)?);
                    pipeline.push(build(selector, direction));
                }
            }
        }

        debug!(keys = pipeline.len(), "Executing ordered query");
        pipeline.sort(source.collect())
    }

    /// Like [`OrderedQuery::collect`], returning an iterator.
    pub fn try_into_iter(self) -> Result<std::vec::IntoIter<I::Item>> {
        self.collect().map(Vec::into_iter)
    }
}

impl<I: Iterator> fmt::Debug for OrderedQuery<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedQuery")
            .field("entity", &self.entity)
            .field("keys", &self.keys.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
