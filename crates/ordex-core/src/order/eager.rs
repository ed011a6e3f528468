//! Immediate, single-key ordering by field path.

use super::direction::SortDirection;
use super::path::PathResolver;
use super::pipeline::{Pipeline, SortKey};
use super::selector::KeySelector;
use crate::catalog::EntityDef;
use crate::config::OrderingConfig;
use crate::error::Result;
use crate::record::{Entity, Fields};

/// Orders materialized collections by a run-time field path.
///
/// The path is resolved before any element is touched, so an unknown field
/// fails even for empty input.
#[derive(Debug, Clone, Default)]
pub struct Orderer {
    config: OrderingConfig,
}

impl Orderer {
    /// Create an orderer with the given configuration.
    pub fn new(config: OrderingConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &OrderingConfig {
        &self.config
    }

    /// Collect `items` into a new vector ordered by `path`.
    pub fn order_by<T, I>(&self, items: I, path: &str, direction: SortDirection) -> Result<Vec<T>>
    where
        T: Entity,
        I: IntoIterator<Item = T>,
    {
        self.order_by_entity(&T::entity_def(), items, path, direction)
    }

    /// Like [`Orderer::order_by`] for records described at run time.
    pub fn order_by_entity<T, I>(
        &self,
        entity: &EntityDef,
        items: I,
        path: &str,
        direction: SortDirection,
    ) -> Result<Vec<T>>
    where
        T: Fields,
        I: IntoIterator<Item = T>,
    {
        let pipeline = self.pipeline(entity, path, direction)?;
        pipeline.sort(items.into_iter().collect())
    }

    /// Collect `items` into a new vector ordered by a typed key.
    pub fn order_by_key<T, I, F, K>(
        &self,
        items: I,
        accessor: F,
        direction: SortDirection,
    ) -> Result<Vec<T>>
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> K,
        K: Ord,
    {
        Pipeline::new(self.config.null_ordering)
            .then(SortKey::natural(accessor, direction))
            .sort(items.into_iter().collect())
    }

    /// Sort a slice in place by `path`.
    pub fn sort_by_path<T: Entity>(
        &self,
        items: &mut [T],
        path: &str,
        direction: SortDirection,
    ) -> Result<()> {
        let pipeline = self.pipeline(&T::entity_def(), path, direction)?;
        pipeline.sort_slice(items)
    }

    fn pipeline<'a, T: Fields + 'a>(
        &self,
        entity: &EntityDef,
        path: &str,
        direction: SortDirection,
    ) -> Result<Pipeline<'a, T>> {
        let resolved = PathResolver::with_config(&self.config).resolve(entity, path)?;
        let selector = KeySelector::build(resolved);
        Ok(Pipeline::new(self.config.null_ordering).then(SortKey::path(selector, direction)))
    }
}

/// Collect `items` into a new vector ordered by `path`.
///
/// `direction` accepts a [`SortDirection`] or a keyword such as `"DESC"`.
pub fn order_by<T, I>(items: I, path: &str, direction: impl Into<SortDirection>) -> Result<Vec<T>>
where
    T: Entity,
    I: IntoIterator<Item = T>,
{
    Orderer::default().order_by(items, path, direction.into())
}

/// Collect `items` into a new vector ordered by `path`, largest first.
pub fn order_by_descending<T, I>(items: I, path: &str) -> Result<Vec<T>>
where
    T: Entity,
    I: IntoIterator<Item = T>,
{
    Orderer::default().order_by(items, path, SortDirection::Desc)
}

/// Collect `items` into a new vector ordered by the natural order of a typed key.
pub fn order_by_key<T, I, F, K>(
    items: I,
    accessor: F,
    direction: impl Into<SortDirection>,
) -> Result<Vec<T>>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> K,
    K: Ord,
{
    Orderer::default().order_by_key(items, accessor, direction.into())
}

/// Sort a slice in place by `path`.
pub fn sort_by_path<T: Entity>(
    items: &mut [T],
    path: &str,
    direction: impl Into<SortDirection>,
) -> Result<()> {
    Orderer::default().sort_by_path(items, path, direction.into())
}

/// Order records described by `entity` rather than by [`Entity`].
pub fn order_by_entity<T, I>(
    entity: &EntityDef,
    items: I,
    path: &str,
    direction: impl Into<SortDirection>,
) -> Result<Vec<T>>
where
    T: Fields,
    I: IntoIterator<Item = T>,
{
    Orderer::default().order_by_entity(entity, items, path, direction.into())
}
