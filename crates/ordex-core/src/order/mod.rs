//! Ordering engine.
//!
//! A dotted path string is resolved against entity metadata into a
//! [`FieldPath`], turned into a [`KeySelector`], and fed to a [`Pipeline`]
//! that performs one stable multi-key sort. The eager functions sort
//! materialized collections right away; [`Query`] defers all of it until
//! enumeration.

mod direction;
mod eager;
mod key;
mod path;
mod pipeline;
mod query;
mod selector;

pub use direction::{OrderSpec, SortDirection};
pub use eager::{
    order_by, order_by_descending, order_by_entity, order_by_key, sort_by_path, Orderer,
};
pub use key::{compare_values, Key, KeyKind};
pub use path::{FieldPath, PathResolver};
pub use pipeline::{Pipeline, SortKey};
pub use query::{OrderedQuery, Query};
pub use selector::KeySelector;
