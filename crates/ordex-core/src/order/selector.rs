//! Key extraction along a resolved field path.

use tracing::trace;

use std::cmp::Ordering;

use super::key::{Key, KeyKind};
use super::path::FieldPath;
use crate::config::NullOrdering;
use crate::error::Result;
use crate::record::{Field, Fields};

/// Reads the value at a resolved path from record instances.
///
/// An absent value anywhere along the path yields [`Key::Null`] rather than
/// an error.
#[derive(Debug, Clone)]
pub struct KeySelector {
    path: FieldPath,
    kind: KeyKind,
}

impl KeySelector {
    /// Build a selector for a resolved path.
    pub fn build(path: FieldPath) -> Self {
        let kind = path.key_kind();
        trace!(path = %path, kind = ?kind, "Built key selector");
        Self { path, kind }
    }

    /// The resolved path.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Comparison strategy for the extracted keys.
    pub fn kind(&self) -> &KeyKind {
        &self.kind
    }

    /// Compare two extracted keys in ascending order, absent keys first.
    pub fn compare(&self, a: &Key, b: &Key) -> Result<Ordering> {
        self.kind.compare(a, b, NullOrdering::First)
    }

    /// Extract the key from one record.
    pub fn extract(&self, record: &dyn Fields) -> Key {
        let mut current = record;
        let (last, walk) = match self.path.segments().split_last() {
            Some(split) => split,
            None => return Key::Null,
        };

        for segment in walk {
            match current.field(segment) {
                Some(Field::Record(next)) => current = next,
                Some(Field::Null) | None => return Key::Null,
                Some(other) => return opaque(&other),
            }
        }

        match current.field(last) {
            Some(Field::Value(value)) => Key::from(value),
            Some(Field::Null) | None => Key::Null,
            Some(other) => opaque(&other),
        }
    }
}

fn opaque(field: &Field<'_>) -> Key {
    match field {
        Field::Record(_) => Key::Opaque("record".into()),
        Field::Collection(n) => Key::Opaque(format!("collection of {}", n)),
        Field::Value(v) => Key::Opaque(v.type_name().into()),
        Field::Null => Key::Null,
    }
}
