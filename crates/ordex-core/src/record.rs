//! Run-time access to record fields.
//!
//! Rust has no reflection, so a record type describes itself in two halves:
//! [`Entity::entity_def`] supplies static field metadata used to resolve a
//! path, and [`Fields::field`] reads a named field from an instance.

use std::rc::Rc;
use std::sync::Arc;

use crate::catalog::EntityDef;
use crate::value::Value;

/// A field read from a record instance.
#[derive(Clone)]
pub enum Field<'a> {
    /// The field is absent (an unset optional value or nested record).
    Null,
    /// A scalar value.
    Value(Value),
    /// A nested record that a path may continue through.
    Record(&'a dyn Fields),
    /// A collection with the given number of elements.
    Collection(usize),
}

impl<'a> Field<'a> {
    /// Wrap a scalar value.
    pub fn value(value: impl Into<Value>) -> Self {
        match value.into() {
            Value::Null => Field::Null,
            v => Field::Value(v),
        }
    }

    /// Wrap a nested record.
    pub fn record<R: Fields>(record: &'a R) -> Self {
        Field::Record(record)
    }

    /// Wrap an optional nested record.
    pub fn optional_record<R: Fields>(record: Option<&'a R>) -> Self {
        match record {
            Some(r) => Field::Record(r),
            None => Field::Null,
        }
    }

    /// Describe a collection by its length.
    pub fn collection<C: ?Sized>(items: &C) -> Self
    where
        for<'c> &'c C: IntoIterator,
    {
        Field::Collection(items.into_iter().count())
    }
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Null => write!(f, "Null"),
            Field::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Field::Record(_) => write!(f, "Record(..)"),
            Field::Collection(n) => f.debug_tuple("Collection").field(n).finish(),
        }
    }
}

/// Dynamic read access to the fields of a record instance.
pub trait Fields {
    /// Read the field called `name`.
    ///
    /// Returns `None` when the instance has no such field; ordering treats
    /// that the same as [`Field::Null`].
    fn field(&self, name: &str) -> Option<Field<'_>>;
}

/// A record type with static field metadata.
pub trait Entity: Fields {
    /// Describe this type's fields.
    fn entity_def() -> EntityDef;
}

impl<T: Fields + ?Sized> Fields for &T {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        (**self).field(name)
    }
}

impl<T: Fields + ?Sized> Fields for Box<T> {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        (**self).field(name)
    }
}

impl<T: Fields + ?Sized> Fields for Arc<T> {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        (**self).field(name)
    }
}

impl<T: Fields + ?Sized> Fields for Rc<T> {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        (**self).field(name)
    }
}

impl<T: Entity> Entity for &T {
    fn entity_def() -> EntityDef {
        T::entity_def()
    }
}

impl<T: Entity> Entity for Box<T> {
    fn entity_def() -> EntityDef {
        T::entity_def()
    }
}

impl<T: Entity> Entity for Arc<T> {
    fn entity_def() -> EntityDef {
        T::entity_def()
    }
}

impl<T: Entity> Entity for Rc<T> {
    fn entity_def() -> EntityDef {
        T::entity_def()
    }
}

/// JSON documents expose their object members as fields.
///
/// Integers that fit in `i64` read as `Int64`, other numbers as `Float64`.
/// Non-object documents have no fields.
impl Fields for serde_json::Value {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        use serde_json::Value as Json;

        let member = self.as_object()?.get(name)?;
        Some(match member {
            Json::Null => Field::Null,
            Json::Bool(b) => Field::Value(Value::Bool(*b)),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Field::Value(Value::Int64(i)),
                None => Field::Value(Value::Float64(n.as_f64().unwrap_or(f64::NAN))),
            },
            Json::String(s) => Field::Value(Value::String(s.clone())),
            Json::Array(items) => Field::Collection(items.len()),
            Json::Object(_) => Field::Record(member),
        })
    }
}
