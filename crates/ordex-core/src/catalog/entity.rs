//! Entity definitions.

use std::fmt;
use std::sync::Arc;

use super::field::FieldDef;
use crate::record::Entity;

/// Field metadata for one record type.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDef {
    /// Entity name, used in error messages.
    pub name: String,
    /// Field definitions.
    pub fields: Vec<FieldDef>,
}

impl EntityDef {
    /// Create a new entity definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field to the entity.
    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Add multiple fields.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldDef>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Get a field by name. Matching is exact and case-sensitive.
    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of all fields, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

/// Reference to the definition of an embedded entity.
///
/// Static references are evaluated on demand, so self-referential or mutually
/// recursive record types can describe each other.
#[derive(Clone)]
pub enum EntityRef {
    /// Definition produced by a function, usually `Entity::entity_def`.
    Static(fn() -> EntityDef),
    /// Definition built at run time, e.g. inferred from JSON.
    Inline(Arc<EntityDef>),
}

impl EntityRef {
    /// Reference the definition of a Rust record type.
    pub fn of<T: Entity>() -> Self {
        EntityRef::Static(T::entity_def)
    }

    /// Materialize the referenced definition.
    pub fn load(&self) -> Arc<EntityDef> {
        match self {
            EntityRef::Static(f) => Arc::new(f()),
            EntityRef::Inline(def) => Arc::clone(def),
        }
    }

    /// Name of the referenced entity.
    pub fn name(&self) -> String {
        match self {
            EntityRef::Static(f) => f().name,
            EntityRef::Inline(def) => def.name.clone(),
        }
    }
}

impl fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Static(_) => write!(f, "EntityRef::Static({})", self.name()),
            EntityRef::Inline(def) => f.debug_tuple("EntityRef::Inline").field(def).finish(),
        }
    }
}

// Static references compare by name: evaluating both sides could recurse
// forever on cyclic types.
impl PartialEq for EntityRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (EntityRef::Inline(a), EntityRef::Inline(b)) => a == b,
            _ => self.name() == other.name(),
        }
    }
}

impl From<fn() -> EntityDef> for EntityRef {
    fn from(f: fn() -> EntityDef) -> Self {
        EntityRef::Static(f)
    }
}

impl From<EntityDef> for EntityRef {
    fn from(def: EntityDef) -> Self {
        EntityRef::Inline(Arc::new(def))
    }
}

impl From<Arc<EntityDef>> for EntityRef {
    fn from(def: Arc<EntityDef>) -> Self {
        EntityRef::Inline(def)
    }
}
