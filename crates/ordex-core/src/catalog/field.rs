//! Field definitions for entities.

use super::entity::EntityRef;
use super::types::{FieldType, ScalarType};

/// A field definition within an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Field data type.
    pub field_type: FieldType,
}

impl FieldDef {
    /// Create a new field.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }

    /// Create a required scalar field.
    pub fn scalar(name: impl Into<String>, scalar: ScalarType) -> Self {
        Self::new(name, FieldType::Scalar(scalar))
    }

    /// Create an optional scalar field.
    pub fn optional_scalar(name: impl Into<String>, scalar: ScalarType) -> Self {
        Self::new(name, FieldType::OptionalScalar(scalar))
    }

    /// Create an embedded entity field.
    pub fn embedded(name: impl Into<String>, entity: impl Into<EntityRef>) -> Self {
        Self::new(name, FieldType::Embedded(entity.into()))
    }

    /// Create an optional embedded entity field.
    pub fn optional_embedded(name: impl Into<String>, entity: impl Into<EntityRef>) -> Self {
        Self::new(name, FieldType::OptionalEmbedded(entity.into()))
    }

    /// Check if this field may be absent on an instance.
    pub fn is_nullable(&self) -> bool {
        self.field_type.is_nullable()
    }
}
