//! Core type definitions for the catalog.

use super::entity::EntityRef;

/// Scalar data types a field can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarType {
    /// Boolean value.
    Bool,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
    /// Fixed-precision decimal.
    Decimal,
    /// UTF-8 string.
    String,
    /// Binary data.
    Bytes,
    /// Timestamp (microseconds since Unix epoch).
    Timestamp,
    /// Calendar date.
    Date,
    /// UUID (128-bit identifier).
    Uuid,
    /// A value the catalog can name but not order (maps, handles, closures).
    Opaque {
        /// Name of the underlying type.
        name: String,
    },
}

/// Field types.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// A scalar value.
    Scalar(ScalarType),
    /// An optional scalar value (nullable).
    OptionalScalar(ScalarType),
    /// An array of scalar values.
    ArrayScalar(ScalarType),
    /// An embedded entity (nested object).
    Embedded(EntityRef),
    /// An optional embedded entity.
    OptionalEmbedded(EntityRef),
    /// An array of embedded entities.
    ArrayEmbedded(EntityRef),
}

impl ScalarType {
    /// Check if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ScalarType::Int32
                | ScalarType::Int64
                | ScalarType::Float32
                | ScalarType::Float64
                | ScalarType::Decimal
        )
    }

    /// Check if this type is a point in time.
    pub fn is_temporal(&self) -> bool {
        matches!(self, ScalarType::Timestamp | ScalarType::Date)
    }

    /// Human-readable type name.
    pub fn type_name(&self) -> String {
        match self {
            ScalarType::Bool => "Bool".into(),
            ScalarType::Int32 => "Int32".into(),
            ScalarType::Int64 => "Int64".into(),
            ScalarType::Float32 => "Float32".into(),
            ScalarType::Float64 => "Float64".into(),
            ScalarType::Decimal => "Decimal".into(),
            ScalarType::String => "String".into(),
            ScalarType::Bytes => "Bytes".into(),
            ScalarType::Timestamp => "Timestamp".into(),
            ScalarType::Date => "Date".into(),
            ScalarType::Uuid => "Uuid".into(),
            ScalarType::Opaque { name } => name.clone(),
        }
    }
}

impl FieldType {
    /// Create a scalar field type.
    pub fn scalar(scalar: ScalarType) -> Self {
        FieldType::Scalar(scalar)
    }

    /// Create an optional scalar field type.
    pub fn optional_scalar(scalar: ScalarType) -> Self {
        FieldType::OptionalScalar(scalar)
    }

    /// Create an array of scalars field type.
    pub fn array_scalar(scalar: ScalarType) -> Self {
        FieldType::ArrayScalar(scalar)
    }

    /// Create an embedded entity field type.
    pub fn embedded(entity: impl Into<EntityRef>) -> Self {
        FieldType::Embedded(entity.into())
    }

    /// Create an optional embedded entity field type.
    pub fn optional_embedded(entity: impl Into<EntityRef>) -> Self {
        FieldType::OptionalEmbedded(entity.into())
    }

    /// Create an array of embedded entities field type.
    pub fn array_embedded(entity: impl Into<EntityRef>) -> Self {
        FieldType::ArrayEmbedded(entity.into())
    }

    /// Check if this type is nullable.
    pub fn is_nullable(&self) -> bool {
        matches!(
            self,
            FieldType::OptionalScalar(_) | FieldType::OptionalEmbedded(_)
        )
    }

    /// Check if this type is an array.
    pub fn is_array(&self) -> bool {
        matches!(
            self,
            FieldType::ArrayScalar(_) | FieldType::ArrayEmbedded(_)
        )
    }

    /// Get the embedded entity if a path can continue through this field.
    ///
    /// Arrays are never traversed: a path through a collection would yield
    /// many keys per record.
    pub fn embedded_entity(&self) -> Option<&EntityRef> {
        match self {
            FieldType::Embedded(e) | FieldType::OptionalEmbedded(e) => Some(e),
            _ => None,
        }
    }

    /// Human-readable type name, used in error messages.
    pub fn type_name(&self) -> String {
        match self {
            FieldType::Scalar(s) => s.type_name(),
            FieldType::OptionalScalar(s) => format!("Option<{}>", s.type_name()),
            FieldType::ArrayScalar(s) => format!("[{}]", s.type_name()),
            FieldType::Embedded(e) => e.name().to_string(),
            FieldType::OptionalEmbedded(e) => format!("Option<{}>", e.name()),
            FieldType::ArrayEmbedded(e) => format!("[{}]", e.name()),
        }
    }
}
