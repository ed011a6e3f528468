//! Record metadata.
//!
//! The catalog describes entities and their fields so that field paths can be
//! validated before any record is read.

mod entity;
mod field;
mod infer;
mod types;

pub use entity::{EntityDef, EntityRef};
pub use field::FieldDef;
pub use types::{FieldType, ScalarType};
