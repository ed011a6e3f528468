//! Ordex Core - run-time field-path ordering and range filtering.
//!
//! Records describe their fields through [`Entity`] and [`Fields`]; a dotted
//! path such as `"Person.Name"` is resolved against that metadata and used as
//! a sort key, either immediately ([`order_by`]) or lazily through
//! [`Query`], where any number of refinement keys can follow the primary one.
//!
//! ```
//! use ordex_core::{Entity, EntityDef, Field, FieldDef, Fields, Query, ScalarType};
//!
//! struct Car {
//!     make: &'static str,
//!     year: i32,
//! }
//!
//! impl Fields for Car {
//!     fn field(&self, name: &str) -> Option<Field<'_>> {
//!         match name {
//!             "Make" => Some(Field::value(self.make)),
//!             "Year" => Some(Field::value(self.year)),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! impl Entity for Car {
//!     fn entity_def() -> EntityDef {
//!         EntityDef::new("Car")
//!             .with_field(FieldDef::scalar("Make", ScalarType::String))
//!             .with_field(FieldDef::scalar("Year", ScalarType::Int32))
//!     }
//! }
//!
//! let cars = vec![
//!     Car { make: "FakeMake2", year: 2017 },
//!     Car { make: "FakeMake1", year: 2018 },
//!     Car { make: "FakeMake1", year: 2017 },
//! ];
//!
//! let sorted = Query::new(cars).order_by("Make").then_by("Year").collect()?;
//! assert_eq!(sorted[0].make, "FakeMake1");
//! assert_eq!(sorted[0].year, 2017);
//! # Ok::<(), ordex_core::Error>(())
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod order;
pub mod record;
pub mod value;

pub use catalog::{EntityDef, EntityRef, FieldDef, FieldType, ScalarType};
pub use config::{NullOrdering, OrderingConfig};
pub use error::{Error, Result};
pub use filter::{between, Between, BetweenExt};
pub use order::{
    order_by, order_by_descending, order_by_entity, order_by_key, sort_by_path, FieldPath, Key,
    KeyKind, KeySelector, OrderSpec, OrderedQuery, Orderer, PathResolver, Query, SortDirection,
};
pub use record::{Entity, Field, Fields};
pub use value::Value;
