//! Entity definitions inferred from sample JSON documents.

use std::collections::HashMap;

use serde_json::{Map, Value as Json};

use super::entity::EntityDef;
use super::field::FieldDef;
use super::types::{FieldType, ScalarType};
use crate::error::{Error, Result};

const MIXED: &str = "Mixed";
const JSON_ARRAY: &str = "JsonArray";

/// What was seen for one member across all sampled documents.
#[derive(Default)]
struct Observed<'a> {
    present: usize,
    bools: bool,
    ints: bool,
    floats: bool,
    strings: bool,
    arrays: bool,
    objects: Vec<&'a Map<String, Json>>,
}

impl Observed<'_> {
    fn kinds(&self) -> usize {
        let numbers = self.ints || self.floats;
        [
            self.bools,
            numbers,
            self.strings,
            self.arrays,
            !self.objects.is_empty(),
        ]
        .iter()
        .filter(|seen| **seen)
        .count()
    }
}

impl EntityDef {
    /// Infer an entity definition from sample JSON documents.
    ///
    /// Every document must be a JSON object. A member missing or null in any
    /// document becomes optional. Integers widen to `Float64` when floats are
    /// also seen; members holding several JSON kinds become an opaque type with
    /// no ordering. Nested objects become inline embedded entities named
    /// `parent.member`.
    pub fn infer_from_json(name: impl Into<String>, docs: &[Json]) -> Result<EntityDef> {
        let objects = docs
            .iter()
            .enumerate()
            .map(|(i, doc)| {
                doc.as_object()
                    .ok_or_else(|| Error::invalid(format!("document {} is not a JSON object", i)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(infer_objects(name.into(), &objects))
    }
}

fn infer_objects(name: String, objects: &[&Map<String, Json>]) -> EntityDef {
    let mut order: Vec<&str> = Vec::new();
    let mut observed: HashMap<&str, Observed<'_>> = HashMap::new();

    for object in objects.iter().copied() {
        for (key, value) in object.iter() {
            let entry = observed.entry(key.as_str()).or_insert_with(|| {
                order.push(key.as_str());
                Observed::default()
            });
            match value {
                Json::Null => continue,
                Json::Bool(_) => entry.bools = true,
                Json::Number(n) if n.is_i64() => entry.ints = true,
                Json::Number(_) => entry.floats = true,
                Json::String(_) => entry.strings = true,
                Json::Array(_) => entry.arrays = true,
                Json::Object(inner) => entry.objects.push(inner),
            }
            entry.present += 1;
        }
    }

    let fields = order.into_iter().filter_map(|key| {
        let seen = observed.remove(key)?;
        let optional = seen.present < objects.len();
        Some(FieldDef::new(key, field_type(&name, key, seen, optional)))
    });

    EntityDef::new(name.clone()).with_fields(fields.collect::<Vec<_>>())
}

fn field_type(parent: &str, key: &str, seen: Observed<'_>, optional: bool) -> FieldType {
    let scalar = |scalar: ScalarType| {
        if optional {
            FieldType::OptionalScalar(scalar)
        } else {
            FieldType::Scalar(scalar)
        }
    };

    if seen.kinds() > 1 {
        return scalar(ScalarType::Opaque { name: MIXED.into() });
    }
    if seen.arrays {
        return FieldType::ArrayScalar(ScalarType::Opaque {
            name: JSON_ARRAY.into(),
        });
    }
    if !seen.objects.is_empty() {
        let nested = infer_objects(format!("{}.{}", parent, key), &seen.objects);
        return if optional {
            FieldType::optional_embedded(nested)
        } else {
            FieldType::embedded(nested)
        };
    }

    match (seen.bools, seen.ints, seen.floats, seen.strings) {
        (true, ..) => scalar(ScalarType::Bool),
        (_, _, true, _) => scalar(ScalarType::Float64),
        (_, true, _, _) => scalar(ScalarType::Int64),
        (.., true) => scalar(ScalarType::String),
        // Only nulls were seen.
        _ => FieldType::OptionalScalar(ScalarType::Opaque { name: "Null".into() }),
    }
}
