//! Property tests for ordering and range filtering laws.

use std::cmp::Ordering;

use ordex_core::{
    between, order_by, order_by_entity, Entity, EntityDef, Field, FieldDef, Fields, Query,
    ScalarType, SortDirection,
};
use proptest::prelude::*;
use serde_json::{json, Value as Json};

#[derive(Debug, Clone, PartialEq)]
struct Row {
    id: usize,
    group: u8,
    score: Option<i32>,
    label: String,
}

impl Fields for Row {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        match name {
            "group" => Some(Field::value(self.group)),
            "score" => Some(Field::value(self.score)),
            "label" => Some(Field::value(self.label.as_str())),
            _ => None,
        }
    }
}

impl Entity for Row {
    fn entity_def() -> EntityDef {
        EntityDef::new("Row")
            .with_field(FieldDef::scalar("group", ScalarType::Int32))
            .with_field(FieldDef::optional_scalar("score", ScalarType::Int32))
            .with_field(FieldDef::scalar("label", ScalarType::String))
    }
}

fn rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec((0u8..4, prop::option::of(-5i32..5), "[a-c]{0,2}"), 0..40).prop_map(
        |raw| {
            raw.into_iter()
                .enumerate()
                .map(|(id, (group, score, label))| Row {
                    id,
                    group,
                    score,
                    label,
                })
                .collect()
        },
    )
}

/// `Option` already orders `None` first.
fn score_cmp(a: &Row, b: &Row) -> Ordering {
    a.score.cmp(&b.score)
}

const TWO_53: i64 = 9_007_199_254_740_992;

/// A JSON number paired with four times its exact value.
fn mixed_number() -> impl Strategy<Value = (i128, Json)> {
    prop_oneof![
        (TWO_53 - 64..TWO_53 + 64).prop_map(|i| (i as i128 * 4, json!(i))),
        (TWO_53 - 64..TWO_53 + 64).prop_map(|i| {
            let f = i as f64;
            ((f * 4.0) as i128, json!(f))
        }),
        (-64i64..64).prop_map(|i| (i as i128 * 4, json!(i))),
        (-256i64..256).prop_map(|q| (q as i128, json!(q as f64 / 4.0))),
    ]
}

proptest! {
    #[test]
    fn ascending_output_is_non_decreasing(input in rows()) {
        let sorted = order_by(input, "score", SortDirection::Asc).unwrap();
        for pair in sorted.windows(2) {
            prop_assert_ne!(score_cmp(&pair[0], &pair[1]), Ordering::Greater);
        }
    }

    #[test]
    fn ascending_matches_std_stable_sort(input in rows()) {
        let mut expected = input.clone();
        expected.sort_by(score_cmp);
        let sorted = order_by(input, "score", SortDirection::Asc).unwrap();
        prop_assert_eq!(sorted, expected);
    }

    #[test]
    fn descending_is_stable_reverse(input in rows()) {
        let mut expected = input.clone();
        expected.sort_by(|a, b| score_cmp(b, a));
        let sorted = order_by(input, "score", SortDirection::Desc).unwrap();
        prop_assert_eq!(sorted, expected);
    }

    #[test]
    fn descending_reverses_distinct_keys(input in rows()) {
        let distinct: Vec<Row> = input
            .into_iter()
            .map(|mut r| {
                r.score = Some(r.id as i32);
                r
            })
            .collect();
        let mut ascending = order_by(distinct.clone(), "score", SortDirection::Asc).unwrap();
        let descending = order_by(distinct, "score", SortDirection::Desc).unwrap();
        ascending.reverse();
        prop_assert_eq!(descending, ascending);
    }

    #[test]
    fn then_by_is_lexicographic(input in rows()) {
        let mut expected = input.clone();
        expected.sort_by(|a, b| a.group.cmp(&b.group).then_with(|| b.label.cmp(&a.label)));

        let sorted = Query::new(input)
            .order_by("group")
            .then_by_descending("label")
            .collect()
            .unwrap();
        prop_assert_eq!(sorted, expected);
    }

    #[test]
    fn between_is_exact_subset(input in rows(), low in 0u8..4, high in 0u8..4) {
        let expected: Vec<Row> = input
            .iter()
            .filter(|r| low <= r.group && r.group <= high)
            .cloned()
            .collect();
        let kept = between(input, |r| r.group, low, high);
        if low > high {
            prop_assert!(kept.is_empty());
        }
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn between_full_domain_keeps_all(input in rows()) {
        let kept = between(input.clone(), |r| r.group, u8::MIN, u8::MAX);
        prop_assert_eq!(kept, input);
    }

    #[test]
    fn mixed_integer_and_float_keys_sort_exactly(
        input in prop::collection::vec(mixed_number(), 0..60)
    ) {
        let docs: Vec<Json> = input
            .iter()
            .enumerate()
            .map(|(id, (_, n))| json!({ "id": id, "n": n }))
            .collect();
        let mut expected: Vec<usize> = (0..input.len()).collect();
        expected.sort_by_key(|&i| input[i].0);

        let def = EntityDef::new("Mixed").with_field(FieldDef::scalar("n", ScalarType::Float64));
        let sorted = order_by_entity(&def, docs, "n", SortDirection::Asc).unwrap();
        let ids: Vec<usize> = sorted
            .iter()
            .map(|doc| doc["id"].as_u64().unwrap() as usize)
            .collect();
        prop_assert_eq!(ids, expected);
    }
}
