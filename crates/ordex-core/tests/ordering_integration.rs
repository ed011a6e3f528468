//! Integration tests for path-driven ordering and range filtering.

use std::sync::Arc;

use ordex_core::{
    between, order_by, order_by_descending, order_by_entity, order_by_key, sort_by_path, Entity,
    EntityDef, EntityRef, Error, Field, FieldDef, Fields, NullOrdering, OrderingConfig, Orderer,
    Query, ScalarType, SortDirection,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use serde_json::json;

#[derive(Debug)]
struct Person {
    name: String,
    nickname: Option<String>,
}

#[derive(Debug, Clone)]
struct Car {
    person: Option<Arc<Person>>,
    make: String,
    model: String,
    year: i32,
    price: Decimal,
}

impl Fields for Person {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        match name {
            "Name" => Some(Field::value(self.name.as_str())),
            "Nickname" => Some(Field::value(self.nickname.as_deref())),
            _ => None,
        }
    }
}

impl Entity for Person {
    fn entity_def() -> EntityDef {
        EntityDef::new("Person")
            .with_field(FieldDef::scalar("Name", ScalarType::String))
            .with_field(FieldDef::optional_scalar("Nickname", ScalarType::String))
    }
}

impl Fields for Car {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        match name {
            "Person" => Some(Field::optional_record(self.person.as_ref())),
            "Make" => Some(Field::value(self.make.as_str())),
            "Model" => Some(Field::value(self.model.as_str())),
            "Year" => Some(Field::value(self.year)),
            "Price" => Some(Field::value(self.price)),
            _ => None,
        }
    }
}

impl Entity for Car {
    fn entity_def() -> EntityDef {
        EntityDef::new("Car")
            .with_field(FieldDef::optional_embedded("Person", EntityRef::of::<Person>()))
            .with_field(FieldDef::scalar("Make", ScalarType::String))
            .with_field(FieldDef::scalar("Model", ScalarType::String))
            .with_field(FieldDef::scalar("Year", ScalarType::Int32))
            .with_field(FieldDef::scalar("Price", ScalarType::Decimal))
    }
}

fn car(person: &Arc<Person>, make: &str, model: &str, price: i64, year: i32) -> Car {
    Car {
        person: Some(Arc::clone(person)),
        make: make.into(),
        model: model.into(),
        year,
        price: Decimal::new(price, 0),
    }
}

/// Two people, each owning two cars.
fn cars() -> Vec<Car> {
    let person1 = Arc::new(Person {
        name: "FakeName1".into(),
        nickname: None,
    });
    let person2 = Arc::new(Person {
        name: "FakeName2".into(),
        nickname: Some("Two".into()),
    });

    vec![
        car(&person1, "FakeMake1", "FakeModel1", 10001, 2017),
        car(&person1, "FakeMake2", "FakeModel2", 20002, 2018),
        car(&person2, "FakeMake1", "FakeModel1", 10001, 2018),
        car(&person2, "FakeMake2", "FakeModel2", 20002, 2017),
    ]
}

fn makes(cars: &[Car]) -> Vec<&str> {
    cars.iter().map(|c| c.make.as_str()).collect()
}

fn owners(cars: &[Car]) -> Vec<&str> {
    cars.iter()
        .map(|c| c.person.as_ref().map_or("<none>", |p| p.name.as_str()))
        .collect()
}

fn make_years(cars: &[Car]) -> Vec<(&str, i32)> {
    cars.iter().map(|c| (c.make.as_str(), c.year)).collect()
}

#[test]
fn order_by_property_name() {
    let sorted = Query::new(cars()).order_by("Make").collect().unwrap();
    assert_eq!(makes(&sorted), ["FakeMake1", "FakeMake1", "FakeMake2", "FakeMake2"]);
}

#[test]
fn order_by_parent_property_name() {
    let sorted = Query::new(cars()).order_by("Person.Name").collect().unwrap();
    assert_eq!(owners(&sorted), ["FakeName1", "FakeName1", "FakeName2", "FakeName2"]);
}

#[test]
fn order_by_descending_property_name() {
    let sorted = Query::new(cars()).order_by_descending("Make").collect().unwrap();
    assert_eq!(makes(&sorted), ["FakeMake2", "FakeMake2", "FakeMake1", "FakeMake1"]);
}

#[test]
fn order_by_descending_parent_property_name() {
    let sorted = Query::new(cars())
        .order_by_descending("Person.Name")
        .collect()
        .unwrap();
    assert_eq!(owners(&sorted), ["FakeName2", "FakeName2", "FakeName1", "FakeName1"]);
}

#[test]
fn eager_order_by_with_direction_keywords() {
    let ascending = order_by(cars(), "Make", "ASC").unwrap();
    assert_eq!(makes(&ascending), ["FakeMake1", "FakeMake1", "FakeMake2", "FakeMake2"]);

    let descending = order_by(cars(), "Make", "DESC").unwrap();
    assert_eq!(makes(&descending), ["FakeMake2", "FakeMake2", "FakeMake1", "FakeMake1"]);

    let descending = order_by_descending(cars(), "Person.Name").unwrap();
    assert_eq!(owners(&descending), ["FakeName2", "FakeName2", "FakeName1", "FakeName1"]);
}

#[test]
fn eager_order_by_is_stable() {
    // Ties on Make keep input order: person1's car before person2's.
    let sorted = order_by(cars(), "Make", SortDirection::Asc).unwrap();
    assert_eq!(owners(&sorted), ["FakeName1", "FakeName2", "FakeName1", "FakeName2"]);

    let sorted = order_by(cars(), "Make", SortDirection::Desc).unwrap();
    assert_eq!(owners(&sorted), ["FakeName1", "FakeName2", "FakeName1", "FakeName2"]);
}

#[test]
fn then_by_property_name() {
    let sorted = Query::new(cars())
        .order_by("Make")
        .then_by("Year")
        .collect()
        .unwrap();
    assert_eq!(
        make_years(&sorted),
        [
            ("FakeMake1", 2017),
            ("FakeMake1", 2018),
            ("FakeMake2", 2017),
            ("FakeMake2", 2018),
        ]
    );
}

#[test]
fn then_by_descending_typed_keys() {
    let sorted = Query::new(cars())
        .order_by_key(|c: &Car| c.make.clone())
        .then_by_key_descending(|c: &Car| c.year)
        .collect()
        .unwrap();
    assert_eq!(
        make_years(&sorted),
        [
            ("FakeMake1", 2018),
            ("FakeMake1", 2017),
            ("FakeMake2", 2018),
            ("FakeMake2", 2017),
        ]
    );
}

#[test]
fn then_by_descending_property_name() {
    let sorted = Query::new(cars())
        .order_by("Make")
        .then_by_descending("Year")
        .collect()
        .unwrap();
    assert_eq!(
        make_years(&sorted),
        [
            ("FakeMake1", 2018),
            ("FakeMake1", 2017),
            ("FakeMake2", 2018),
            ("FakeMake2", 2017),
        ]
    );
}

#[test]
fn between_prices() {
    let low = Decimal::new(10001, 0);
    let high = Decimal::new(15000, 0);

    let in_range = Query::new(cars())
        .between(|c| c.price, low, high)
        .order_by("Person.Name")
        .collect()
        .unwrap();
    assert_eq!(in_range.len(), 2);
    assert_eq!(owners(&in_range), ["FakeName1", "FakeName2"]);

    let none = between(cars(), |c| c.price, Decimal::new(10002, 0), high);
    assert!(none.is_empty());

    let inverted = between(cars(), |c| c.price, high, low);
    assert!(inverted.is_empty());
}

#[test]
fn missing_segment_is_reported() {
    let err = order_by(cars(), "Person.Nonexistent", SortDirection::Asc).unwrap_err();
    match err {
        Error::FieldNotFound { segment, entity } => {
            assert_eq!(segment, "Nonexistent");
            assert_eq!(entity, "Person");
        }
        other => panic!("unexpected error: {other}"),
    }

    // Eager resolution fails even without elements.
    let err = order_by(Vec::<Car>::new(), "Colour", SortDirection::Asc).unwrap_err();
    assert!(matches!(err, Error::FieldNotFound { .. }));
}

#[test]
fn empty_path_is_invalid() {
    let err = order_by(cars(), "  ", SortDirection::Asc).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn record_keys_are_unsupported() {
    let mut sorted = cars();
    let err = sort_by_path(&mut sorted, "Person", SortDirection::Asc).unwrap_err();
    assert!(matches!(err, Error::UnsupportedKeyType { type_name } if type_name == "Option<Person>"));

    // A single element is never compared.
    let single = order_by(cars().into_iter().take(1), "Person", SortDirection::Asc).unwrap();
    assert_eq!(single.len(), 1);
}

#[test]
fn absent_intermediate_sorts_first_ascending() {
    let mut fleet = cars();
    let mut orphan = fleet[3].clone();
    orphan.person = None;
    fleet.insert(1, orphan);

    let sorted = order_by(fleet.clone(), "Person.Name", SortDirection::Asc).unwrap();
    assert_eq!(
        owners(&sorted),
        ["<none>", "FakeName1", "FakeName1", "FakeName2", "FakeName2"]
    );

    let sorted = order_by(fleet.clone(), "Person.Name", SortDirection::Desc).unwrap();
    assert_eq!(
        owners(&sorted),
        ["FakeName2", "FakeName2", "FakeName1", "FakeName1", "<none>"]
    );

    let nulls_last = Orderer::new(OrderingConfig::new().with_null_ordering(NullOrdering::Last));
    let sorted = nulls_last
        .order_by(fleet, "Person.Name", SortDirection::Asc)
        .unwrap();
    assert_eq!(owners(&sorted).last(), Some(&"<none>"));
}

#[test]
fn optional_terminal_field_orders_nulls_first() {
    let sorted = Query::new(cars())
        .order_by_descending("Person.Nickname")
        .then_by("Year")
        .collect()
        .unwrap();
    assert_eq!(owners(&sorted), ["FakeName2", "FakeName2", "FakeName1", "FakeName1"]);
    assert_eq!(sorted[0].year, 2017);
}

#[test]
fn sort_borrowed_records() {
    let fleet = cars();
    let refs: Vec<&Car> = fleet.iter().collect();
    let sorted = order_by(refs, "Year", SortDirection::Desc).unwrap();
    assert_eq!(sorted.iter().map(|c| c.year).collect::<Vec<_>>(), [2018, 2018, 2017, 2017]);
}

#[test]
fn json_documents_with_inferred_entity() {
    let docs = vec![
        json!({ "make": "FakeMake2", "year": 2017, "person": { "name": "FakeName2" } }),
        json!({ "make": "FakeMake1", "year": 2018, "person": { "name": "FakeName1" } }),
        json!({ "make": "FakeMake1", "year": 2017 }),
    ];
    let entity = EntityDef::infer_from_json("Car", &docs).unwrap();

    let sorted = order_by_entity(&entity, docs.clone(), "person.name", SortDirection::Asc).unwrap();
    let years: Vec<_> = sorted.iter().map(|d| d["year"].as_i64().unwrap()).collect();
    assert_eq!(years, [2017, 2018, 2017]);

    let sorted = Query::with_entity(docs, entity)
        .order_by("make")
        .then_by_descending("year")
        .collect()
        .unwrap();
    let years: Vec<_> = sorted.iter().map(|d| d["year"].as_i64().unwrap()).collect();
    assert_eq!(years, [2018, 2017, 2017]);
}

#[test]
fn json_integers_and_floats_compare_exactly() {
    let docs = vec![
        json!({ "price": 9_007_199_254_740_993i64 }),
        json!({ "price": 9_007_199_254_740_992.0f64 }),
        json!({ "price": 9_007_199_254_740_991i64 }),
    ];
    let entity = EntityDef::infer_from_json("Listing", &docs).unwrap();

    let sorted = order_by_entity(&entity, docs.clone(), "price", SortDirection::Asc).unwrap();
    assert_eq!(sorted, vec![docs[2].clone(), docs[1].clone(), docs[0].clone()]);
}

#[test]
fn eager_typed_key() {
    let sorted = order_by_key(cars(), |c: &Car| (c.year, c.make.clone()), "DESC").unwrap();
    assert_eq!(
        make_years(&sorted),
        [
            ("FakeMake2", 2018),
            ("FakeMake1", 2018),
            ("FakeMake2", 2017),
            ("FakeMake1", 2017),
        ]
    );
}
