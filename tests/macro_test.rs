use itinerary_planner::{completion_schema, schema::CompletionSchema};
use schemars::JsonSchema;
use serde::Deserialize;

/// A packing list returned by the model
#[derive(Debug, Deserialize, JsonSchema)]
#[completion_schema]
#[allow(dead_code)]
struct PackingList {
    /// Items to bring
    items: Vec<String>,
    weight_kg: Option<f64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[completion_schema(name = "Budget", description = "Estimated trip spend")]
#[allow(dead_code)]
struct TripBudget {
    total: f64,
    currency: String,
}

#[test]
fn test_defaults_come_from_type_and_docs() {
    let schema = PackingList::schema();
    assert_eq!(schema.schema_name(), "PackingList");
    assert_eq!(schema.type_name(), "PackingList");

    let json = schema.schema_json();
    assert_eq!(json["title"], "PackingList");
    assert_eq!(json["description"], "A packing list returned by the model");
    assert_eq!(json["properties"]["items"]["description"], "Items to bring");
    assert!(json["properties"]["weight_kg"].get("description").is_none());
}

#[test]
fn test_explicit_arguments_win() {
    let schema = TripBudget::schema();
    assert_eq!(schema.schema_name(), "Budget");
    assert_eq!(schema.type_name(), "TripBudget");
    assert_eq!(schema.schema_json()["title"], "Budget");
    assert_eq!(schema.schema_json()["description"], "Estimated trip spend");
}

#[test]
fn test_handle_is_cached() {
    assert!(std::ptr::eq(PackingList::schema(), PackingList::schema()));
}
