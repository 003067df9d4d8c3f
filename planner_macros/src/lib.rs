mod schema_attr;

use proc_macro::TokenStream;

/// Attaches a cached JSON Schema to a response struct.
///
/// The struct must also derive `schemars::JsonSchema` and `serde::Deserialize`.
/// Doc comments on the struct and its fields are copied into the schema so
/// validation failures name something a reader recognises.
///
/// ```ignore
/// #[derive(Deserialize, JsonSchema)]
/// #[completion_schema(name = "Itinerary")]
/// pub struct ItineraryResponse { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn completion_schema(attr: TokenStream, item: TokenStream) -> TokenStream {
    schema_attr::expand(attr, item)
}
