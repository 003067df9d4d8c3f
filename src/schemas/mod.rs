//! JSON Schema metadata for model responses and the validation built on it.

pub mod schema;
pub mod validation;

pub use schema::{apply_doc_comments, CompletionSchema, SchemaHandle};
pub use validation::{decode_structured, validate_structured_payload};
