use crate::{
    error::{PlannerError, Result},
    schemas::{CompletionSchema, SchemaHandle},
};
use serde_json::Value;
use tracing::debug;

const MAX_SCHEMA_ERRORS: usize = 3;

/// Validate a structured payload against a schema
pub fn validate_structured_payload(schema: &SchemaHandle, payload: &Value) -> Result<()> {
    let validator = schema.compiled().map_err(|err| {
        PlannerError::Config(format!(
            "`{}` schema cannot be compiled: {}",
            schema.schema_name(),
            err
        ))
    })?;

    let Err(errors) = validator.validate(payload) else {
        return Ok(());
    };

    let mut details = Vec::new();
    let mut truncated = false;

    for (idx, error) in errors.enumerate() {
        if idx == MAX_SCHEMA_ERRORS {
            truncated = true;
            break;
        }
        let mut path = error.instance_path.to_string();
        if path.is_empty() {
            path = "<root>".to_string();
        }
        details.push(format!("{}: {}", path, error));
    }

    let mut detail_str = if details.is_empty() {
        "payload failed schema validation".to_string()
    } else {
        details.join("; ")
    };
    if truncated {
        detail_str.push_str("; additional errors truncated");
    }

    debug!(
        target: "planner::schema",
        schema = schema.schema_name(),
        error = %detail_str,
        payload = %payload
    );

    Err(PlannerError::Parse(format!(
        "output does not match `{}` schema: {}",
        schema.schema_name(),
        detail_str
    )))
}

/// Validate `payload` against `T`'s schema, then deserialize it with path-aware errors.
pub fn decode_structured<T>(payload: Value) -> Result<T>
where
    T: CompletionSchema,
{
    let schema = T::schema();
    validate_structured_payload(schema, &payload)?;

    serde_path_to_error::deserialize(payload).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        PlannerError::Parse(format!(
            "failed to deserialize `{}` at {}: {}",
            schema.schema_name(),
            location,
            err.into_inner()
        ))
    })
}
