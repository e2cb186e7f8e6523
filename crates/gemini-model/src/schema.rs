//! Adapts JSON schemas to the subset accepted by function declarations.

use serde_json::{Map, Value, json};

/// Keywords the provider rejects inside function declarations.
const UNSUPPORTED_KEYWORDS: [&str; 2] = ["$schema", "additionalProperties"];

/// Returns a copy of `schema` with unsupported keywords removed at every
/// nesting level. Key order is preserved.
pub fn sanitize(schema: &Map<String, Value>) -> Map<String, Value> {
    schema
        .iter()
        .filter(|(key, _)| !UNSUPPORTED_KEYWORDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), sanitize_value(value)))
        .collect()
}

fn sanitize_value(value: &Value) -> Value {
    match value {
        Value::Object(object) => Value::Object(sanitize(object)),
        // Composite keywords (`anyOf`, `prefixItems`, ...) hold schemas in
        // arrays, so those must be cleaned too.
        Value::Array(items) => {
            Value::Array(items.iter().map(sanitize_value).collect())
        }
        other => other.clone(),
    }
}

/// Converts a tool parameter schema into declaration parameters.
///
/// A schema that isn't a JSON object can't be sanitized, it degrades to an
/// object schema without properties so that the rest of the declarations
/// are still sent.
pub fn function_parameters(tool_name: &str, schema: &Value) -> Value {
    match schema {
        Value::Object(object) => Value::Object(sanitize(object)),
        _ => {
            warn!("schema of tool `{tool_name}` is not an object, using fallback");
            json!({ "type": "object", "properties": {} })
        }
    }
}
