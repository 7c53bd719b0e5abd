//! Projection between the typed model and Kubernetes JSON/YAML
//!
//! - JSON goes to and comes back from the API server
//! - YAML is rendered for manifest data sources and must be byte-stable
//!
//! Unknown fields in cluster responses (status, uid, managedFields, ...) are
//! ignored. Bookkeeping fields are never emitted.

use serde_json::Value as JsonValue;

use crate::error::{CoreError, Result};
use crate::model::ResourceModel;

/// Serialize a model to a JSON document
pub fn to_value(model: &ResourceModel) -> Result<JsonValue> {
    let value = serde_json::to_value(model)?;
    if !value.is_object() {
        return Err(CoreError::Serialization {
            message: "resource did not serialize to a JSON object".to_string(),
        });
    }
    Ok(value)
}

/// Serialize a model to JSON bytes (request body for server-side apply)
pub fn to_json(model: &ResourceModel) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&to_value(model)?)?)
}

/// Build a model from a JSON document
pub fn from_value(value: JsonValue) -> Result<ResourceModel> {
    if !value.is_object() {
        return Err(CoreError::Serialization {
            message: format!("expected a JSON object, got {}", json_type_name(&value)),
        });
    }
    Ok(serde_json::from_value(value)?)
}

/// Build a model from JSON bytes
pub fn from_json(bytes: &[u8]) -> Result<ResourceModel> {
    let value: JsonValue = serde_json::from_slice(bytes)?;
    from_value(value)
}

/// Render a model as a YAML manifest
///
/// Output is deterministic: struct fields keep declaration order and map keys
/// are emitted in sorted order.
pub fn to_yaml(model: &ResourceModel) -> Result<String> {
    let value = to_value(model)?;
    Ok(serde_yaml::to_string(&sorted(value))?)
}

/// Parse a YAML manifest into a model
pub fn from_yaml(yaml: &str) -> Result<ResourceModel> {
    let value: JsonValue = serde_yaml::from_str(yaml)?;
    from_value(value)
}

// Rebuild maps in key order so output does not depend on insertion order.
fn sorted(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => {
            let mut entries: Vec<(String, JsonValue)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            JsonValue::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sorted(v)))
                    .collect(),
            )
        }
        JsonValue::Array(items) => JsonValue::Array(items.into_iter().map(sorted).collect()),
        other => other,
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
