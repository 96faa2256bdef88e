//! JSON loading for configuration layers.
//!
//! Each hierarchy level is one JSON document: a flat key-to-value object
//! whose reserved keys (`append_fields`, `blank_fields`, `field_overrides`,
//! `file_path_templates`) carry the layer annotations. All other values
//! must be scalars; a nested object or array anywhere else fails the load
//! naming the layer and the offending key path, and nothing of the layer
//! is applied.
//!
//! Scalar coercion: strings pass through, numbers and booleans render to
//! their display form, and an explicit `null` becomes the empty string -
//! a deliberate suppression of less specific layers, not a missing key.

use crate::{
    errors::{ConfigurationError, ConfigurationResult},
    layer::{ConfigLayer, LayerLevel, ScheduleOverride},
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

const KEY_APPEND_FIELDS: &str = "append_fields";
const KEY_BLANK_FIELDS: &str = "blank_fields";
const KEY_FIELD_OVERRIDES: &str = "field_overrides";
const KEY_FILE_PATH_TEMPLATES: &str = "file_path_templates";

/// Load one configuration layer from a JSON file.
///
/// # Errors
///
/// Returns `ConfigurationError::FileNotFound` / `FileAccessError` for I/O
/// failures, `ParseError` for invalid JSON, and `MalformedLayer` when the
/// document is not a flat key-to-scalar map outside the reserved keys.
pub fn load_layer(path: &Path, level: LayerLevel) -> ConfigurationResult<ConfigLayer> {
    let text = read_file(path)?;
    let document: Value =
        serde_json::from_str(&text).map_err(|e| ConfigurationError::ParseError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let layer = layer_from_document(document, level)?;

    info!(
        layer = %level,
        path = %path.display(),
        keys = layer.values.len(),
        "Loaded configuration layer"
    );

    Ok(layer)
}

/// Load a per-book schedule override from a JSON file.
///
/// Schedule documents are plain flat maps; the reserved layer annotation
/// keys are not allowed here.
pub fn load_schedule_override(path: &Path) -> ConfigurationResult<ScheduleOverride> {
    let text = read_file(path)?;
    let document: Value =
        serde_json::from_str(&text).map_err(|e| ConfigurationError::ParseError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let object = as_object(document, "schedule", "")?;
    let mut values = BTreeMap::new();
    for (key, value) in object {
        if is_reserved_key(&key) {
            return Err(ConfigurationError::MalformedLayer {
                layer: "schedule".to_string(),
                key_path: key,
                reason: "layer annotations are not allowed in a schedule override".to_string(),
            });
        }
        values.insert(key.clone(), scalar_to_string(&value, "schedule", &key)?);
    }

    Ok(ScheduleOverride::new(values))
}

/// Build a layer from an already-parsed JSON document.
///
/// Exposed for tests and for callers that receive layer documents from
/// somewhere other than the filesystem.
pub fn layer_from_document(document: Value, level: LayerLevel) -> ConfigurationResult<ConfigLayer> {
    let layer_name = level.to_string();
    let object = as_object(document, &layer_name, "")?;

    let mut layer = ConfigLayer::empty(level);

    for (key, value) in object {
        match key.as_str() {
            KEY_APPEND_FIELDS => {
                layer.append_fields = string_list(&value, &layer_name, &key)?;
            }
            KEY_BLANK_FIELDS => {
                layer.blank_fields = string_list(&value, &layer_name, &key)?;
            }
            KEY_FIELD_OVERRIDES => {
                layer.field_overrides = string_map(&value, &layer_name, &key)?;
            }
            KEY_FILE_PATH_TEMPLATES => {
                layer.file_path_templates = string_map(&value, &layer_name, &key)?;
            }
            _ => {
                let rendered = scalar_to_string(&value, &layer_name, &key)?;
                layer.values.insert(key.clone(), rendered);
            }
        }
    }

    Ok(layer)
}

fn read_file(path: &Path) -> ConfigurationResult<String> {
    if !path.exists() {
        return Err(ConfigurationError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    std::fs::read_to_string(path).map_err(|e| ConfigurationError::FileAccessError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn is_reserved_key(key: &str) -> bool {
    matches!(
        key,
        KEY_APPEND_FIELDS | KEY_BLANK_FIELDS | KEY_FIELD_OVERRIDES | KEY_FILE_PATH_TEMPLATES
    )
}

fn as_object(
    value: Value,
    layer: &str,
    key_path: &str,
) -> ConfigurationResult<serde_json::Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ConfigurationError::MalformedLayer {
            layer: layer.to_string(),
            key_path: key_path.to_string(),
            reason: format!("expected an object, found {}", type_name(&other)),
        }),
    }
}

fn scalar_to_string(value: &Value, layer: &str, key_path: &str) -> ConfigurationResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Object(_) | Value::Array(_) => Err(ConfigurationError::MalformedLayer {
            layer: layer.to_string(),
            key_path: key_path.to_string(),
            reason: format!(
                "expected a scalar value, found {}",
                type_name(value)
            ),
        }),
    }
}

fn string_list(value: &Value, layer: &str, key_path: &str) -> ConfigurationResult<Vec<String>> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ConfigurationError::MalformedLayer {
                layer: layer.to_string(),
                key_path: key_path.to_string(),
                reason: format!("expected an array of strings, found {}", type_name(other)),
            })
        }
    };

    let mut list = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item {
            Value::String(s) => list.push(s.clone()),
            other => {
                return Err(ConfigurationError::MalformedLayer {
                    layer: layer.to_string(),
                    key_path: format!("{}[{}]", key_path, index),
                    reason: format!("expected a string, found {}", type_name(other)),
                })
            }
        }
    }
    Ok(list)
}

fn string_map(
    value: &Value,
    layer: &str,
    key_path: &str,
) -> ConfigurationResult<BTreeMap<String, String>> {
    let object = match value {
        Value::Object(map) => map,
        other => {
            return Err(ConfigurationError::MalformedLayer {
                layer: layer.to_string(),
                key_path: key_path.to_string(),
                reason: format!("expected an object, found {}", type_name(other)),
            })
        }
    };

    let mut map = BTreeMap::new();
    for (key, item) in object {
        let nested_path = format!("{}.{}", key_path, key);
        map.insert(key.clone(), scalar_to_string(item, layer, &nested_path)?);
    }
    Ok(map)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
