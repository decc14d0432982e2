//! YAML decoding into the same value tree shape as JSON.
//!
//! YAML allows non-string mapping keys and tagged values; templates only
//! address string keys, so scalar keys are stringified and tags are dropped
//! in favour of the value they annotate.

use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;

use crate::core::TmplxError;

/// Decode a single YAML document.
///
/// # Errors
///
/// Returns [`TmplxError::YamlDecode`] for malformed input, empty input,
/// multi-document streams, non-finite floats and non-scalar mapping keys.
pub fn decode(bytes: &[u8]) -> Result<Value, TmplxError> {
    if bytes.trim_ascii().is_empty() {
        return Err(TmplxError::YamlDecode {
            reason: "empty input".to_string(),
        });
    }
    let yaml: YamlValue = serde_yaml::from_slice(bytes).map_err(|e| TmplxError::YamlDecode {
        reason: e.to_string(),
    })?;
    into_json(yaml).map_err(|reason| TmplxError::YamlDecode {
        reason,
    })
}

fn into_json(value: YamlValue) -> Result<Value, String> {
    Ok(match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => number_into_json(&n)?,
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => {
            Value::Array(items.into_iter().map(into_json).collect::<Result<_, _>>()?)
        }
        YamlValue::Mapping(mapping) => {
            let mut object = Map::new();
            for (key, value) in mapping {
                object.insert(key_into_string(key)?, into_json(value)?);
            }
            Value::Object(object)
        }
        YamlValue::Tagged(tagged) => into_json(tagged.value)?,
    })
}

fn number_into_json(n: &serde_yaml::Number) -> Result<Value, String> {
    if let Some(i) = n.as_i64() {
        Ok(Value::from(i))
    } else if let Some(u) = n.as_u64() {
        Ok(Value::from(u))
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| format!("number {n} cannot be represented"))
    }
}

fn key_into_string(key: YamlValue) -> Result<String, String> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Tagged(tagged) => key_into_string(tagged.value),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => {
            Err("mapping keys must be scalars".to_string())
        }
    }
}
