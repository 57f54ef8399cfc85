use super::config::ConfigError;
use crate::domain::EventParams;
use serde_json::Value;

/// Builds an event parameter mapping from a JSON object literal and
/// `key=value` pairs. Pair values that parse as JSON keep their type,
/// anything else becomes a string. Pairs override keys from the object.
pub fn parse_params(
    json: Option<&str>,
    pairs: &[String],
) -> Result<Option<EventParams>, ConfigError> {
    if json.is_none() && pairs.is_empty() {
        return Ok(None);
    }

    let mut params = match json {
        Some(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(ConfigError::InvalidParams(format!(
                    "expected a JSON object, got {other}"
                )));
            }
            Err(e) => return Err(ConfigError::InvalidParams(e.to_string())),
        },
        None => EventParams::new(),
    };

    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            return Err(ConfigError::InvalidParams(format!(
                "'{pair}' is not a key=value pair"
            )));
        };
        if key.is_empty() {
            return Err(ConfigError::InvalidParams(format!("'{pair}' has an empty key")));
        }
        let value = serde_json::from_str::<Value>(raw)
            .unwrap_or_else(|_| Value::String(raw.to_string()));
        params.insert(key.to_string(), value);
    }

    Ok(Some(params))
}
