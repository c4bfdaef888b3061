//! Cache Key Module
//!
//! Builds deterministic cache keys from a resource prefix and a parameter bag.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{CacheError, Result};

// == Build Key ==
/// Builds `"{prefix}:{params}"` where `params` is rendered as canonical JSON.
///
/// Object keys are sorted at every depth, so two parameter bags holding the
/// same pairs produce byte-identical keys whatever order they were built in.
/// Values keep their JSON type: `{"a": 1}` and `{"a": "1"}` differ. Empty
/// params render as `{}`.
///
/// ```
/// use review_cache::cache::build_key;
/// use serde_json::json;
///
/// let a = build_key("listings", &json!({"b": 2, "a": 1})).unwrap();
/// let b = build_key("listings", &json!({"a": 1, "b": 2})).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a, r#"listings:{"a":1,"b":2}"#);
/// ```
pub fn build_key<P>(prefix: &str, params: &P) -> Result<String>
where
    P: Serialize + ?Sized,
{
    if prefix.is_empty() {
        return Err(CacheError::InvalidKey(
            "key prefix must not be empty".to_string(),
        ));
    }

    let value = serde_json::to_value(params)
        .map_err(|e| CacheError::InvalidKey(format!("unserializable key params: {}", e)))?;
    let canonical = match canonicalize(value) {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };

    Ok(format!("{}:{}", prefix, canonical))
}

/// Rebuilds every object with its keys in sorted order.
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut pairs: Vec<(String, Value)> = map.into_iter().collect();
            pairs.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k, canonicalize(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}
