//! Masking of credentials before request data reaches the logs.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Replacement written over sensitive values.
pub const MASK: &str = "*****";

/// Keys whose values are masked, compared case-insensitively.
const SENSITIVE_KEYS: &[&str] = &["username", "password", "authorization"];

fn is_sensitive(key: &str) -> bool {
    SENSITIVE_KEYS.iter().any(|s| key.eq_ignore_ascii_case(s))
}

/// Returns a copy of `value` with every sensitive key masked, at any depth.
#[must_use]
pub fn redact(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    let v = if is_sensitive(k) {
                        Value::String(MASK.to_string())
                    } else {
                        redact(v)
                    };
                    (k.clone(), v)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact).collect()),
        other => other.clone(),
    }
}

/// Renders a header map as JSON with sensitive headers masked.
#[must_use]
pub fn redact_headers(headers: &HashMap<String, String>) -> Value {
    let map: Map<String, Value> = headers
        .iter()
        .map(|(k, v)| {
            let v = if is_sensitive(k) { MASK } else { v.as_str() };
            (k.clone(), Value::String(v.to_string()))
        })
        .collect();
    Value::Object(map)
}
