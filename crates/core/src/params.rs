//! Lenient typed lookups on a `serde_json::Value` object.
//!
//! A missing key or a value of the wrong JSON type yields the default.
//! These never fail; range checks belong to [`RendererConfig::validate`](crate::RendererConfig::validate).

use serde_json::Value;

/// Reads `params[name]` as an `f64`. Integers are accepted.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Reads `params[name]` as a non-negative integer.
pub fn param_u64(params: &Value, name: &str, default: u64) -> u64 {
    params.get(name).and_then(Value::as_u64).unwrap_or(default)
}
