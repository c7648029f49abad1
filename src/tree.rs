//! Kind-checked accessors over the untyped legacy JSON tree.
//!
//! The legacy VRM 0.x extension has no fixed schema binding, so every read
//! goes through these helpers, which fail loudly with the JSON path instead
//! of silently defaulting.

use serde_json::{Map, Value};

use crate::error::{MigrationError, Result};

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(value: &Value, path: &str, expected: &'static str) -> MigrationError {
    MigrationError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: kind_of(value).to_string(),
    }
}

pub(crate) fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| mismatch(value, path, "object"))
}

pub(crate) fn as_array<'a>(value: &'a Value, path: &str) -> Result<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| mismatch(value, path, "array"))
}

pub(crate) fn as_str<'a>(value: &'a Value, path: &str) -> Result<&'a str> {
    value.as_str().ok_or_else(|| mismatch(value, path, "string"))
}

pub(crate) fn as_bool(value: &Value, path: &str) -> Result<bool> {
    value.as_bool().ok_or_else(|| mismatch(value, path, "bool"))
}

pub(crate) fn as_i64(value: &Value, path: &str) -> Result<i64> {
    value.as_i64().ok_or_else(|| mismatch(value, path, "integer"))
}

pub(crate) fn as_u32(value: &Value, path: &str) -> Result<u32> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| mismatch(value, path, "unsigned 32-bit integer"))
}

pub(crate) fn as_f32(value: &Value, path: &str) -> Result<f32> {
    value
        .as_f64()
        .map(|n| n as f32)
        .ok_or_else(|| mismatch(value, path, "number"))
}

/// Required object member. Absence is reported through the type-mismatch
/// channel with `found: "missing"`.
pub(crate) fn member<'a>(value: &'a Value, key: &str, path: &str) -> Result<&'a Value> {
    let object = as_object(value, path)?;
    object.get(key).ok_or_else(|| MigrationError::TypeMismatch {
        path: format!("{path}.{key}"),
        expected: "present member",
        found: "missing".to_string(),
    })
}

pub(crate) fn str_member<'a>(value: &'a Value, key: &str, path: &str) -> Result<&'a str> {
    as_str(member(value, key, path)?, &format!("{path}.{key}"))
}

pub(crate) fn bool_member(value: &Value, key: &str, path: &str) -> Result<bool> {
    as_bool(member(value, key, path)?, &format!("{path}.{key}"))
}

pub(crate) fn u32_member(value: &Value, key: &str, path: &str) -> Result<u32> {
    as_u32(member(value, key, path)?, &format!("{path}.{key}"))
}

pub(crate) fn i64_member(value: &Value, key: &str, path: &str) -> Result<i64> {
    as_i64(member(value, key, path)?, &format!("{path}.{key}"))
}

pub(crate) fn f32_member(value: &Value, key: &str, path: &str) -> Result<f32> {
    as_f32(member(value, key, path)?, &format!("{path}.{key}"))
}

pub(crate) fn array_member<'a>(value: &'a Value, key: &str, path: &str) -> Result<&'a [Value]> {
    as_array(member(value, key, path)?, &format!("{path}.{key}"))
}
