//! Strict extraction of scalars and arrays from a generic JSON tree.
//!
//! Every getter follows the same contract: an absent field or an explicit
//! `null` yields `None`, a field of the expected kind yields `Some`, and any
//! other kind is a [`Error::TypeMismatch`]. Nothing is coerced silently
//! except the scalar-as-array shorthand of the array getters.

use serde_json::Value;

use crate::error::{Error, Result};

/// A JSON object as produced by `serde_json`.
pub type Object = serde_json::Map<String, Value>;

/// Join a parent path and a field name.
pub fn field_path(at: &str, field: &str) -> String {
    if at.is_empty() {
        field.to_string()
    } else {
        format!("{at}.{field}")
    }
}

/// Join a parent path and an array index.
pub fn index_path(at: &str, index: usize) -> String {
    format!("{at}[{index}]")
}

/// Look up a field, folding explicit `null` into absence.
fn present<'a>(obj: &'a Object, field: &str) -> Option<&'a Value> {
    match obj.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

/// Read an optional string field.
pub fn get_string(obj: &Object, at: &str, field: &str) -> Result<Option<String>> {
    match present(obj, field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(Error::mismatch(field_path(at, field), "string", other)),
    }
}

/// Read an optional 64-bit integer field.
pub fn get_long(obj: &Object, at: &str, field: &str) -> Result<Option<i64>> {
    present(obj, field)
        .map(|value| as_long(value, &field_path(at, field)))
        .transpose()
}

/// Read an optional 32-bit integer field.
pub fn get_int(obj: &Object, at: &str, field: &str) -> Result<Option<i32>> {
    present(obj, field)
        .map(|value| as_int(value, &field_path(at, field)))
        .transpose()
}

/// Read an optional boolean field.
pub fn get_boolean(obj: &Object, at: &str, field: &str) -> Result<Option<bool>> {
    match present(obj, field) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(Error::mismatch(field_path(at, field), "boolean", other)),
    }
}

/// Read an optional array of strings.
///
/// A bare scalar is treated as a one-element array. Array elements, and a
/// bare scalar, are projected to their textual content, so `5` becomes
/// `"5"`; nested objects, arrays, and `null` elements are rejected.
pub fn get_string_array(obj: &Object, at: &str, field: &str) -> Result<Option<Vec<String>>> {
    let path = field_path(at, field);
    match present(obj, field) {
        None => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| scalar_text(item, &index_path(&path, i)))
            .collect::<Result<Vec<_>>>()
            .map(Some),
        Some(object @ Value::Object(_)) => {
            Err(Error::mismatch(path, "string or array of strings", object))
        }
        Some(scalar) => scalar_text(scalar, &path).map(|s| Some(vec![s])),
    }
}

/// Read an optional array of 32-bit integers.
///
/// A bare number is treated as a one-element array. Elements must already
/// be numeric; numeric strings are not parsed.
pub fn get_int_array(obj: &Object, at: &str, field: &str) -> Result<Option<Vec<i32>>> {
    let path = field_path(at, field);
    match present(obj, field) {
        None => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| as_int(item, &index_path(&path, i)))
            .collect::<Result<Vec<_>>>()
            .map(Some),
        Some(number @ Value::Number(_)) => as_int(number, &path).map(|n| Some(vec![n])),
        Some(other) => Err(Error::mismatch(path, "integer or array of integers", other)),
    }
}

/// Read an optional array field without any shorthand coercion.
pub fn get_array<'a>(obj: &'a Object, at: &str, field: &str) -> Result<Option<&'a [Value]>> {
    match present(obj, field) {
        None => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items.as_slice())),
        Some(other) => Err(Error::mismatch(field_path(at, field), "array", other)),
    }
}

/// Require a value to be an object.
pub fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Object> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::mismatch(path, "object", other)),
    }
}

/// Require a value to be an integer that fits in an `i64`.
pub fn as_long(value: &Value, path: &str) -> Result<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| Error::mismatch(path, "integer", value)),
        other => Err(Error::mismatch(path, "integer", other)),
    }
}

/// Require a value to be an integer that fits in an `i32`.
pub fn as_int(value: &Value, path: &str) -> Result<i32> {
    let wide = as_long(value, path)?;
    i32::try_from(wide).map_err(|_| Error::mismatch(path, "32-bit integer", value))
}

/// Project a scalar to its textual content.
fn scalar_text(value: &Value, path: &str) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => {
            Err(Error::mismatch(path, "scalar", value))
        }
    }
}
