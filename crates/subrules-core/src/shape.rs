//! Canonicalization of shorthand shapes.
//!
//! Authors may write a bare selector string where a whole rule object is
//! expected, or a bare rule where a whole group is expected. Two rules turn
//! these shorthands into the canonical object form before field extraction:
//!
//! - [`normalize_node`]: a scalar or array at a node position is wrapped as
//!   `{ <wrap_key>: node }`; objects pass through untouched.
//! - [`collection_items`]: a named child collection that is absent or `null`
//!   is empty, a single non-array value is a one-element collection, and an
//!   array is used as-is.

use std::borrow::Cow;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::value::Object;

/// Normalize one node of a child collection into object form.
///
/// An explicit `null` node fails: every collection element must carry a
/// value.
pub fn normalize_node<'a>(raw: &'a Value, wrap_key: &str, path: &str) -> Result<Cow<'a, Object>> {
    match raw {
        Value::Object(map) => Ok(Cow::Borrowed(map)),
        Value::Null => Err(Error::malformed(format!("{path} is null"))),
        Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Array(_) => {
            let mut wrapped = Object::new();
            wrapped.insert(wrap_key.to_string(), raw.clone());
            Ok(Cow::Owned(wrapped))
        }
    }
}

/// The elements of a named child collection, with single-value shorthand.
pub fn collection_items<'a>(obj: &'a Object, field: &str) -> &'a [Value] {
    match obj.get(field) {
        None | Some(Value::Null) => &[],
        Some(Value::Array(items)) => items,
        Some(single) => std::slice::from_ref(single),
    }
}
