//! Assertion helpers
//!
//! Each helper returns `Error::Assertion` with the expected and actual
//! values in the message, so a failing check reads like
//! `expected status code 200, got 404`.

use std::fmt::Display;

use serde_json::Value;

use crate::api::ApiResponse;
use crate::common::{Error, Result};

/// The response status must be exactly `expected`
pub fn status(response: &ApiResponse, expected: u16) -> Result<()> {
    let actual = response.status.as_u16();
    if actual != expected {
        return Err(Error::assertion(format!(
            "expected status code {}, got {}",
            expected, actual
        )));
    }
    Ok(())
}

/// `what` must equal `expected`
pub fn equal<T>(what: &str, expected: &T, actual: &T) -> Result<()>
where
    T: PartialEq + Display + ?Sized,
{
    if expected != actual {
        return Err(Error::assertion(format!(
            "expected {} {}, got {}",
            what, expected, actual
        )));
    }
    Ok(())
}

/// Look up `key` in a JSON object; `context` names the object in the failure
pub fn field<'a>(value: &'a Value, key: &str, context: &str) -> Result<&'a Value> {
    match value {
        Value::Object(map) => map
            .get(key)
            .ok_or_else(|| Error::assertion(format!("{} missing '{}' key", context, key))),
        other => Err(Error::assertion(format!(
            "expected {} to be an object, got {}",
            context,
            type_name(other)
        ))),
    }
}

/// Like [`field`], but the value must be a string
pub fn str_field<'a>(value: &'a Value, key: &str, context: &str) -> Result<&'a str> {
    let found = field(value, key, context)?;
    found.as_str().ok_or_else(|| {
        Error::assertion(format!(
            "expected '{}' in {} to be a string, got {}",
            key,
            context,
            type_name(found)
        ))
    })
}

/// Like [`field`], but the value must be an unsigned integer
pub fn u64_field(value: &Value, key: &str, context: &str) -> Result<u64> {
    let found = field(value, key, context)?;
    found.as_u64().ok_or_else(|| {
        Error::assertion(format!(
            "expected '{}' in {} to be an integer, got {}",
            key, context, found
        ))
    })
}

/// The body must be a JSON array
pub fn array<'a>(value: &'a Value, context: &str) -> Result<&'a [Value]> {
    value.as_array().map(Vec::as_slice).ok_or_else(|| {
        Error::assertion(format!(
            "expected {} to be a list, got {}",
            context,
            type_name(value)
        ))
    })
}

/// `haystack` must contain `needle`
pub fn contains(what: &str, haystack: &str, needle: &str) -> Result<()> {
    if !haystack.contains(needle) {
        return Err(Error::assertion(format!(
            "expected {} containing '{}', got '{}'",
            what, needle, haystack
        )));
    }
    Ok(())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
