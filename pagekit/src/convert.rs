//! Loose value coercions for drivers
//!
//! Query-string filter values arrive as strings even when the storage column
//! is numeric or boolean. These helpers give drivers one shared, permissive
//! coercion: string values convert, unparsable strings become a zero value,
//! and non-string values pass through unchanged.

use serde_json::Value;

/// Coerce a string value to a 64-bit integer
///
/// An unparsable string becomes `0`; non-string values pass through.
///
/// # Example
///
/// ```rust
/// use serde_json::{json, Value};
/// use pagekit::convert::coerce_i64;
///
/// assert_eq!(coerce_i64(json!("42")), json!(42));
/// assert_eq!(coerce_i64(json!("nope")), json!(0));
/// assert_eq!(coerce_i64(json!(true)), json!(true));
/// ```
#[must_use]
pub fn coerce_i64(value: Value) -> Value {
    match value {
        Value::String(s) => Value::from(s.parse::<i64>().unwrap_or(0)),
        other => other,
    }
}

/// Coerce a string value to a 64-bit float
///
/// An unparsable or non-finite string becomes `0`; non-string values pass
/// through.
#[must_use]
pub fn coerce_f64(value: Value) -> Value {
    match value {
        Value::String(s) => {
            let parsed = s.parse::<f64>().unwrap_or(0.0);
            serde_json::Number::from_f64(parsed).map_or_else(|| Value::from(0), Value::Number)
        }
        other => other,
    }
}

/// Coerce a string value to a boolean, loosely
///
/// Truthiness is permissive by design: `"true"` (any case) and `"1"` are
/// true, and so is every other non-empty string except `"0"`. Only `"0"`
/// and the empty string are false. Non-string values pass through. Callers
/// wanting strict booleans must validate upstream.
///
/// # Example
///
/// ```rust
/// use serde_json::{json, Value};
/// use pagekit::convert::coerce_bool;
///
/// assert_eq!(coerce_bool(json!("true")), json!(true));
/// assert_eq!(coerce_bool(json!("no")), json!(true));
/// assert_eq!(coerce_bool(json!("0")), json!(false));
/// assert_eq!(coerce_bool(json!("")), json!(false));
/// ```
#[must_use]
pub fn coerce_bool(value: Value) -> Value {
    match value {
        Value::String(s) => {
            let truthy = s.eq_ignore_ascii_case("true") || (s != "0" && !s.is_empty());
            Value::Bool(truthy)
        }
        other => other,
    }
}
