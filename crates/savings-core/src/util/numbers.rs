//! Lenient number coercion.
//!
//! Project and settings inputs arrive as loosely typed JSON. Rather than
//! rejecting bad values, every numeric field passes through
//! [`to_non_negative_number`], which never fails and never yields `NaN`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a JSON value to a finite, non-negative number.
///
/// - numbers are taken as-is
/// - strings are trimmed and parsed (`" 14 "` -> `14.0`)
/// - everything else (null, empty or non-numeric strings, booleans, arrays,
///   objects) becomes `0.0`
///
/// A result that is negative or not finite is replaced by `0.0`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use savings_core::util::numbers::to_non_negative_number;
///
/// assert_eq!(to_non_negative_number(&json!(200)), 200.0);
/// assert_eq!(to_non_negative_number(&json!("14.5")), 14.5);
/// assert_eq!(to_non_negative_number(&json!("")), 0.0);
/// assert_eq!(to_non_negative_number(&json!("abc")), 0.0);
/// assert_eq!(to_non_negative_number(&json!(-3)), 0.0);
/// assert_eq!(to_non_negative_number(&json!(null)), 0.0);
/// ```
pub fn to_non_negative_number(value: &Value) -> f64 {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    raw.map_or(0.0, non_negative)
}

/// Replace negative and non-finite values with `0.0`.
pub fn non_negative(n: f64) -> f64 {
    if n.is_finite() && n >= 0.0 { n } else { 0.0 }
}

/// Serde adapter: a present field is coerced, a missing one falls back to
/// the field's `#[serde(default)]`.
pub(crate) fn deserialize_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(to_non_negative_number(&value))
}

/// Serde adapter for partial updates: `null` counts as "not supplied".
pub(crate) fn deserialize_optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(to_non_negative_number(&other)),
    })
}

/// Serde adapter for identifiers and labels: strings are kept, numbers are
/// rendered, anything else counts as absent.
pub(crate) fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
