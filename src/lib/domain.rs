//! Domain layer

use serde_json::Value;

pub mod campaigns;
pub mod dispatch;
pub mod errors;
pub mod recipients;

/// Coerces a scalar value to text. Maps, sequences and nulls have no text form.
pub(crate) fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
