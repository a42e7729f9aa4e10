//! Field value to wire value conversion

use crate::record::FieldValue;
use crate::types::{JsonObject, JsonValue};

/// Normalize one cell for transmission.
///
/// Total over every `FieldValue`: the result is always one of
/// null, bool, number or string. Nested values are flattened to JSON text.
pub fn normalize_value(value: &FieldValue) -> JsonValue {
    match value {
        FieldValue::Array(_) | FieldValue::Object(_) => {
            JsonValue::String(to_json(value).to_string())
        }
        scalar => to_json(scalar),
    }
}

/// Convert a value to JSON without flattening nested structures.
///
/// Used for the members of nested values, and by [`normalize_value`] for
/// scalars. Floats that JSON cannot represent become `null`.
pub fn to_json(value: &FieldValue) -> JsonValue {
    match value {
        FieldValue::Null => JsonValue::Null,
        FieldValue::Bool(b) => JsonValue::Bool(*b),
        FieldValue::Int(i) => JsonValue::from(*i),
        FieldValue::UInt(u) => JsonValue::from(*u),
        FieldValue::Float(f) => {
            serde_json::Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number)
        }
        FieldValue::String(s) => JsonValue::String(s.clone()),
        FieldValue::Timestamp(ts) => JsonValue::String(ts.to_iso8601()),
        FieldValue::Array(items) => JsonValue::Array(items.iter().map(to_json).collect()),
        FieldValue::Object(fields) => {
            let obj: JsonObject = fields
                .iter()
                .map(|(k, v)| (k.clone(), to_json(v)))
                .collect();
            JsonValue::Object(obj)
        }
    }
}
