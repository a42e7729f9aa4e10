//! Per-field coercion policies

use crate::types::JsonValue;

/// How a projected field is coerced after normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldPolicy {
    /// Keep the normalized value
    #[default]
    Passthrough,
    /// Listing flag: text `"true"` (any case) is true, other text is false
    ForSaleFlag,
    /// Latitude/longitude: zero and unparseable values mean "not geocoded"
    Coordinate,
}

impl FieldPolicy {
    /// Apply this policy to an already normalized value
    pub fn apply(self, value: JsonValue) -> JsonValue {
        match self {
            FieldPolicy::Passthrough => value,
            FieldPolicy::ForSaleFlag => coerce_for_sale(value),
            FieldPolicy::Coordinate => coerce_coordinate(value),
        }
    }
}

/// Coerce the for-sale flag.
///
/// `null` stays `null`. Strings compare case-insensitively against
/// `"true"` with no trimming. Anything else is coerced by truthiness.
pub fn coerce_for_sale(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Null => JsonValue::Null,
        JsonValue::String(s) => JsonValue::Bool(s.eq_ignore_ascii_case("true")),
        other => JsonValue::Bool(is_truthy(&other)),
    }
}

/// Coerce a geographic coordinate.
///
/// Numbers and numeric text become a float. Failed conversion, zero, and
/// non-finite results all become `null`. Never fails.
pub fn coerce_coordinate(value: JsonValue) -> JsonValue {
    let parsed = match &value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        JsonValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
    };

    parsed
        .filter(|f| f.is_finite() && *f != 0.0)
        .and_then(serde_json::Number::from_f64)
        .map_or(JsonValue::Null, JsonValue::Number)
}

fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(items) => !items.is_empty(),
        JsonValue::Object(obj) => !obj.is_empty(),
    }
}
