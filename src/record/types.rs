//! Record and value types

use crate::types::{JsonObject, JsonValue};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat};

/// A point in time read from a date or timestamp column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// Calendar date without time (date32/date64 columns)
    Date(NaiveDate),
    /// Wall-clock date-time without zone (timestamp columns without tz)
    Naive(NaiveDateTime),
    /// Date-time with a UTC offset (timestamp columns with tz)
    Zoned(DateTime<FixedOffset>),
}

impl Timestamp {
    /// Render as ISO-8601.
    ///
    /// Fractional seconds are only written when non-zero, and zoned values
    /// carry a numeric `+HH:MM` offset rather than `Z`.
    pub fn to_iso8601(&self) -> String {
        match self {
            Timestamp::Date(date) => date.format("%Y-%m-%d").to_string(),
            Timestamp::Naive(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            Timestamp::Zoned(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, false),
        }
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// A single loosely-typed cell value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Missing value
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer (any width up to 64 bits)
    Int(i64),
    /// Unsigned 64-bit integer that does not fit in `i64`
    UInt(u64),
    /// Floating point. `NaN` is the columnar "not available" marker.
    Float(f64),
    /// Text
    String(String),
    /// Date or date-time
    Timestamp(Timestamp),
    /// List column value
    Array(Vec<FieldValue>),
    /// Struct column value, in field order
    Object(Vec<(String, FieldValue)>),
}

impl FieldValue {
    /// Whether this value is missing, including the `NaN` marker
    pub fn is_null(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Lift a wire value back into a field value
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => FieldValue::Null,
            JsonValue::Bool(b) => FieldValue::Bool(*b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    FieldValue::UInt(u)
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            JsonValue::String(s) => FieldValue::String(s.clone()),
            JsonValue::Array(items) => {
                FieldValue::Array(items.iter().map(FieldValue::from_json).collect())
            }
            JsonValue::Object(obj) => FieldValue::Object(
                obj.iter()
                    .map(|(k, v)| (k.clone(), FieldValue::from_json(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<Timestamp> for FieldValue {
    fn from(value: Timestamp) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// One row of the source dataset: field names in column order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record with room for `capacity` fields
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a field. An existing field keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Append a field without checking for duplicates.
    ///
    /// Callers must guarantee `name` is not already present, e.g. when
    /// copying columns from a schema with unique names.
    pub(crate) fn push(&mut self, name: String, value: FieldValue) {
        self.fields.push((name, value));
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Field names in order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate over (name, value) pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a record from a wire object
    pub fn from_json(obj: &JsonObject) -> Self {
        obj.iter()
            .map(|(k, v)| (k.clone(), FieldValue::from_json(v)))
            .collect()
    }
}

impl FromIterator<(String, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}
