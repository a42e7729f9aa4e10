//! Tests for record module

use super::*;
use chrono::{FixedOffset, NaiveDate, TimeZone};
use serde_json::json;

// ============================================================================
// Timestamp Tests
// ============================================================================

#[test]
fn test_timestamp_date_iso() {
    let ts = Timestamp::Date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    assert_eq!(ts.to_iso8601(), "2024-03-09");
}

#[test]
fn test_timestamp_naive_iso_without_fraction() {
    let dt = NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(14, 5, 0)
        .unwrap();
    assert_eq!(Timestamp::Naive(dt).to_iso8601(), "2024-03-09T14:05:00");
}

#[test]
fn test_timestamp_naive_iso_with_fraction() {
    let dt = NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_micro_opt(14, 5, 0, 250_000)
        .unwrap();
    assert_eq!(Timestamp::Naive(dt).to_iso8601(), "2024-03-09T14:05:00.250");
}

#[test]
fn test_timestamp_zoned_iso() {
    let offset = FixedOffset::east_opt(0).unwrap();
    let dt = offset.with_ymd_and_hms(2025, 1, 31, 23, 59, 1).unwrap();
    assert_eq!(
        Timestamp::Zoned(dt).to_iso8601(),
        "2025-01-31T23:59:01+00:00"
    );

    let offset = FixedOffset::west_opt(5 * 3600).unwrap();
    let dt = offset.with_ymd_and_hms(2025, 1, 31, 8, 0, 0).unwrap();
    assert_eq!(Timestamp::Zoned(dt).to_string(), "2025-01-31T08:00:00-05:00");
}

// ============================================================================
// FieldValue Tests
// ============================================================================

#[test]
fn test_field_value_is_null() {
    assert!(FieldValue::Null.is_null());
    assert!(FieldValue::Float(f64::NAN).is_null());
    assert!(!FieldValue::Float(0.0).is_null());
    assert!(!FieldValue::String(String::new()).is_null());
}

#[test]
fn test_field_value_from_option() {
    assert_eq!(FieldValue::from(None::<i64>), FieldValue::Null);
    assert_eq!(FieldValue::from(Some("Austin")), FieldValue::from("Austin"));
}

#[test]
fn test_field_value_from_json() {
    assert_eq!(FieldValue::from_json(&json!(null)), FieldValue::Null);
    assert_eq!(FieldValue::from_json(&json!(7)), FieldValue::Int(7));
    assert_eq!(FieldValue::from_json(&json!(u64::MAX)), FieldValue::UInt(u64::MAX));
    assert_eq!(FieldValue::from_json(&json!(1.5)), FieldValue::Float(1.5));
    assert_eq!(
        FieldValue::from_json(&json!({"a": [true]})),
        FieldValue::Object(vec![(
            "a".to_string(),
            FieldValue::Array(vec![FieldValue::Bool(true)])
        )])
    );
}

// ============================================================================
// Record Tests
// ============================================================================

#[test]
fn test_record_insert_keeps_position() {
    let mut record = Record::new().with("firm_id", "F-1").with("city", "Reno");
    record.insert("firm_id", "F-2");

    let names: Vec<_> = record.field_names().collect();
    assert_eq!(names, vec!["firm_id", "city"]);
    assert_eq!(record.get("firm_id"), Some(&FieldValue::from("F-2")));
    assert_eq!(record.len(), 2);
}

#[test]
fn test_record_get_missing() {
    let record = Record::new().with("firm_id", "F-1");
    assert!(record.get("state").is_none());
    assert!(!record.is_empty());
    assert!(Record::new().is_empty());
}

#[test]
fn test_record_from_json() {
    let obj = json!({"firm_id": "F-9", "google_rating": 4.5, "for_sale": false});
    let record = Record::from_json(obj.as_object().unwrap());

    assert_eq!(record.len(), 3);
    assert_eq!(record.get("google_rating"), Some(&FieldValue::Float(4.5)));
    assert_eq!(record.get("for_sale"), Some(&FieldValue::Bool(false)));
}
