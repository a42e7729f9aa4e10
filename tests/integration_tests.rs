//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: parquet file → projection → batched upsert

use arrow::array::{ArrayRef, Float64Array, StringArray, TimestampMillisecondArray};
use arrow::record_batch::RecordBatch;
use firm_upload::config::Settings;
use firm_upload::projection::Projector;
use firm_upload::source::load_dataset;
use firm_upload::store::RestStore;
use firm_upload::upload::{BatchOutcome, BatchReport, UploadDriver, UploadOptions};
use firm_upload::{Error, JsonValue};
use parquet::arrow::ArrowWriter;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

// ============================================================================
// Helpers
// ============================================================================

/// Matches upsert requests whose first row carries the given firm id
struct FirstFirm(&'static str);

impl Match for FirstFirm {
    fn matches(&self, request: &Request) -> bool {
        serde_json::from_slice::<JsonValue>(&request.body)
            .ok()
            .and_then(|body| body.get(0)?.get("firm_id")?.as_str().map(str::to_string))
            .is_some_and(|id| id == self.0)
    }
}

fn firms_batch(count: usize) -> RecordBatch {
    let ids: Vec<String> = (1..=count).map(|i| format!("F-{i}")).collect();
    let names: Vec<String> = (1..=count).map(|i| format!("Ledger & Co {i}")).collect();
    let latitudes: Vec<f64> = (0..count).map(|i| if i == 0 { 0.0 } else { 43.6 }).collect();
    let longitudes: Vec<&str> = (0..count).map(|i| if i == 0 { "n/a" } else { "-116.2" }).collect();
    let for_sale: Vec<&str> = (0..count).map(|i| if i % 2 == 0 { "TRUE" } else { "no" }).collect();
    let scores: Vec<f64> = (0..count).map(|i| i as f64).collect();
    let updated: Vec<i64> = (0..count).map(|_| 1_700_000_000_000).collect();

    RecordBatch::try_from_iter(vec![
        ("firm_id", Arc::new(StringArray::from(ids)) as ArrayRef),
        ("firm_name", Arc::new(StringArray::from(names)) as ArrayRef),
        ("latitude", Arc::new(Float64Array::from(latitudes)) as ArrayRef),
        ("longitude", Arc::new(StringArray::from(longitudes)) as ArrayRef),
        ("for_sale", Arc::new(StringArray::from(for_sale)) as ArrayRef),
        ("internal_score", Arc::new(Float64Array::from(scores)) as ArrayRef),
        (
            "last_updated",
            Arc::new(TimestampMillisecondArray::from(updated).with_timezone("+00:00")) as ArrayRef,
        ),
    ])
    .unwrap()
}

fn write_parquet(path: &Path, batch: &RecordBatch) {
    let file = File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
    writer.write(batch).unwrap();
    writer.close().unwrap();
}

fn driver_for(server: &MockServer, batch_size: usize) -> UploadDriver<RestStore> {
    let settings = Settings::new(&server.uri(), "service-role-key").unwrap();
    let store = RestStore::new(&settings, Duration::from_secs(5)).unwrap();
    let options = UploadOptions::new().with_batch_size(batch_size);
    UploadDriver::new(store, Projector::firms(), options).unwrap()
}

// ============================================================================
// End-to-End Upload Tests
// ============================================================================

#[tokio::test]
async fn test_upload_parquet_end_to_end() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("firms_master.parquet");
    write_parquet(&file, &firms_batch(5));

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/firms"))
        .and(query_param("on_conflict", "firm_id"))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&server)
        .await;

    let dataset = load_dataset(&file).unwrap();
    let driver = driver_for(&server, 3);

    let mut reports: Vec<BatchReport> = Vec::new();
    let summary = driver
        .run(&dataset.records, |report| reports.push(report.clone()))
        .await;

    assert_eq!(summary.succeeded, 5);
    assert_eq!(summary.failed, 0);
    assert!(summary.is_clean());
    assert_eq!(
        reports.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec![
            "Batch 1/2: 3 rows ✓ (3 total)".to_string(),
            "Batch 2/2: 2 rows ✓ (5 total)".to_string(),
        ]
    );

    let requests = server.received_requests().await.unwrap();
    let first: JsonValue = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        first[0],
        json!({
            "firm_id": "F-1",
            "firm_name": "Ledger & Co 1",
            "latitude": null,
            "longitude": null,
            "for_sale": true,
            "last_updated": "2023-11-14T22:13:20+00:00"
        })
    );
    assert_eq!(first[1]["latitude"], json!(43.6));
    assert_eq!(first[1]["longitude"], json!(-116.2));
    assert_eq!(first[1]["for_sale"], json!(false));
}

#[tokio::test]
async fn test_upload_continues_past_failed_batch() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("firms_master.parquet");
    write_parquet(&file, &firms_batch(7));

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/firms"))
        .and(FirstFirm("F-4"))
        .respond_with(ResponseTemplate::new(500).set_body_string("statement timeout"))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/firms"))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&server)
        .await;

    let dataset = load_dataset(&file).unwrap();
    let driver = driver_for(&server, 3);

    let mut reports: Vec<BatchReport> = Vec::new();
    let summary = driver
        .run(&dataset.records, |report| reports.push(report.clone()))
        .await;

    assert_eq!(summary.succeeded, 4);
    assert_eq!(summary.failed, 3);
    assert_eq!(summary.batches, 3);
    assert_eq!(summary.failed_batches, 1);
    assert!(!summary.is_clean());

    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].outcome, BatchOutcome::Succeeded { cumulative: 3 });
    match &reports[1].outcome {
        BatchOutcome::Failed { reason } => assert!(reason.contains("statement timeout")),
        other => panic!("Expected failed batch, got {other:?}"),
    }
    assert!(reports[1].to_string().starts_with("Batch 2/3: ERROR — "));
    assert_eq!(reports[2].outcome, BatchOutcome::Succeeded { cumulative: 4 });
}

#[tokio::test]
async fn test_upload_every_batch_fails_when_unreachable() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("firms_master.parquet");
    write_parquet(&file, &firms_batch(4));

    let settings = Settings::new("http://127.0.0.1:9", "service-role-key").unwrap();
    let store = RestStore::new(&settings, Duration::from_secs(2)).unwrap();
    let driver =
        UploadDriver::new(store, Projector::firms(), UploadOptions::new().with_batch_size(2))
            .unwrap();

    let dataset = load_dataset(&file).unwrap();
    let summary = driver.run(&dataset.records, |_| {}).await;

    assert_eq!(summary.succeeded, 0);
    assert_eq!(summary.failed, 4);
    assert_eq!(summary.failed_batches, 2);
}

#[tokio::test]
async fn test_empty_dataset_sends_nothing() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("firms_master.parquet");
    write_parquet(&file, &firms_batch(0));

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let dataset = load_dataset(&file).unwrap();
    let summary = driver_for(&server, 500).run(&dataset.records, |_| {}).await;

    assert_eq!(summary.total_rows(), 0);
    assert_eq!(summary.batches, 0);
}

#[test]
fn test_missing_input_is_fatal() {
    let dir = tempdir().unwrap();
    let err = load_dataset(dir.path().join("firms_master.parquet")).unwrap_err();

    assert!(matches!(err, Error::InputNotFound { .. }));
    assert!(err.is_precondition());
}
