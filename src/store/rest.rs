//! PostgREST-backed row store

use super::{RowStore, UpsertAck};
use crate::config::Settings;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::types::{JsonObject, JsonValue};
use async_trait::async_trait;
use reqwest::header::CONTENT_RANGE;
use std::time::Duration;
use tracing::debug;

/// Path under the project endpoint where tables are exposed
pub const REST_PATH_PREFIX: &str = "rest/v1";

const UPSERT_PREFER: &str = "resolution=merge-duplicates,return=minimal,count=exact";

/// Row store speaking the PostgREST dialect
#[derive(Debug, Clone)]
pub struct RestStore {
    client: HttpClient,
}

impl RestStore {
    /// Connect to the project described by `settings`.
    ///
    /// The service key is sent both as `apikey` and as a bearer token.
    pub fn new(settings: &Settings, timeout: Duration) -> Result<Self> {
        let key = settings.service_key.expose();
        let config = HttpClientConfig::builder()
            .base_url(settings.endpoint.as_str())
            .timeout(timeout)
            .header("apikey", key)
            .header("Authorization", format!("Bearer {key}"))
            .build();

        Ok(Self {
            client: HttpClient::with_config(config)?,
        })
    }
}

#[async_trait]
impl RowStore for RestStore {
    async fn upsert(
        &self,
        table: &str,
        rows: &[JsonObject],
        on_conflict: &str,
    ) -> Result<UpsertAck> {
        let body = JsonValue::Array(rows.iter().cloned().map(JsonValue::Object).collect());
        let request = RequestConfig::new()
            .query("on_conflict", on_conflict)
            .header("Prefer", UPSERT_PREFER)
            .json(body);

        let path = format!("{REST_PATH_PREFIX}/{table}");
        let response = self.client.post_with_config(&path, request).await?;

        let affected = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .unwrap_or(rows.len());

        debug!("Upserted {} rows into {}", affected, table);
        Ok(UpsertAck { affected })
    }
}

/// Total from a `Content-Range` header such as `*/500` or `0-499/500`
fn parse_content_range_total(value: &str) -> Option<usize> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

#[cfg(test)]
mod range_tests {
    use super::parse_content_range_total;

    #[test]
    fn test_parse_content_range_total() {
        assert_eq!(parse_content_range_total("*/500"), Some(500));
        assert_eq!(parse_content_range_total("0-199/200"), Some(200));
        assert_eq!(parse_content_range_total("0-199/*"), None);
        assert_eq!(parse_content_range_total("garbage"), None);
    }
}
