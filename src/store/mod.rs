//! Remote table store
//!
//! The upload driver talks to the destination through the `RowStore`
//! trait, one upsert call per batch.
//!
//! # Implementations
//!
//! - `RestStore` - PostgREST endpoint of a hosted project
//!   (`POST /rest/v1/{table}?on_conflict={key}` with merge-duplicates)

mod rest;

pub use rest::{RestStore, REST_PATH_PREFIX};

use crate::error::Result;
use crate::types::JsonObject;
use async_trait::async_trait;

/// Acknowledgment of a successful upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertAck {
    /// Rows inserted or updated, as reported by the store
    pub affected: usize,
}

/// A table store that accepts batched upserts
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Insert `rows` into `table`, updating rows whose `on_conflict` key
    /// already exists. The call succeeds or fails as a whole.
    async fn upsert(&self, table: &str, rows: &[JsonObject], on_conflict: &str)
        -> Result<UpsertAck>;
}
