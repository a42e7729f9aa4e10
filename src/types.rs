//! Common types used throughout firm-upload
//!
//! Type aliases for the wire representation shared by the projector,
//! the upload driver and the remote store.

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type. One projected row on the wire.
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Constants
// ============================================================================

/// Destination table for the firms dataset
pub const DEFAULT_TABLE: &str = "firms";

/// Conflict target used by the upsert
pub const DEFAULT_CONFLICT_KEY: &str = "firm_id";

/// Default location of the merged dataset, relative to the working directory
pub const DEFAULT_INPUT_PATH: &str = "../accounting-firm-explorer/data/merged/firms_master.parquet";
