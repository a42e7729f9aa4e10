//! # firm-upload
//!
//! Batch upload of the merged accounting-firm dataset into a hosted
//! PostgREST table.
//!
//! ## Features
//!
//! - **Parquet Input**: Reads every row of the merged dataset through Arrow
//! - **Wire Normalization**: Timestamps become ISO-8601 text, `NaN` becomes null
//! - **Field Projection**: Only the allow-listed firm columns are sent
//! - **Batched Upsert**: Rows are merged on `firm_id`, 500 per request by default
//! - **Partial Failure**: A failed batch is counted and the run moves on
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use firm_upload::config::Settings;
//! use firm_upload::projection::Projector;
//! use firm_upload::source::load_dataset;
//! use firm_upload::store::RestStore;
//! use firm_upload::upload::{UploadDriver, UploadOptions};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> firm_upload::Result<()> {
//!     let settings = Settings::from_env()?;
//!     let dataset = load_dataset("firms_master.parquet")?;
//!
//!     let store = RestStore::new(&settings, Duration::from_secs(30))?;
//!     let driver = UploadDriver::new(store, Projector::firms(), UploadOptions::default())?;
//!
//!     let summary = driver.run(&dataset.records, |report| println!("{report}")).await;
//!     println!("{} rows succeeded, {} errors", summary.succeeded, summary.failed);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌───────────┐   ┌───────────┐   ┌─────────┐   ┌───────────┐
//! │  Source  │ → │ Normalize │ → │  Project  │ → │  Batch  │ → │   Store   │
//! │ parquet  │   │ JSON-safe │   │ allow-list│   │ 500/req │   │ PostgREST │
//! └──────────┘   └───────────┘   └───────────┘   └─────────┘   └───────────┘
//!                                       Upload driver: sequential, tolerant
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
// Allow common clippy pedantic lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Source rows and cell values
pub mod record;

/// Cell value normalization for the wire
pub mod normalize;

/// Field allow-list and column coercions
pub mod projection;

/// Fixed-size batching
pub mod batch;

/// HTTP client
pub mod http;

/// Remote table store
pub mod store;

/// Endpoint and credential settings
pub mod config;

/// Parquet input
pub mod source;

/// Batch upload driver
pub mod upload;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use projection::Projector;
pub use record::{FieldValue, Record};
pub use upload::{UploadDriver, UploadOptions, UploadSummary};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
