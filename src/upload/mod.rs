//! Upload driver
//!
//! Walks the dataset batch by batch, projects each batch, submits it as a
//! single upsert and tallies the outcome.
//!
//! # Overview
//!
//! - `UploadDriver` - sequential batch loop over a `RowStore`
//! - `UploadOptions` - table, conflict key and batch size
//! - `BatchReport` - per-batch progress handed to the caller
//! - `UploadSummary` - run totals
//!
//! A failed batch counts all of its rows as failed and the run moves on to
//! the next batch. Nothing is retried; re-running the whole upload is safe
//! because every write is an upsert on a stable key.

mod driver;
mod types;

pub use driver::UploadDriver;
pub use types::{BatchOutcome, BatchReport, UploadOptions, UploadSummary};
