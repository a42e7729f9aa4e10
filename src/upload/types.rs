//! Upload types
//!
//! Options, per-batch reports and run totals for the upload driver.

use crate::batch::DEFAULT_BATCH_SIZE;
use crate::error::{Error, Result};
use crate::types::{DEFAULT_CONFLICT_KEY, DEFAULT_TABLE};

/// Configuration for an upload run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    /// Destination table
    pub table: String,
    /// Column used as the upsert conflict target
    pub conflict_key: String,
    /// Maximum rows per upsert call
    pub batch_size: usize,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            conflict_key: DEFAULT_CONFLICT_KEY.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl UploadOptions {
    /// Create options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set destination table
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Set conflict key
    #[must_use]
    pub fn with_conflict_key(mut self, key: impl Into<String>) -> Self {
        self.conflict_key = key.into();
        self
    }

    /// Set batch size
    #[must_use]
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Reject options that cannot produce a meaningful run
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::invalid_value("batch_size", "must be at least 1"));
        }
        if self.table.trim().is_empty() {
            return Err(Error::invalid_value("table", "must not be empty"));
        }
        if self.conflict_key.trim().is_empty() {
            return Err(Error::invalid_value("on_conflict", "must not be empty"));
        }
        Ok(())
    }
}

/// How a single batch ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The store accepted the batch
    Succeeded {
        /// Rows succeeded so far in the run, including this batch
        cumulative: usize,
    },
    /// The store call failed; every row of the batch counts as failed
    Failed {
        /// Error text from the store call
        reason: String,
    },
}

/// Progress notification for one batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// 1-based batch index
    pub index: usize,
    /// Number of batches in the run
    pub total: usize,
    /// Rows in this batch
    pub rows: usize,
    /// What happened
    pub outcome: BatchOutcome,
}

impl BatchReport {
    /// Whether the batch was accepted
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, BatchOutcome::Succeeded { .. })
    }
}

impl std::fmt::Display for BatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.outcome {
            BatchOutcome::Succeeded { cumulative } => write!(
                f,
                "Batch {}/{}: {} rows ✓ ({} total)",
                self.index, self.total, self.rows, cumulative
            ),
            BatchOutcome::Failed { reason } => {
                write!(f, "Batch {}/{}: ERROR — {}", self.index, self.total, reason)
            }
        }
    }
}

/// Totals for an upload run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSummary {
    /// Rows in batches the store accepted
    pub succeeded: usize,
    /// Rows in batches the store rejected
    pub failed: usize,
    /// Batches attempted
    pub batches: usize,
    /// Batches that failed
    pub failed_batches: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl UploadSummary {
    /// Create empty totals
    pub fn new() -> Self {
        Self::default()
    }

    /// Count an accepted batch
    pub fn add_success(&mut self, rows: usize) {
        self.succeeded += rows;
        self.batches += 1;
    }

    /// Count a rejected batch
    pub fn add_failure(&mut self, rows: usize) {
        self.failed += rows;
        self.batches += 1;
        self.failed_batches += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }

    /// Rows attempted
    pub fn total_rows(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Whether every batch was accepted
    pub fn is_clean(&self) -> bool {
        self.failed_batches == 0
    }
}
