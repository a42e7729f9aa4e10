//! Sequential batch upload loop

use super::types::{BatchOutcome, BatchReport, UploadOptions, UploadSummary};
use crate::batch::Batcher;
use crate::error::Result;
use crate::projection::Projector;
use crate::record::Record;
use crate::store::RowStore;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Uploads records to a row store in sequential batches
pub struct UploadDriver<S> {
    store: S,
    projector: Projector,
    options: UploadOptions,
}

impl<S: RowStore> UploadDriver<S> {
    /// Create a driver. Fails if `options` do not validate.
    pub fn new(store: S, projector: Projector, options: UploadOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            store,
            projector,
            options,
        })
    }

    /// Get the upload options
    pub fn options(&self) -> &UploadOptions {
        &self.options
    }

    /// Get the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Number of batches a run over `rows` rows will submit
    pub fn batch_count(&self, rows: usize) -> usize {
        Batcher::new(self.options.batch_size).count(rows)
    }

    /// Upload every record, one batch at a time.
    ///
    /// Each batch is awaited before the next is sent. A failing batch is
    /// reported through `on_progress` and counted; it never stops the run.
    pub async fn run<F>(&self, records: &[Record], mut on_progress: F) -> UploadSummary
    where
        F: FnMut(&BatchReport),
    {
        let start = Instant::now();
        let batcher = Batcher::new(self.options.batch_size);
        let mut summary = UploadSummary::new();

        info!(
            rows = records.len(),
            batches = batcher.count(records.len()),
            batch_size = batcher.max_size(),
            table = %self.options.table,
            "Starting upload"
        );

        for batch in batcher.split(records) {
            let rows = self.projector.project_all(batch.rows);
            let row_count = rows.len();

            let outcome = match self
                .store
                .upsert(&self.options.table, &rows, &self.options.conflict_key)
                .await
            {
                Ok(ack) => {
                    summary.add_success(row_count);
                    if ack.affected != row_count {
                        debug!(
                            batch = batch.index,
                            submitted = row_count,
                            affected = ack.affected,
                            "Store reported a different affected row count"
                        );
                    }
                    info!(
                        batch = batch.index,
                        total = batch.total,
                        rows = row_count,
                        cumulative = summary.succeeded,
                        "Batch uploaded"
                    );
                    BatchOutcome::Succeeded {
                        cumulative: summary.succeeded,
                    }
                }
                Err(e) => {
                    summary.add_failure(row_count);
                    warn!(
                        batch = batch.index,
                        total = batch.total,
                        rows = row_count,
                        error = %e,
                        "Batch failed"
                    );
                    BatchOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            };

            on_progress(&BatchReport {
                index: batch.index,
                total: batch.total,
                rows: row_count,
                outcome,
            });
        }

        summary.set_duration(start.elapsed().as_millis() as u64);

        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            duration_ms = summary.duration_ms,
            "Upload complete"
        );

        summary
    }
}
