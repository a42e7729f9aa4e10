//! Batching
//!
//! Splits an ordered dataset into contiguous, bounded slices. Batches never
//! overlap, never reorder rows, and only the last one may be short.

mod batcher;

pub use batcher::{Batch, Batcher, DEFAULT_BATCH_SIZE};
