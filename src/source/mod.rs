//! Dataset source
//!
//! Reads the merged firms parquet file into `Record`s.
//!
//! # Overview
//!
//! - `load_dataset` - open, decode and collect every row
//! - `Dataset` - the rows plus the column names found in the file
//! - `batch_to_records` - Arrow `RecordBatch` to records, one cell at a time

mod convert;
mod reader;

pub use convert::{array_value_to_field, batch_to_records};
pub use reader::{load_dataset, Dataset};
