//! Record model
//!
//! Loosely-typed rows as they come out of the columnar dataset.
//!
//! # Overview
//!
//! - `FieldValue` - tagged variant over every value shape a column can hold
//! - `Timestamp` - date, naive date-time, or offset-aware date-time
//! - `Record` - ordered mapping from field name to `FieldValue`

mod types;

pub use types::{FieldValue, Record, Timestamp};

#[cfg(test)]
mod tests;
