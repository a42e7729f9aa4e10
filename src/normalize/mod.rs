//! Value normalization
//!
//! Turns a loosely-typed cell into a value the remote store accepts.
//!
//! # Rules
//!
//! - Missing values (`Null`, `NaN`) become `null`
//! - Booleans, integers, finite floats and strings pass through
//! - Dates and timestamps become ISO-8601 strings
//! - Lists and structs become their JSON text for the destination's
//!   text columns

mod value;

pub use value::{normalize_value, to_json};
