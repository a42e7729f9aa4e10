//! Row filtering and projection
//!
//! Restricts a record to an allow-listed set of fields, normalizes each
//! surviving value, then applies per-field business coercions.
//!
//! # Overview
//!
//! - `Projector` - allow-list plus per-field policies
//! - `FieldPolicy` - `Passthrough`, `ForSaleFlag` or `Coordinate`
//! - `FIRM_FIELDS` - the production allow-list for the `firms` table
//!
//! Projection is pure and idempotent: projecting a projected row
//! (lifted back with `Record::from_json`) returns the same row.

mod policy;
mod projector;

pub use policy::{coerce_coordinate, coerce_for_sale, FieldPolicy};
pub use projector::{Projector, FIRM_FIELDS};
