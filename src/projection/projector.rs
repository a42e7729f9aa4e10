//! Allow-list projector

use super::policy::FieldPolicy;
use crate::normalize::normalize_value;
use crate::record::Record;
use crate::types::JsonObject;
use std::collections::{HashMap, HashSet};

/// Columns of the merged firms dataset that the `firms` table accepts
pub const FIRM_FIELDS: &[&str] = &[
    "firm_id",
    "firm_name",
    "city",
    "state",
    "full_address",
    "zip_code",
    "phone",
    "website",
    "email",
    "annual_revenue",
    "estimated_revenue",
    "revenue_confidence",
    "asking_price",
    "employee_count",
    "estimated_employee_count",
    "employee_count_confidence",
    "for_sale",
    "sale_status",
    "broker_name",
    "listing_notes",
    "google_rating",
    "google_review_count",
    "credentials",
    "year_established",
    "software",
    "latitude",
    "longitude",
    "sources",
    "source",
    "client_segment",
    "client_segment_confidence",
    "wealth_mgmt_potential",
    "primary_service",
    "classification_signals",
    "acquisition_tier",
    "acquisition_score",
    "first_seen",
    "last_updated",
];

/// Projects records onto an allow-list, normalizing and coercing values
#[derive(Debug, Clone, Default)]
pub struct Projector {
    allowed: HashSet<String>,
    policies: HashMap<String, FieldPolicy>,
}

impl Projector {
    /// Create a projector over the given allow-list, with no special policies
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: fields.into_iter().map(Into::into).collect(),
            policies: HashMap::new(),
        }
    }

    /// Projector for the `firms` table
    pub fn firms() -> Self {
        Self::new(FIRM_FIELDS.iter().copied())
            .with_policy("for_sale", FieldPolicy::ForSaleFlag)
            .with_policy("latitude", FieldPolicy::Coordinate)
            .with_policy("longitude", FieldPolicy::Coordinate)
    }

    /// Attach a coercion policy to a field.
    ///
    /// The policy only takes effect if the field is also allow-listed.
    #[must_use]
    pub fn with_policy(mut self, field: impl Into<String>, policy: FieldPolicy) -> Self {
        self.policies.insert(field.into(), policy);
        self
    }

    /// Whether a field survives projection
    pub fn allows(&self, field: &str) -> bool {
        self.allowed.contains(field)
    }

    /// Policy for a field (`Passthrough` when none is set)
    pub fn policy(&self, field: &str) -> FieldPolicy {
        self.policies.get(field).copied().unwrap_or_default()
    }

    /// Number of allow-listed fields
    pub fn field_count(&self) -> usize {
        self.allowed.len()
    }

    /// Project a single record.
    ///
    /// The result holds exactly the allow-listed fields present in `record`.
    pub fn project(&self, record: &Record) -> JsonObject {
        record
            .iter()
            .filter(|(name, _)| self.allows(name))
            .map(|(name, value)| {
                let normalized = normalize_value(value);
                (name.to_string(), self.policy(name).apply(normalized))
            })
            .collect()
    }

    /// Project a slice of records, preserving order
    pub fn project_all(&self, records: &[Record]) -> Vec<JsonObject> {
        records.iter().map(|r| self.project(r)).collect()
    }
}
