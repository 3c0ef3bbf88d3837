//! Normalized violation records and the aggregated result page.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::ProviderId;

/// A single code-violation record, normalized from a provider's dialect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyViolation {
    /// `{source}:{source_id}`, unique across providers.
    pub id: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: Option<String>,
    pub status: Option<String>,
    pub violation_date: Option<NaiveDate>,
    pub description: Option<String>,
    /// Id of the provider that produced this record.
    pub source: ProviderId,
}

impl PropertyViolation {
    /// Compose the cross-provider id for a provider-local record id.
    pub fn compose_id(source: &str, source_id: &str) -> String {
        format!("{source}:{source_id}")
    }
}

/// One bounded page of merged violations plus query provenance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregationResult {
    pub items: Vec<PropertyViolation>,
    /// Every provider that was attempted, whether it succeeded or not.
    pub providers_queried: BTreeSet<ProviderId>,
    /// Providers that returned at least one record. Always a subset of
    /// `providers_queried`.
    pub providers_matched: BTreeSet<ProviderId>,
}

/// Newest first; records without a date go last.
///
/// `sort_by` is stable, so undated records keep their merge order.
pub fn sort_newest_first(items: &mut [PropertyViolation]) {
    items.sort_by(|a, b| match (a.violation_date, b.violation_date) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
