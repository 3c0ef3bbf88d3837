//! The shared filter contract every provider adapter receives.
//!
//! [`ViolationFilters`] is built once per inbound request, normalized by the
//! aggregator, then handed unchanged to each adapter. The same filters are
//! re-applied centrally after merging (see [`ViolationFilters::matches`]) so
//! adapters that cannot push a filter down still produce a consistent page.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::violation::PropertyViolation;

/// Default page size when the caller gives no usable limit.
pub const DEFAULT_VIOLATION_LIMIT: i64 = 25;

/// Hard upper bound on a single page of violations.
pub const MAX_VIOLATION_LIMIT: i64 = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationFilters {
    /// Free-text search over address and description.
    pub query: Option<String>,
    pub city: Option<String>,
    /// Two-letter state code.
    pub state: Option<String>,
    pub status: Option<String>,
    /// Inclusive lower bound on the violation date.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the violation date.
    pub end_date: Option<NaiveDate>,
    pub limit: Option<i64>,
}

/// Resolve a caller-supplied limit: absent or non-positive falls back to the
/// default, anything above the maximum is clamped.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    match limit {
        Some(n) if n > 0 => n.min(MAX_VIOLATION_LIMIT),
        _ => DEFAULT_VIOLATION_LIMIT,
    }
}

impl ViolationFilters {
    /// Return a copy with blank strings dropped and `limit` resolved.
    pub fn normalized(&self) -> Self {
        Self {
            query: crate::types::non_blank(self.query.clone()),
            city: crate::types::non_blank(self.city.clone()),
            state: crate::types::non_blank(self.state.clone()).map(|s| s.to_uppercase()),
            status: crate::types::non_blank(self.status.clone()),
            start_date: self.start_date,
            end_date: self.end_date,
            limit: Some(clamp_limit(self.limit)),
        }
    }

    /// The resolved page size.
    pub fn effective_limit(&self) -> usize {
        clamp_limit(self.limit) as usize
    }

    pub fn has_date_bounds(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// Whether a merged item satisfies the query text, status and date filters.
    ///
    /// Jurisdiction (`city`/`state`) is not checked here: it selects providers,
    /// and each provider is trusted for its own records.
    pub fn matches(&self, item: &PropertyViolation) -> bool {
        self.matches_query(item) && self.matches_status(item) && self.matches_dates(item)
    }

    /// Whether an item lies in the requested state and city.
    ///
    /// Only needed where records are not pre-selected by provider coverage,
    /// i.e. the fixture set.
    pub fn matches_location(&self, item: &PropertyViolation) -> bool {
        self.state
            .as_deref()
            .map_or(true, |s| s.eq_ignore_ascii_case(&item.state))
            && self
                .city
                .as_deref()
                .map_or(true, |c| c.eq_ignore_ascii_case(&item.city))
    }

    fn matches_query(&self, item: &PropertyViolation) -> bool {
        let Some(query) = self.query.as_deref() else {
            return true;
        };
        let needle = query.to_lowercase();

        item.address.to_lowercase().contains(&needle)
            || item
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }

    fn matches_status(&self, item: &PropertyViolation) -> bool {
        match (self.status.as_deref(), item.status.as_deref()) {
            (None, _) => true,
            (Some(wanted), Some(actual)) => wanted.eq_ignore_ascii_case(actual.trim()),
            (Some(_), None) => false,
        }
    }

    fn matches_dates(&self, item: &PropertyViolation) -> bool {
        if !self.has_date_bounds() {
            return true;
        }
        let Some(date) = item.violation_date else {
            return false;
        };
        self.start_date.map_or(true, |start| date >= start)
            && self.end_date.map_or(true, |end| date <= end)
    }
}
