//! Query parameter types for API handlers.
//!
//! Query strings arrive as plain strings and are parsed leniently: a value
//! that cannot be understood is logged and ignored instead of rejecting the
//! whole request.

use codewatch_core::filters::ViolationFilters;
use codewatch_core::types::{non_blank, parse_date};
use serde::Deserialize;

/// `GET /api/v1/violations` parameters.
///
/// Dates accept both `start_date` and `startDate` spellings.
#[derive(Debug, Default, Deserialize)]
pub struct ViolationQueryParams {
    #[serde(alias = "q")]
    pub query: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub status: Option<String>,
    #[serde(alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(alias = "endDate")]
    pub end_date: Option<String>,
    pub limit: Option<String>,
}

impl ViolationQueryParams {
    pub fn into_filters(self) -> ViolationFilters {
        ViolationFilters {
            query: non_blank(self.query),
            city: non_blank(self.city),
            state: non_blank(self.state),
            status: non_blank(self.status),
            start_date: lenient_date("start_date", self.start_date),
            end_date: lenient_date("end_date", self.end_date),
            limit: lenient_limit(self.limit),
        }
    }
}

fn lenient_date(param: &'static str, raw: Option<String>) -> Option<chrono::NaiveDate> {
    let raw = non_blank(raw)?;
    let parsed = parse_date(&raw);
    if parsed.is_none() {
        tracing::warn!(param, value = %raw, "Ignoring unparseable date parameter");
    }
    parsed
}

fn lenient_limit(raw: Option<String>) -> Option<i64> {
    let raw = non_blank(raw)?;
    match raw.parse::<i64>() {
        Ok(limit) => Some(limit),
        Err(e) => {
            tracing::warn!(value = %raw, error = %e, "Ignoring non-numeric limit parameter");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn camel_case_dates_are_accepted() {
        let params: ViolationQueryParams = serde_json::from_value(serde_json::json!({
            "startDate": "2024-01-01",
            "endDate": "03/31/2024"
        }))
        .unwrap();

        let filters = params.into_filters();
        assert_eq!(filters.start_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(filters.end_date, NaiveDate::from_ymd_opt(2024, 3, 31));
    }

    #[test]
    fn unparseable_values_are_dropped() {
        let params = ViolationQueryParams {
            start_date: Some("last tuesday".into()),
            limit: Some("lots".into()),
            city: Some("   ".into()),
            ..Default::default()
        };

        let filters = params.into_filters();
        assert_eq!(filters, ViolationFilters::default());
    }

    #[test]
    fn negative_limit_passes_through_for_clamping() {
        let params = ViolationQueryParams {
            limit: Some("-5".into()),
            ..Default::default()
        };
        assert_eq!(params.into_filters().limit, Some(-5));
    }
}
