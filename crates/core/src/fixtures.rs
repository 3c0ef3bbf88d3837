//! Canned data served when the process runs in mock mode.
//!
//! Lets the UI and demos work without provider access or integration
//! credentials. Fixture records go through the same filter, sort and
//! truncate pipeline as live results.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::enrichment::{
    DataSource, DelinquencyStatus, ImageLookup, ImageRef, MortgageLookup, MortgageQuery,
    MortgageStatus, OwnerContact, SkipTrace, SkipTraceQuery,
};
use crate::error::EnrichmentError;
use crate::violation::PropertyViolation;

/// Provider id stamped on every fixture record.
pub const MOCK_PROVIDER_ID: &str = "mock";

struct Row {
    id: &'static str,
    address: &'static str,
    city: &'static str,
    state: &'static str,
    zip: &'static str,
    status: &'static str,
    date: Option<(i32, u32, u32)>,
    description: &'static str,
}

const ROWS: &[Row] = &[
    Row {
        id: "1001",
        address: "4521 S Wabash Ave",
        city: "Chicago",
        state: "IL",
        zip: "60653",
        status: "Open",
        date: Some((2024, 9, 12)),
        description: "Failed to maintain exterior porch in sound condition",
    },
    Row {
        id: "1002",
        address: "1187 Fulton St",
        city: "Brooklyn",
        state: "NY",
        zip: "11238",
        status: "Open",
        date: Some((2024, 8, 30)),
        description: "Peeling lead-based paint in common hallway",
    },
    Row {
        id: "1003",
        address: "2250 Mission St",
        city: "San Francisco",
        state: "CA",
        zip: "94110",
        status: "Closed",
        date: Some((2024, 6, 3)),
        description: "Unpermitted rear deck construction",
    },
    Row {
        id: "1004",
        address: "901 E 14th St",
        city: "Los Angeles",
        state: "CA",
        zip: "90021",
        status: "Open",
        date: Some((2024, 10, 1)),
        description: "Accumulation of junk and debris in yard",
    },
    Row {
        id: "1005",
        address: "77 W Division St",
        city: "Chicago",
        state: "IL",
        zip: "60610",
        status: "Complied",
        date: Some((2023, 12, 18)),
        description: "Broken window glazing on second floor",
    },
    Row {
        id: "1006",
        address: "3310 Grand River Ave",
        city: "Detroit",
        state: "MI",
        zip: "48208",
        status: "Open",
        date: None,
        description: "Vacant structure open to trespass",
    },
    Row {
        id: "1007",
        address: "640 Ocean Ave",
        city: "Brooklyn",
        state: "NY",
        zip: "11226",
        status: "Open",
        date: Some((2024, 3, 22)),
        description: "No heat or hot water reported",
    },
    Row {
        id: "1008",
        address: "18 Elm St",
        city: "Detroit",
        state: "MI",
        zip: "48201",
        status: "Closed",
        date: None,
        description: "Overgrown weeds exceeding height limit",
    },
];

/// The fixed fixture set, in declaration order.
pub fn violation_fixtures() -> Vec<PropertyViolation> {
    ROWS.iter()
        .map(|row| PropertyViolation {
            id: PropertyViolation::compose_id(MOCK_PROVIDER_ID, row.id),
            address: row.address.to_string(),
            city: row.city.to_string(),
            state: row.state.to_string(),
            zip: Some(row.zip.to_string()),
            status: Some(row.status.to_string()),
            violation_date: row
                .date
                .and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            description: Some(row.description.to_string()),
            source: MOCK_PROVIDER_ID.to_string(),
        })
        .collect()
}

/// Fixture capabilities for mock-mode enrichment.
pub fn mock_capabilities() -> (
    Arc<dyn ImageLookup>,
    Arc<dyn SkipTrace>,
    Arc<dyn MortgageLookup>,
) {
    (Arc::new(MockImages), Arc::new(MockSkipTrace), Arc::new(MockMortgage))
}

struct MockImages;

#[async_trait]
impl ImageLookup for MockImages {
    fn is_configured(&self) -> bool {
        true
    }

    async fn find_property_image(&self, query: &str) -> Result<Option<ImageRef>, EnrichmentError> {
        Ok(Some(ImageRef {
            url: "https://placehold.co/800x600?text=Property".to_string(),
            thumbnail_url: Some("https://placehold.co/200x150?text=Property".to_string()),
            name: Some(query.to_string()),
            source: Some(DataSource::Mock),
        }))
    }
}

struct MockSkipTrace;

#[async_trait]
impl SkipTrace for MockSkipTrace {
    fn is_configured(&self) -> bool {
        true
    }

    async fn skip_trace_owner(
        &self,
        query: &SkipTraceQuery,
    ) -> Result<Option<OwnerContact>, EnrichmentError> {
        Ok(Some(OwnerContact {
            name: Some(
                query
                    .owner_name
                    .clone()
                    .unwrap_or_else(|| "Jordan Example".to_string()),
            ),
            phones: vec!["(555) 010-4477".to_string()],
            emails: vec!["owner@example.com".to_string()],
            mailing_address: Some(query.address.clone()),
            source: Some(DataSource::Mock),
            message: None,
        }))
    }
}

struct MockMortgage;

#[async_trait]
impl MortgageLookup for MockMortgage {
    fn is_configured(&self) -> bool {
        true
    }

    async fn fetch_mortgage_status(
        &self,
        _query: &MortgageQuery,
    ) -> Result<Option<MortgageStatus>, EnrichmentError> {
        Ok(Some(MortgageStatus {
            status: DelinquencyStatus::Delinquent,
            lender: Some("Example Savings Bank".to_string()),
            loan_balance: Some(182_400.0),
            months_delinquent: Some(4),
            last_payment_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            source: Some(DataSource::Mock),
            message: None,
        }))
    }
}
