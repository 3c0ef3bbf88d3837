//! Request and result types for property enrichment.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::non_blank;

/// The property to enrich. Only `address` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EnrichmentRequest {
    #[serde(default)]
    pub address: String,
    pub city: Option<String>,
    pub state: Option<String>,
    #[serde(alias = "postalCode")]
    pub postal_code: Option<String>,
    #[serde(alias = "ownerName")]
    pub owner_name: Option<String>,
}

impl EnrichmentRequest {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.address.trim().is_empty() {
            return Err(CoreError::Validation("Address is required".to_string()));
        }
        Ok(())
    }

    /// Free-text query for imagery search: address, city and state joined.
    pub fn image_query(&self) -> String {
        [Some(self.address.clone()), self.city.clone(), self.state.clone()]
            .into_iter()
            .filter_map(non_blank)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn skip_trace_query(&self) -> SkipTraceQuery {
        SkipTraceQuery {
            owner_name: non_blank(self.owner_name.clone()),
            address: self.address.trim().to_string(),
            city: non_blank(self.city.clone()),
            state: non_blank(self.state.clone()),
            postal_code: non_blank(self.postal_code.clone()),
        }
    }

    pub fn mortgage_query(&self) -> MortgageQuery {
        MortgageQuery {
            address: self.address.trim().to_string(),
            city: non_blank(self.city.clone()),
            state: non_blank(self.state.clone()),
            postal_code: non_blank(self.postal_code.clone()),
        }
    }
}

/// Person-and-address input for an owner skip-trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkipTraceQuery {
    pub owner_name: Option<String>,
    pub address: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

/// Address input for a mortgage status lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MortgageQuery {
    pub address: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

/// Where an enrichment entity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Mock,
    /// The lookup was not configured or failed; see the entity's `message`.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<DataSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OwnerContact {
    pub name: Option<String>,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
    pub mailing_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<DataSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OwnerContact {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            source: Some(DataSource::Unavailable),
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn is_unavailable(&self) -> bool {
        self.source == Some(DataSource::Unavailable)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelinquencyStatus {
    Current,
    Delinquent,
    Default,
    Foreclosure,
    #[default]
    Unknown,
}

impl DelinquencyStatus {
    /// Map a vendor status label onto the known states.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "current" | "performing" | "paid" => Self::Current,
            "delinquent" | "late" | "past_due" | "past due" => Self::Delinquent,
            "default" | "defaulted" | "nod" => Self::Default,
            "foreclosure" | "pre-foreclosure" | "preforeclosure" | "reo" => Self::Foreclosure,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MortgageStatus {
    pub status: DelinquencyStatus,
    pub lender: Option<String>,
    pub loan_balance: Option<f64>,
    pub months_delinquent: Option<u32>,
    pub last_payment_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<DataSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MortgageStatus {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            source: Some(DataSource::Unavailable),
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn is_unavailable(&self) -> bool {
        self.source == Some(DataSource::Unavailable)
    }
}

/// Which integrations are live, and whether the process runs on fixtures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IntegrationStatus {
    pub google_drive: bool,
    pub skip_trace: bool,
    pub mortgage: bool,
    pub mock_mode: bool,
}

/// Best-effort composite of the three enrichment lookups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyEnrichment {
    pub image: Option<ImageRef>,
    pub owner: Option<OwnerContact>,
    pub mortgage: Option<MortgageStatus>,
    pub integrations: IntegrationStatus,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn request(address: &str) -> EnrichmentRequest {
        EnrichmentRequest {
            address: address.to_string(),
            city: Some("Detroit".to_string()),
            state: Some("MI".to_string()),
            postal_code: Some(" 48201 ".to_string()),
            owner_name: Some("  ".to_string()),
        }
    }

    #[test]
    fn blank_address_fails_validation() {
        assert_matches!(request("   ").validate(), Err(CoreError::Validation(_)));
        assert_matches!(
            EnrichmentRequest::default().validate(),
            Err(CoreError::Validation(_))
        );
        assert!(request("1 Woodward Ave").validate().is_ok());
    }

    #[test]
    fn image_query_joins_present_parts() {
        assert_eq!(
            request("1 Woodward Ave").image_query(),
            "1 Woodward Ave, Detroit, MI"
        );

        let bare = EnrichmentRequest {
            address: "1 Woodward Ave".to_string(),
            city: Some(" ".to_string()),
            ..Default::default()
        };
        assert_eq!(bare.image_query(), "1 Woodward Ave");
    }

    #[test]
    fn skip_trace_query_drops_blank_owner() {
        let query = request("1 Woodward Ave").skip_trace_query();
        assert_eq!(query.owner_name, None);
        assert_eq!(query.postal_code.as_deref(), Some("48201"));
    }

    #[test]
    fn camel_case_request_fields_are_accepted() {
        let request: EnrichmentRequest = serde_json::from_value(serde_json::json!({
            "address": "1 Woodward Ave",
            "postalCode": "48226",
            "ownerName": "Pat Doe"
        }))
        .unwrap();

        assert_eq!(request.postal_code.as_deref(), Some("48226"));
        assert_eq!(request.owner_name.as_deref(), Some("Pat Doe"));
    }

    #[test]
    fn delinquency_labels_map_to_states() {
        assert_eq!(DelinquencyStatus::from_label("Past Due"), DelinquencyStatus::Delinquent);
        assert_eq!(DelinquencyStatus::from_label("REO"), DelinquencyStatus::Foreclosure);
        assert_eq!(DelinquencyStatus::from_label("performing"), DelinquencyStatus::Current);
        assert_eq!(DelinquencyStatus::from_label("???"), DelinquencyStatus::Unknown);
    }

    #[test]
    fn unavailable_entities_serialize_source_and_message() {
        let json = serde_json::to_value(OwnerContact::unavailable("not configured")).unwrap();
        assert_eq!(json["source"], "unavailable");
        assert_eq!(json["message"], "not configured");

        let live = serde_json::to_value(OwnerContact {
            name: Some("Jane Roe".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert!(live.get("source").is_none());
    }
}
