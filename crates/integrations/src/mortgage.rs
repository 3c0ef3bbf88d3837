//! Mortgage delinquency status over a JSON HTTP API.
//!
//! `POST {api_url}` with the [`MortgageQuery`] as the body and a bearer API
//! key; `404` means no loan on record.

use async_trait::async_trait;
use codewatch_core::enrichment::{
    DataSource, DelinquencyStatus, MortgageLookup, MortgageQuery, MortgageStatus,
};
use codewatch_core::error::EnrichmentError;
use codewatch_core::types::parse_date;
use serde::Deserialize;

use crate::http::{parse_optional, HttpError};

pub struct MortgageClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct WireMortgage {
    status: Option<String>,
    lender: Option<String>,
    loan_balance: Option<f64>,
    months_delinquent: Option<u32>,
    last_payment_date: Option<String>,
}

impl MortgageClient {
    pub fn new(client: reqwest::Client, api_url: String, api_key: String) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl MortgageLookup for MortgageClient {
    fn is_configured(&self) -> bool {
        !self.api_url.is_empty() && !self.api_key.is_empty()
    }

    async fn fetch_mortgage_status(
        &self,
        query: &MortgageQuery,
    ) -> Result<Option<MortgageStatus>, EnrichmentError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(query)
            .send()
            .await
            .map_err(HttpError::from)?;

        let body: Option<WireMortgage> = parse_optional(response).await?;
        Ok(body.map(into_status))
    }
}

fn into_status(wire: WireMortgage) -> MortgageStatus {
    MortgageStatus {
        status: wire
            .status
            .as_deref()
            .map(DelinquencyStatus::from_label)
            .unwrap_or_default(),
        lender: wire.lender,
        loan_balance: wire.loan_balance,
        months_delinquent: wire.months_delinquent,
        last_payment_date: wire.last_payment_date.as_deref().and_then(parse_date),
        source: Some(DataSource::Live),
        message: None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn maps_vendor_payload() {
        let wire: WireMortgage = serde_json::from_value(serde_json::json!({
            "status": "Pre-Foreclosure",
            "lender": "First Lakeshore",
            "loan_balance": 210500.25,
            "months_delinquent": 7,
            "last_payment_date": "02/01/2024"
        }))
        .unwrap();

        let status = into_status(wire);
        assert_eq!(status.status, DelinquencyStatus::Foreclosure);
        assert_eq!(status.months_delinquent, Some(7));
        assert_eq!(status.last_payment_date, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(status.source, Some(DataSource::Live));
    }

    #[test]
    fn missing_status_is_unknown() {
        let wire: WireMortgage = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(into_status(wire).status, DelinquencyStatus::Unknown);
    }
}
