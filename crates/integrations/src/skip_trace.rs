//! Owner skip-trace over a JSON HTTP API.
//!
//! `POST {api_url}` with the [`SkipTraceQuery`] as the body and a bearer
//! API key. The service answers `{ "owner": {...} }`, `{ "owner": null }`
//! or `404` when it has no match.

use async_trait::async_trait;
use codewatch_core::enrichment::{DataSource, OwnerContact, SkipTrace, SkipTraceQuery};
use codewatch_core::error::EnrichmentError;
use serde::Deserialize;

use crate::http::{parse_optional, HttpError};

pub struct SkipTraceClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct SkipTraceResponse {
    owner: Option<WireOwner>,
}

#[derive(Debug, Deserialize)]
struct WireOwner {
    name: Option<String>,
    #[serde(default)]
    phones: Vec<String>,
    #[serde(default)]
    emails: Vec<String>,
    mailing_address: Option<String>,
}

impl SkipTraceClient {
    pub fn new(client: reqwest::Client, api_url: String, api_key: String) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl SkipTrace for SkipTraceClient {
    fn is_configured(&self) -> bool {
        !self.api_url.is_empty() && !self.api_key.is_empty()
    }

    async fn skip_trace_owner(
        &self,
        query: &SkipTraceQuery,
    ) -> Result<Option<OwnerContact>, EnrichmentError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(query)
            .send()
            .await
            .map_err(HttpError::from)?;

        let body: Option<SkipTraceResponse> = parse_optional(response).await?;
        Ok(body.and_then(|b| b.owner).map(into_contact))
    }
}

fn into_contact(owner: WireOwner) -> OwnerContact {
    OwnerContact {
        name: owner.name,
        phones: owner.phones,
        emails: owner.emails,
        mailing_address: owner.mailing_address,
        source: Some(DataSource::Live),
        message: None,
    }
}
