//! Property enrichment orchestration.
//!
//! [`EnrichmentOrchestrator::enrich_property`] runs the imagery, skip-trace
//! and mortgage lookups for one property concurrently and assembles whatever
//! comes back. Each branch settles on its own: a failure or a missing
//! integration degrades that one field and never the whole response. The
//! only whole-request failure is a missing address, checked before any call
//! goes out.

pub mod capabilities;
pub mod types;

use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::aggregator::RunMode;
use crate::error::{CoreError, EnrichmentError};
use crate::fixtures;

pub use capabilities::{ImageLookup, MortgageLookup, SkipTrace, Unconfigured};
pub use types::{
    DataSource, DelinquencyStatus, EnrichmentRequest, ImageRef, IntegrationStatus, MortgageQuery,
    MortgageStatus, OwnerContact, PropertyEnrichment, SkipTraceQuery,
};

const SKIP_TRACE_NOT_CONFIGURED: &str = "Skip trace integration is not configured";
const MORTGAGE_NOT_CONFIGURED: &str = "Mortgage data integration is not configured";

#[derive(Clone)]
pub struct EnrichmentOrchestrator {
    images: Arc<dyn ImageLookup>,
    skip_trace: Arc<dyn SkipTrace>,
    mortgage: Arc<dyn MortgageLookup>,
}

impl std::fmt::Debug for EnrichmentOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnrichmentOrchestrator")
            .field("google_drive", &self.images.is_configured())
            .field("skip_trace", &self.skip_trace.is_configured())
            .field("mortgage", &self.mortgage.is_configured())
            .finish()
    }
}

impl EnrichmentOrchestrator {
    pub fn new(
        images: Arc<dyn ImageLookup>,
        skip_trace: Arc<dyn SkipTrace>,
        mortgage: Arc<dyn MortgageLookup>,
    ) -> Self {
        Self {
            images,
            skip_trace,
            mortgage,
        }
    }

    /// An orchestrator with no integrations configured.
    pub fn unconfigured() -> Self {
        Self::new(
            Arc::new(Unconfigured),
            Arc::new(Unconfigured),
            Arc::new(Unconfigured),
        )
    }

    /// Which live integrations are configured, plus the mock-mode flag.
    pub fn integration_status(&self, mode: RunMode) -> IntegrationStatus {
        IntegrationStatus {
            google_drive: self.images.is_configured(),
            skip_trace: self.skip_trace.is_configured(),
            mortgage: self.mortgage.is_configured(),
            mock_mode: mode.is_mock(),
        }
    }

    /// Look up imagery, owner contact and mortgage status for one property.
    ///
    /// In [`RunMode::Mock`] the fixture capabilities answer instead of the
    /// configured ones.
    pub async fn enrich_property(
        &self,
        request: &EnrichmentRequest,
        mode: RunMode,
        cancel: &CancellationToken,
    ) -> Result<PropertyEnrichment, CoreError> {
        request.validate()?;

        let integrations = self.integration_status(mode);
        let (images, skip_trace, mortgage) = if mode.is_mock() {
            fixtures::mock_capabilities()
        } else {
            (
                Arc::clone(&self.images),
                Arc::clone(&self.skip_trace),
                Arc::clone(&self.mortgage),
            )
        };

        let image_query = request.image_query();
        let skip_trace_query = request.skip_trace_query();
        let mortgage_query = request.mortgage_query();

        let (image, owner, mortgage) = tokio::join!(
            image_branch(images.as_ref(), &image_query, cancel),
            owner_branch(skip_trace.as_ref(), &skip_trace_query, cancel),
            mortgage_branch(mortgage.as_ref(), &mortgage_query, cancel),
        );

        tracing::info!(
            image = image.is_some(),
            owner = owner.as_ref().is_some_and(|o| !o.is_unavailable()),
            mortgage = mortgage.as_ref().is_some_and(|m| !m.is_unavailable()),
            mock_mode = integrations.mock_mode,
            "Property enrichment complete",
        );

        Ok(PropertyEnrichment {
            image,
            owner,
            mortgage,
            integrations,
        })
    }
}

/// Race one lookup against cancellation and log a failure.
async fn settle<T>(
    capability: &'static str,
    cancel: &CancellationToken,
    call: impl Future<Output = Result<T, EnrichmentError>>,
) -> Result<T, EnrichmentError> {
    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(EnrichmentError::Cancelled),
        result = call => result,
    };

    if let Err(e) = &outcome {
        tracing::warn!(capability, error = %e, "Enrichment lookup failed");
    }
    outcome
}

async fn image_branch(
    lookup: &dyn ImageLookup,
    query: &str,
    cancel: &CancellationToken,
) -> Option<ImageRef> {
    if !lookup.is_configured() {
        tracing::debug!("Image lookup not configured, skipping");
        return None;
    }
    settle("google_drive", cancel, lookup.find_property_image(query))
        .await
        .unwrap_or(None)
}

async fn owner_branch(
    lookup: &dyn SkipTrace,
    query: &SkipTraceQuery,
    cancel: &CancellationToken,
) -> Option<OwnerContact> {
    if !lookup.is_configured() {
        return Some(OwnerContact::unavailable(SKIP_TRACE_NOT_CONFIGURED));
    }
    match settle("skip_trace", cancel, lookup.skip_trace_owner(query)).await {
        Ok(owner) => owner,
        Err(e) => Some(OwnerContact::unavailable(format!(
            "Owner lookup failed: {e}"
        ))),
    }
}

async fn mortgage_branch(
    lookup: &dyn MortgageLookup,
    query: &MortgageQuery,
    cancel: &CancellationToken,
) -> Option<MortgageStatus> {
    if !lookup.is_configured() {
        return Some(MortgageStatus::unavailable(MORTGAGE_NOT_CONFIGURED));
    }
    match settle("mortgage", cancel, lookup.fetch_mortgage_status(query)).await {
        Ok(status) => status,
        Err(e) => Some(MortgageStatus::unavailable(format!(
            "Mortgage lookup failed: {e}"
        ))),
    }
}
