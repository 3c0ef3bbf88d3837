//! The three enrichment capabilities and their not-configured stand-ins.

use async_trait::async_trait;

use crate::error::EnrichmentError;

use super::types::{ImageRef, MortgageQuery, MortgageStatus, OwnerContact, SkipTraceQuery};

/// Finds a photo of a property from a free-text address query.
#[async_trait]
pub trait ImageLookup: Send + Sync {
    /// `false` when credentials are missing; the orchestrator then skips the
    /// call entirely.
    fn is_configured(&self) -> bool;

    async fn find_property_image(&self, query: &str) -> Result<Option<ImageRef>, EnrichmentError>;
}

/// Owner-contact lookup by name and address.
#[async_trait]
pub trait SkipTrace: Send + Sync {
    fn is_configured(&self) -> bool;

    async fn skip_trace_owner(
        &self,
        query: &SkipTraceQuery,
    ) -> Result<Option<OwnerContact>, EnrichmentError>;
}

/// Mortgage delinquency lookup by address.
#[async_trait]
pub trait MortgageLookup: Send + Sync {
    fn is_configured(&self) -> bool;

    async fn fetch_mortgage_status(
        &self,
        query: &MortgageQuery,
    ) -> Result<Option<MortgageStatus>, EnrichmentError>;
}

/// Stand-in for any capability whose credentials are absent.
///
/// Reports itself as unconfigured and returns nothing if called anyway.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

#[async_trait]
impl ImageLookup for Unconfigured {
    fn is_configured(&self) -> bool {
        false
    }

    async fn find_property_image(&self, _query: &str) -> Result<Option<ImageRef>, EnrichmentError> {
        Ok(None)
    }
}

#[async_trait]
impl SkipTrace for Unconfigured {
    fn is_configured(&self) -> bool {
        false
    }

    async fn skip_trace_owner(
        &self,
        _query: &SkipTraceQuery,
    ) -> Result<Option<OwnerContact>, EnrichmentError> {
        Ok(None)
    }
}

#[async_trait]
impl MortgageLookup for Unconfigured {
    fn is_configured(&self) -> bool {
        false
    }

    async fn fetch_mortgage_status(
        &self,
        _query: &MortgageQuery,
    ) -> Result<Option<MortgageStatus>, EnrichmentError> {
        Ok(None)
    }
}
