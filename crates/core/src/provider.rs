//! The capability every violation data provider implements.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::filters::ViolationFilters;
use crate::violation::PropertyViolation;

/// Translates normalized filters into a provider-specific query and maps the
/// response back into [`PropertyViolation`]s.
///
/// Implementations own their transport, timeouts and dialect. The aggregator
/// may drop the returned future at any await point when the inbound request
/// is cancelled, so implementations must not rely on running to completion.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    async fn query(
        &self,
        filters: &ViolationFilters,
    ) -> Result<Vec<PropertyViolation>, ProviderError>;
}
