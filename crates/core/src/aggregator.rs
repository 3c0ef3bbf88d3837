//! Multi-provider violation aggregation.
//!
//! [`ViolationAggregator::fetch_violations`] fans one logical query out to
//! every provider that covers the requested jurisdiction, waits for all of
//! them (a failing provider never aborts the others), then merges, filters,
//! sorts and truncates the combined records into a single page.
//!
//! ```text
//! filters -> normalize -> registry candidates -> concurrent adapter calls
//!         -> settle all -> merge -> central filter -> sort -> truncate
//! ```

use std::sync::Arc;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;

use crate::error::ProviderError;
use crate::filters::ViolationFilters;
use crate::fixtures;
use crate::registry::ProviderRegistry;
use crate::types::ProviderId;
use crate::violation::{sort_newest_first, AggregationResult, PropertyViolation};

/// Whether requests are served by live providers or by the fixture set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Live,
    Mock,
}

impl RunMode {
    pub fn from_mock_flag(mock: bool) -> Self {
        if mock {
            Self::Mock
        } else {
            Self::Live
        }
    }

    pub fn is_mock(self) -> bool {
        self == Self::Mock
    }
}

#[derive(Debug, Clone)]
pub struct ViolationAggregator {
    registry: Arc<ProviderRegistry>,
}

impl ViolationAggregator {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Query every covering provider and return one merged, bounded page.
    ///
    /// Provider failures are logged and reflected only in provenance: the
    /// failing id stays in `providers_queried` and is absent from
    /// `providers_matched`. Cancelling `cancel` resolves every outstanding
    /// provider call as cancelled and returns whatever already completed.
    pub async fn fetch_violations(
        &self,
        filters: &ViolationFilters,
        mode: RunMode,
        cancel: &CancellationToken,
    ) -> AggregationResult {
        let filters = filters.normalized();

        if mode.is_mock() {
            return fixture_page(&filters);
        }

        let candidates = self.registry.providers_covering(&filters);
        tracing::debug!(
            candidates = candidates.len(),
            state = ?filters.state,
            city = ?filters.city,
            "Dispatching violation query",
        );

        let filters_ref = &filters;
        let calls = candidates.into_iter().map(|provider| {
            let id = provider.descriptor.id.clone();
            let adapter = Arc::clone(&provider.adapter);
            async move {
                let outcome = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Err(ProviderError::Cancelled),
                    result = adapter.query(filters_ref) => result,
                };
                (id, outcome)
            }
        });

        let outcomes = join_all(calls).await;
        let mut result = merge_outcomes(outcomes);
        result.items = finalize(std::mem::take(&mut result.items), &filters);

        tracing::info!(
            queried = result.providers_queried.len(),
            matched = result.providers_matched.len(),
            items = result.items.len(),
            "Violation query complete",
        );

        result
    }
}

/// Fold per-provider outcomes into provenance sets and a merged item list.
///
/// Items are concatenated in provider order, which is the tie-break order for
/// the stable sort that follows.
fn merge_outcomes(
    outcomes: Vec<(ProviderId, Result<Vec<PropertyViolation>, ProviderError>)>,
) -> AggregationResult {
    let mut result = AggregationResult::default();

    for (provider_id, outcome) in outcomes {
        match outcome {
            Ok(items) => {
                tracing::debug!(
                    provider_id = %provider_id,
                    count = items.len(),
                    "Provider responded",
                );
                if !items.is_empty() {
                    result.providers_matched.insert(provider_id.clone());
                }
                result.items.extend(items);
            }
            Err(ProviderError::Cancelled) => {
                tracing::debug!(provider_id = %provider_id, "Provider query cancelled");
            }
            Err(e) => {
                tracing::warn!(provider_id = %provider_id, error = %e, "Provider query failed");
            }
        }
        result.providers_queried.insert(provider_id);
    }

    result
}

/// Apply the central filters, order newest first and cut to the page size.
fn finalize(
    mut items: Vec<PropertyViolation>,
    filters: &ViolationFilters,
) -> Vec<PropertyViolation> {
    items.retain(|item| filters.matches(item));
    sort_newest_first(&mut items);
    items.truncate(filters.effective_limit());
    items
}

/// Serve a page from the fixture set instead of live providers.
fn fixture_page(filters: &ViolationFilters) -> AggregationResult {
    let items: Vec<_> = fixtures::violation_fixtures()
        .into_iter()
        .filter(|item| filters.matches_location(item))
        .collect();

    let mut result = AggregationResult {
        items: finalize(items, filters),
        ..Default::default()
    };
    result
        .providers_queried
        .insert(fixtures::MOCK_PROVIDER_ID.to_string());
    if !result.items.is_empty() {
        result
            .providers_matched
            .insert(fixtures::MOCK_PROVIDER_ID.to_string());
    }

    tracing::debug!(items = result.items.len(), "Served violations from fixtures");
    result
}
