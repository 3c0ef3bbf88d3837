//! Static catalog of violation providers and their jurisdiction coverage.
//!
//! The registry is built once at startup and never mutated afterwards. It is
//! the only place that knows which provider covers which city or state; the
//! aggregator asks it for candidates and never branches on provider identity.

use std::sync::Arc;

use serde::Serialize;

use crate::error::CoreError;
use crate::filters::ViolationFilters;
use crate::provider::ProviderAdapter;
use crate::types::ProviderId;

/// State code that denotes nationwide coverage.
pub const NATIONWIDE: &str = "US";

/// One coverage entry: a whole state, or a single city within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Jurisdiction {
    pub state: String,
    pub city: Option<String>,
}

impl Jurisdiction {
    pub fn state(state: &str) -> Self {
        Self {
            state: state.to_string(),
            city: None,
        }
    }

    pub fn city(city: &str, state: &str) -> Self {
        Self {
            state: state.to_string(),
            city: Some(city.to_string()),
        }
    }

    pub fn nationwide() -> Self {
        Self::state(NATIONWIDE)
    }

    pub fn is_nationwide(&self) -> bool {
        self.city.is_none() && self.state.eq_ignore_ascii_case(NATIONWIDE)
    }

    /// Whether this entry covers the requested state and/or city.
    fn covers(&self, state: Option<&str>, city: Option<&str>) -> bool {
        if let Some(state) = state {
            if !self.state.eq_ignore_ascii_case(state) {
                return false;
            }
        }
        match (city, self.city.as_deref()) {
            (None, _) => true,
            (Some(_), None) => state.is_some(),
            (Some(wanted), Some(own)) => own.eq_ignore_ascii_case(wanted),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderDescriptor {
    pub id: ProviderId,
    pub name: String,
    pub jurisdiction: Vec<Jurisdiction>,
}

impl ProviderDescriptor {
    pub fn is_nationwide(&self) -> bool {
        self.jurisdiction.iter().any(Jurisdiction::is_nationwide)
    }
}

/// Listing view of a provider for the providers endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderSummary {
    pub id: ProviderId,
    pub name: String,
    pub jurisdiction: Vec<Jurisdiction>,
    pub nationwide: bool,
}

impl From<&ProviderDescriptor> for ProviderSummary {
    fn from(descriptor: &ProviderDescriptor) -> Self {
        Self {
            id: descriptor.id.clone(),
            name: descriptor.name.clone(),
            jurisdiction: descriptor.jurisdiction.clone(),
            nationwide: descriptor.is_nationwide(),
        }
    }
}

/// A descriptor paired with the adapter that serves it.
#[derive(Clone)]
pub struct RegisteredProvider {
    pub descriptor: ProviderDescriptor,
    pub adapter: Arc<dyn ProviderAdapter>,
}

impl std::fmt::Debug for RegisteredProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredProvider")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<RegisteredProvider>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from `(descriptor, adapter)` pairs, preserving order.
    pub fn from_providers(
        providers: impl IntoIterator<Item = (ProviderDescriptor, Arc<dyn ProviderAdapter>)>,
    ) -> Result<Self, CoreError> {
        let mut registry = Self::new();
        for (descriptor, adapter) in providers {
            registry.register(descriptor, adapter)?;
        }
        Ok(registry)
    }

    /// Append a provider. Ids must be unique.
    pub fn register(
        &mut self,
        descriptor: ProviderDescriptor,
        adapter: Arc<dyn ProviderAdapter>,
    ) -> Result<(), CoreError> {
        if self.providers.iter().any(|p| p.descriptor.id == descriptor.id) {
            return Err(CoreError::Validation(format!(
                "Provider '{}' is already registered",
                descriptor.id
            )));
        }
        self.providers.push(RegisteredProvider { descriptor, adapter });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// All descriptors in registration order.
    pub fn list_providers(&self) -> Vec<&ProviderDescriptor> {
        self.providers.iter().map(|p| &p.descriptor).collect()
    }

    pub fn list_provider_summaries(&self) -> Vec<ProviderSummary> {
        self.providers
            .iter()
            .map(|p| ProviderSummary::from(&p.descriptor))
            .collect()
    }

    /// Providers whose coverage matches the filters' state/city, plus every
    /// nationwide provider. With neither state nor city, all providers.
    pub fn providers_covering(&self, filters: &ViolationFilters) -> Vec<&RegisteredProvider> {
        let state = filters.state.as_deref();
        let city = filters.city.as_deref();

        if state.is_none() && city.is_none() {
            return self.providers.iter().collect();
        }

        self.providers
            .iter()
            .filter(|p| {
                p.descriptor.is_nationwide()
                    || p.descriptor
                        .jurisdiction
                        .iter()
                        .any(|j| j.covers(state, city))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;
    use crate::error::ProviderError;
    use crate::violation::PropertyViolation;

    struct NoopAdapter;

    #[async_trait]
    impl ProviderAdapter for NoopAdapter {
        async fn query(
            &self,
            _filters: &ViolationFilters,
        ) -> Result<Vec<PropertyViolation>, ProviderError> {
            Ok(Vec::new())
        }
    }

    fn descriptor(id: &str, jurisdiction: Vec<Jurisdiction>) -> ProviderDescriptor {
        ProviderDescriptor {
            id: id.to_string(),
            name: id.to_uppercase(),
            jurisdiction,
        }
    }

    fn registry() -> ProviderRegistry {
        ProviderRegistry::from_providers([
            (
                descriptor("chicago", vec![Jurisdiction::city("Chicago", "IL")]),
                Arc::new(NoopAdapter) as Arc<dyn ProviderAdapter>,
            ),
            (
                descriptor("california", vec![Jurisdiction::state("CA")]),
                Arc::new(NoopAdapter) as Arc<dyn ProviderAdapter>,
            ),
            (
                descriptor(
                    "bay_area",
                    vec![
                        Jurisdiction::city("San Francisco", "CA"),
                        Jurisdiction::city("Oakland", "CA"),
                    ],
                ),
                Arc::new(NoopAdapter) as Arc<dyn ProviderAdapter>,
            ),
            (
                descriptor("national", vec![Jurisdiction::nationwide()]),
                Arc::new(NoopAdapter) as Arc<dyn ProviderAdapter>,
            ),
        ])
        .unwrap()
    }

    fn candidate_ids(registry: &ProviderRegistry, filters: &ViolationFilters) -> Vec<String> {
        registry
            .providers_covering(filters)
            .iter()
            .map(|p| p.descriptor.id.clone())
            .collect()
    }

    #[test]
    fn list_preserves_registration_order() {
        let registry = registry();
        let ids: Vec<_> = registry
            .list_providers()
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, ["chicago", "california", "bay_area", "national"]);
    }

    #[test]
    fn no_location_selects_all_providers() {
        let ids = candidate_ids(&registry(), &ViolationFilters::default());
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn state_filter_selects_state_and_nationwide() {
        let filters = ViolationFilters {
            state: Some("ca".into()),
            ..Default::default()
        };
        assert_eq!(
            candidate_ids(&registry(), &filters),
            ["california", "bay_area", "national"]
        );
    }

    #[test]
    fn city_and_state_selects_whole_state_and_matching_city() {
        let filters = ViolationFilters {
            state: Some("CA".into()),
            city: Some("oakland".into()),
            ..Default::default()
        };
        assert_eq!(
            candidate_ids(&registry(), &filters),
            ["california", "bay_area", "national"]
        );

        let filters = ViolationFilters {
            state: Some("CA".into()),
            city: Some("Fresno".into()),
            ..Default::default()
        };
        assert_eq!(candidate_ids(&registry(), &filters), ["california", "national"]);
    }

    #[test]
    fn city_without_state_needs_a_city_entry() {
        let filters = ViolationFilters {
            city: Some("Chicago".into()),
            ..Default::default()
        };
        assert_eq!(candidate_ids(&registry(), &filters), ["chicago", "national"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut registry = registry();
        let result = registry.register(
            descriptor("chicago", vec![Jurisdiction::state("IL")]),
            Arc::new(NoopAdapter),
        );
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn summaries_flag_nationwide_providers() {
        let summaries = registry().list_provider_summaries();
        let national = summaries.iter().find(|s| s.id == "national").unwrap();
        let chicago = summaries.iter().find(|s| s.id == "chicago").unwrap();
        assert!(national.nationwide);
        assert!(!chicago.nationwide);
    }
}
