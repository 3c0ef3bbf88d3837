#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use tower::ServiceExt;

use codewatch_api::config::{IntegrationConfig, ServerConfig};
use codewatch_api::router::build_app_router;
use codewatch_api::state::AppState;
use codewatch_core::enrichment::EnrichmentOrchestrator;
use codewatch_core::error::ProviderError;
use codewatch_core::filters::ViolationFilters;
use codewatch_core::provider::ProviderAdapter;
use codewatch_core::registry::{Jurisdiction, ProviderDescriptor, ProviderRegistry};
use codewatch_core::violation::PropertyViolation;

/// Build a test `ServerConfig` with safe defaults and no integrations.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        mock_mode: false,
        integration_timeout_secs: 5,
        integrations: IntegrationConfig::default(),
    }
}

// ---------------------------------------------------------------------------
// Fake providers
// ---------------------------------------------------------------------------

/// Serves a fixed set of records regardless of filters.
pub struct StaticProvider(pub Vec<PropertyViolation>);

#[async_trait]
impl ProviderAdapter for StaticProvider {
    async fn query(
        &self,
        _filters: &ViolationFilters,
    ) -> Result<Vec<PropertyViolation>, ProviderError> {
        Ok(self.0.clone())
    }
}

/// Always fails with an upstream 503.
pub struct FailingProvider;

#[async_trait]
impl ProviderAdapter for FailingProvider {
    async fn query(
        &self,
        _filters: &ViolationFilters,
    ) -> Result<Vec<PropertyViolation>, ProviderError> {
        Err(ProviderError::Upstream {
            status: 503,
            body: "maintenance".into(),
        })
    }
}

pub fn violation(
    source: &str,
    n: u32,
    city: &str,
    state: &str,
    date: Option<(i32, u32, u32)>,
) -> PropertyViolation {
    PropertyViolation {
        id: PropertyViolation::compose_id(source, &n.to_string()),
        address: format!("{n} Main St"),
        city: city.to_string(),
        state: state.to_string(),
        zip: None,
        status: Some("Open".to_string()),
        violation_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        description: Some(format!("Violation {n}")),
        source: source.to_string(),
    }
}

/// Registry used by most tests:
///
/// - `chicago` (Chicago, IL): 3 dated records plus 1 undated
/// - `il_outage` (IL): always fails
/// - `austin` (Austin, TX): 150 records, for limit clamping
pub fn test_registry() -> ProviderRegistry {
    let chicago: Arc<dyn ProviderAdapter> = Arc::new(StaticProvider(vec![
        violation("chicago", 1, "Chicago", "IL", Some((2024, 1, 10))),
        violation("chicago", 2, "Chicago", "IL", Some((2024, 3, 5))),
        violation("chicago", 3, "Chicago", "IL", None),
        violation("chicago", 4, "Chicago", "IL", Some((2023, 11, 30))),
    ]));
    let outage: Arc<dyn ProviderAdapter> = Arc::new(FailingProvider);
    let austin: Arc<dyn ProviderAdapter> = Arc::new(StaticProvider(
        (1..=150)
            .map(|n| violation("austin", n, "Austin", "TX", Some((2024, 1, 1 + n % 28))))
            .collect(),
    ));

    ProviderRegistry::from_providers([
        (
            ProviderDescriptor {
                id: "chicago".into(),
                name: "City of Chicago".into(),
                jurisdiction: vec![Jurisdiction::city("Chicago", "IL")],
            },
            chicago,
        ),
        (
            ProviderDescriptor {
                id: "il_outage".into(),
                name: "Illinois Statewide".into(),
                jurisdiction: vec![Jurisdiction::state("IL")],
            },
            outage,
        ),
        (
            ProviderDescriptor {
                id: "austin".into(),
                name: "City of Austin".into(),
                jurisdiction: vec![Jurisdiction::city("Austin", "TX")],
            },
            austin,
        ),
    ])
    .unwrap()
}

/// Build the full application router around the test registry, with no
/// enrichment integrations configured.
pub fn build_test_app() -> Router {
    build_app_with(test_config())
}

/// Same as [`build_test_app`] with mock mode switched on.
pub fn build_mock_app() -> Router {
    build_app_with(ServerConfig {
        mock_mode: true,
        ..test_config()
    })
}

/// The test registry with the given enrichment collaborators.
pub fn build_app_with_enrichment(enrichment: EnrichmentOrchestrator) -> Router {
    let config = test_config();
    let state = AppState::new(config.clone(), test_registry(), enrichment);
    build_app_router(state, &config)
}

fn build_app_with(config: ServerConfig) -> Router {
    let state = AppState::new(
        config.clone(),
        test_registry(),
        EnrichmentOrchestrator::unconfigured(),
    );
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
