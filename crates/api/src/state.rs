use std::sync::Arc;
use std::time::Duration;

use codewatch_core::aggregator::{RunMode, ViolationAggregator};
use codewatch_core::enrichment::{
    EnrichmentOrchestrator, ImageLookup, MortgageLookup, SkipTrace, Unconfigured,
};
use codewatch_core::error::CoreError;
use codewatch_core::provider::ProviderAdapter;
use codewatch_core::registry::{ProviderDescriptor, ProviderRegistry};
use codewatch_integrations::catalog;
use codewatch_integrations::google_drive::GoogleDriveImageLookup;
use codewatch_integrations::mortgage::MortgageClient;
use codewatch_integrations::skip_trace::SkipTraceClient;

use crate::config::ServerConfig;
use crate::error::AppError;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Fan-out over the registered violation providers.
    pub aggregator: Arc<ViolationAggregator>,
    /// Imagery, owner and mortgage lookups.
    pub enrichment: Arc<EnrichmentOrchestrator>,
}

impl AppState {
    /// Wire the built-in provider catalog and whichever integrations have
    /// credentials. All outbound calls share one HTTP client.
    pub fn from_config(config: ServerConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.integration_timeout_secs))
            .user_agent(concat!("codewatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {e}")))?;

        let integrations = &config.integrations;
        let registry = build_registry(catalog::default_providers(
            &client,
            integrations.socrata_app_token.as_deref(),
        ))?;

        let images: Arc<dyn ImageLookup> = match &integrations.google_drive {
            Some(drive) => Arc::new(GoogleDriveImageLookup::new(
                client.clone(),
                drive.api_key.clone(),
                drive.folder_id.clone(),
            )),
            None => Arc::new(Unconfigured),
        };
        let skip_trace: Arc<dyn SkipTrace> = match &integrations.skip_trace {
            Some(creds) => Arc::new(SkipTraceClient::new(
                client.clone(),
                creds.api_url.clone(),
                creds.api_key.clone(),
            )),
            None => Arc::new(Unconfigured),
        };
        let mortgage: Arc<dyn MortgageLookup> = match &integrations.mortgage {
            Some(creds) => Arc::new(MortgageClient::new(
                client,
                creds.api_url.clone(),
                creds.api_key.clone(),
            )),
            None => Arc::new(Unconfigured),
        };

        Ok(Self::new(
            config,
            registry,
            EnrichmentOrchestrator::new(images, skip_trace, mortgage),
        ))
    }

    /// Assemble state from already-built parts.
    pub fn new(
        config: ServerConfig,
        registry: ProviderRegistry,
        enrichment: EnrichmentOrchestrator,
    ) -> Self {
        Self {
            config: Arc::new(config),
            aggregator: Arc::new(ViolationAggregator::new(Arc::new(registry))),
            enrichment: Arc::new(enrichment),
        }
    }

    pub fn run_mode(&self) -> RunMode {
        RunMode::from_mock_flag(self.config.mock_mode)
    }
}

/// A bad provider table is a startup defect, not a caller error.
fn build_registry(
    providers: Vec<(ProviderDescriptor, Arc<dyn ProviderAdapter>)>,
) -> Result<ProviderRegistry, AppError> {
    ProviderRegistry::from_providers(providers).map_err(|e| {
        AppError::Core(CoreError::Internal(format!(
            "Invalid provider catalog: {e}"
        )))
    })
}
