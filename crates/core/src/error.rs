#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure of a single provider adapter call.
///
/// The aggregator contains these per provider; they never reach the caller.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Provider returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Failed to parse provider response: {0}")]
    Parse(String),

    #[error("Provider rate limit exceeded")]
    RateLimited,

    #[error("Provider rejected credentials: {0}")]
    Unauthorized(String),

    #[error("Provider call cancelled")]
    Cancelled,
}

/// Failure of one enrichment branch (imagery, skip-trace or mortgage).
///
/// Converted by the orchestrator into an empty or `unavailable` result for
/// that branch alone.
#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Integration returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Failed to parse integration response: {0}")]
    Parse(String),

    #[error("Integration call cancelled")]
    Cancelled,
}
