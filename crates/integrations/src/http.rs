//! Shared HTTP plumbing for provider adapters and enrichment clients.

use codewatch_core::error::{EnrichmentError, ProviderError};

/// Errors from an outbound HTTP call.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The HTTP request itself failed (network, DNS, TLS, body decode, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream service returned a non-2xx status code.
    #[error("Upstream API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl From<HttpError> for ProviderError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Request(e) if e.is_decode() => ProviderError::Parse(e.to_string()),
            HttpError::Request(e) => ProviderError::Transport(e.to_string()),
            HttpError::ApiError { status: 429, .. } => ProviderError::RateLimited,
            HttpError::ApiError {
                status: 401 | 403,
                body,
            } => ProviderError::Unauthorized(body),
            HttpError::ApiError { status, body } => ProviderError::Upstream { status, body },
        }
    }
}

impl From<HttpError> for EnrichmentError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Request(e) if e.is_decode() => EnrichmentError::Parse(e.to_string()),
            HttpError::Request(e) => EnrichmentError::Transport(e.to_string()),
            HttpError::ApiError { status, body } => EnrichmentError::Upstream { status, body },
        }
    }
}

/// Ensure the response has a success status code. Returns the response
/// unchanged on success, or an [`HttpError::ApiError`] containing the status
/// and body text on failure.
pub async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, HttpError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(HttpError::ApiError {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Parse a successful JSON response body into the expected type.
pub async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, HttpError> {
    let response = ensure_success(response).await?;
    Ok(response.json::<T>().await?)
}

/// Like [`parse_response`], but a `404 Not Found` means "no record".
pub async fn parse_optional<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<Option<T>, HttpError> {
    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }
    parse_response(response).await.map(Some)
}
