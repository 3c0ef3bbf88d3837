//! Handlers for property enrichment.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use codewatch_core::enrichment::EnrichmentRequest;
use tokio_util::sync::CancellationToken;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/enrichment
///
/// Runs the imagery, skip-trace and mortgage lookups concurrently. A failed
/// or unconfigured lookup degrades its own field only; the request fails
/// only when the body is malformed or the address is blank.
pub async fn enrich_property(
    State(state): State<AppState>,
    body: Result<Json<EnrichmentRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(request) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let enrichment = state
        .enrichment
        .enrich_property(&request, state.run_mode(), &cancel)
        .await?;

    Ok(Json(DataResponse { data: enrichment }))
}

/// GET /api/v1/enrichment/status
///
/// Which integrations are configured, without running any lookup.
pub async fn integration_status(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let status = state.enrichment.integration_status(state.run_mode());
    Ok(Json(DataResponse { data: status }))
}
