use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/providers
///
/// Registered providers in registration order.
pub async fn list_providers(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let providers = state.aggregator.registry().list_provider_summaries();
    Ok(Json(DataResponse { data: providers }))
}
