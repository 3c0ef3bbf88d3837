//! Handlers for the aggregated violation search.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use tokio_util::sync::CancellationToken;

use crate::error::AppResult;
use crate::query::ViolationQueryParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/violations
///
/// Fans the filters out to every provider covering the requested location
/// and returns one merged page, newest first. Provider failures never fail
/// the request; they only show up in the provenance sets.
pub async fn search_violations(
    State(state): State<AppState>,
    Query(params): Query<ViolationQueryParams>,
) -> AppResult<impl IntoResponse> {
    let filters = params.into_filters();

    // Outstanding provider calls are abandoned if the client disconnects.
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let result = state
        .aggregator
        .fetch_violations(&filters, state.run_mode(), &cancel)
        .await;

    tracing::debug!(
        city = ?filters.city,
        state = ?filters.state,
        items = result.items.len(),
        queried = result.providers_queried.len(),
        matched = result.providers_matched.len(),
        "Violation search complete",
    );

    Ok(Json(DataResponse { data: result }))
}
