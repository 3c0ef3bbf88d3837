//! Mounted at `/enrichment` in the API route tree.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::enrichment;
use crate::state::AppState;

/// ```text
/// POST /          -> enrich_property
/// GET  /status    -> integration_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(enrichment::enrich_property))
        .route("/status", get(enrichment::integration_status))
}
