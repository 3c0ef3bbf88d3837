use axum::routing::get;
use axum::Router;

use crate::handlers::providers;
use crate::state::AppState;

/// Provider routes mounted at `/providers`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(providers::list_providers))
}
