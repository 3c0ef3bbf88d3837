//! Mounted at `/violations` in the API route tree.

use axum::routing::get;
use axum::Router;

use crate::handlers::violations;
use crate::state::AppState;

/// ```text
/// GET /    -> search_violations
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(violations::search_violations))
}
