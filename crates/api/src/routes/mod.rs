pub mod enrichment;
pub mod health;
pub mod providers;
pub mod violations;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// GET  /violations     aggregated violation search
/// GET  /providers      registered providers
/// POST /enrichment     property enrichment
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/violations", violations::router())
        .nest("/providers", providers::router())
        .nest("/enrichment", enrichment::router())
}
