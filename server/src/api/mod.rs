//! HTTP routes for the standalone server.

pub mod assets;
pub mod cors;
pub mod error;
pub mod search;

use axum::{
    routing::{get, post},
    Json, Router,
};
use shared::HealthResponse;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Name reported by the health endpoint.
pub const SERVICE_NAME: &str = "event-search-backend";

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok(SERVICE_NAME))
}

/// Build the application router.
///
/// Without a static directory `/` answers like `/health` and every other
/// path is a JSON 404. With one, unmatched GET paths are served from the bundle.
pub fn router(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        .route(
            "/api/search",
            post(search::search_events).fallback(error::not_found),
        )
        .route("/health", get(health).fallback(error::not_found));

    let routes = match &state.static_dir {
        Some(dir) => routes.fallback_service(assets::spa_service(dir)),
        None => routes
            .route("/", get(health).fallback(error::not_found))
            .fallback(error::not_found),
    };

    cors::apply(routes.with_state(state)).layer(TraceLayer::new_for_http())
}
