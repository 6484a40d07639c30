use axum::{body::Bytes, extract::State, Json};
use shared::http::parse_search_request;
use shared::SearchResponse;
use std::sync::Arc;

use super::error::ApiError;
use crate::AppState;

/// `POST /api/search`
///
/// The body is decoded by hand so that malformed JSON gets the same 400 body
/// as the Lambda handler instead of axum's rejection text.
pub async fn search_events(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = parse_search_request(&body)?;
    let outcome = state.proxy.execute(&query).await?;

    Ok(Json(SearchResponse {
        events: outcome.events,
        raw: None,
    }))
}
