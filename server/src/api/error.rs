use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::ErrorBody;

/// Response-side wrapper for [`shared::Error`].
#[derive(Debug)]
pub struct ApiError(pub shared::Error);

impl From<shared::Error> for ApiError {
    fn from(err: shared::Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match &self.0 {
            shared::Error::Validation(msg) => tracing::debug!("Rejected request: {}", msg),
            shared::Error::Upstream { status, .. } => tracing::error!("API error: {}", status),
            other => tracing::error!("error: {}", other),
        }

        (status, Json(ErrorBody::new(self.0.client_message()))).into_response()
    }
}

/// JSON 404 for unmatched routes.
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("not found"))).into_response()
}
