//! HTTP helpers for the Lambda handler.

use lambda_http::{Body, Response};
use serde::Serialize;

use crate::models::{ErrorBody, SearchRequest};
use crate::search::validate_query;
use crate::Error;

/// Cross-origin headers attached to every Lambda response.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "POST, OPTIONS"),
    ("access-control-allow-headers", "Content-Type"),
];

fn with_cors(status: u16) -> lambda_http::http::response::Builder {
    CORS_HEADERS
        .iter()
        .fold(Response::builder().status(status), |builder, (name, value)| {
            builder.header(*name, *value)
        })
}

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(status: u16, data: &T) -> Result<Response<Body>, lambda_http::Error> {
    Ok(with_cors(status)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(data)?))
        .expect("Failed to build response"))
}

/// Create an error response with the given status code and message.
pub fn error_response(status: u16, message: impl Into<String>) -> Result<Response<Body>, lambda_http::Error> {
    json_response(status, &ErrorBody::new(message))
}

/// Map a search error to its response.
pub fn error_to_response(err: &Error) -> Result<Response<Body>, lambda_http::Error> {
    error_response(err.status_code(), err.client_message())
}

/// Empty 200 for cross-origin preflight.
pub fn preflight_response() -> Response<Body> {
    with_cors(200)
        .body(Body::Empty)
        .expect("Failed to build preflight response")
}

/// Parse a search body and return its query.
///
/// Undecodable bodies and missing or empty queries are validation errors.
pub fn parse_search_request(body: &[u8]) -> crate::Result<String> {
    let request: SearchRequest = serde_json::from_slice(body)
        .map_err(|_| Error::Validation("invalid JSON body".to_string()))?;

    let query = request.query.unwrap_or_default();
    validate_query(&query)?;
    Ok(query)
}
