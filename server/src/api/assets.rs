use std::path::Path;

use axum::routing::{get_service, MethodRouter};
use tower_http::services::{ServeDir, ServeFile};

use super::error;

/// Serve the frontend bundle, falling back to `index.html` for client-side routes.
///
/// Only GET and HEAD reach the bundle; other methods get the JSON 404.
pub fn spa_service(dir: &Path) -> MethodRouter {
    let files = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
    get_service(files).fallback(error::not_found)
}
