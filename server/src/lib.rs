//! Standalone HTTP server for the event search backend.
//!
//! Serves `POST /api/search` and, when configured with a frontend bundle,
//! the single-page application around it.

pub mod api;

use shared::{Config, SearchProxy};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Application state shared across requests. Read-only after startup.
pub struct AppState {
    pub proxy: SearchProxy,
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    /// Build state from configuration. A missing API key is an error here,
    /// so the server never starts without one.
    pub fn from_config(config: &Config) -> shared::Result<Self> {
        let api_key = config.require_api_key()?;

        Ok(Self {
            proxy: SearchProxy::new(api_key, &config.upstream)?,
            static_dir: config.static_dir.clone(),
        })
    }
}

/// Bind and serve until the process is stopped.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_config(&config)?);
    let app = api::router(Arc::clone(&state));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("event search backend running on port {}", config.port);
    if let Some(preview) = config.key_preview() {
        info!("API key: {}", preview);
    }
    match &state.static_dir {
        Some(dir) => info!("Serving frontend from {}", dir.display()),
        None => info!("Endpoints: /api/search, /health"),
    }

    axum::serve(listener, app).await?;
    Ok(())
}
