//! Search Lambda - Handles the /api/search endpoint.
//!
//! Forwards the query to the completion API with web search enabled and
//! returns the events found in the reply. A missing API key does not stop
//! the function from starting; every invocation then fails with a 500.

use lambda_http::http::Method;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::http::{error_response, error_to_response, json_response, parse_search_request, preflight_response};
use shared::{Config, SearchProxy, SearchResponse};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Application state shared across requests.
struct AppState {
    /// Absent when no API key could be resolved at cold start
    proxy: Option<SearchProxy>,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let config = Config::from_env()?;

        let api_key = match config.api_key.clone() {
            Some(key) => Some(key),
            None => match std::env::var("ANTHROPIC_API_KEY_SECRET_ARN") {
                Ok(arn) => fetch_api_key(&arn).await,
                Err(_) => None,
            },
        };

        let proxy = match api_key {
            Some(key) => Some(SearchProxy::new(&key, &config.upstream)?),
            None => {
                warn!("ANTHROPIC_API_KEY not set; all searches will fail");
                None
            }
        };

        Ok(Self { proxy })
    }
}

async fn fetch_api_key(secret_arn: &str) -> Option<String> {
    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_secretsmanager::Client::new(&config);

    match shared::resolve_api_key(&client, secret_arn).await {
        Ok(key) => Some(key),
        Err(e) => {
            error!("Failed to load API key from Secrets Manager: {}", e);
            None
        }
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    if event.method() == Method::OPTIONS {
        return Ok(preflight_response());
    }
    if event.method() != Method::POST {
        return error_response(405, "POST only");
    }

    let Some(proxy) = state.proxy.as_ref() else {
        error!("ANTHROPIC_API_KEY not set");
        return error_response(500, "ANTHROPIC_API_KEY not set");
    };

    let query = match parse_search_request(event.body().as_ref()) {
        Ok(query) => query,
        Err(e) => return error_to_response(&e),
    };

    match proxy.execute(&query).await {
        Ok(outcome) => {
            info!("Returning {} events", outcome.events.len());
            json_response(
                200,
                &SearchResponse {
                    events: outcome.events,
                    raw: outcome.raw,
                },
            )
        }
        Err(e) => {
            error!("Search failed: {}", e);
            error_to_response(&e)
        }
    }
}

/// Log filter from `RUST_LOG` directives, `info` when unset or invalid.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .json()
        .init();

    let state = Arc::new(AppState::new().await?);

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
