//! The search pipeline: query in, events out.
//!
//! Every transport calls [`SearchProxy::execute`]; nothing here depends on
//! how the request arrived.

use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::anthropic::{AnthropicClient, MessagesRequest};
use crate::config::UpstreamConfig;
use crate::extract::{extract_events, Extraction};
use crate::models::EventRecord;
use crate::validate;
use crate::{Error, Result};

/// Result of one search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Extracted events, possibly empty
    pub events: Vec<EventRecord>,
    /// Cleaned model text when it contained no array
    pub raw: Option<String>,
}

/// Stateless proxy around the completion API.
#[derive(Clone)]
pub struct SearchProxy {
    client: AnthropicClient,
    validate_events: bool,
}

impl SearchProxy {
    /// Create a proxy. An empty key is a configuration error.
    pub fn new(api_key: &str, config: &UpstreamConfig) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::Config("ANTHROPIC_API_KEY not set".to_string()));
        }

        Ok(Self {
            client: AnthropicClient::new(api_key, config)?,
            validate_events: config.validate_events,
        })
    }

    /// Run one search.
    ///
    /// An empty query is rejected before any network activity.
    pub async fn execute(&self, query: &str) -> Result<SearchOutcome> {
        let query = validate_query(query)?;
        let span = info_span!("search", request_id = %Uuid::new_v4());

        async move {
            info!("searching: {}...", preview(query, 60));

            let response = self
                .client
                .create_message(&MessagesRequest::for_query(query))
                .await?;

            let outcome = match extract_events(&response.text())? {
                Extraction::NoArray { cleaned } => {
                    warn!("no JSON array in response");
                    SearchOutcome {
                        events: Vec::new(),
                        raw: Some(cleaned),
                    }
                }
                Extraction::Events(events) => {
                    let events = if self.validate_events {
                        validate::retain_valid(events)
                    } else {
                        events
                    };
                    info!("found {} events", events.len());
                    SearchOutcome { events, raw: None }
                }
            };

            Ok(outcome)
        }
        .instrument(span)
        .await
    }
}

/// One-shot search with upstream settings read from the environment
/// (`ANTHROPIC_BASE_URL`, `UPSTREAM_TIMEOUT_SECS`, `EVENT_SCHEMA_VALIDATION`).
pub async fn execute(query: &str, api_key: &str) -> Result<SearchOutcome> {
    execute_with(query, api_key, &UpstreamConfig::from_env()?).await
}

/// One-shot search against explicit upstream settings.
pub async fn execute_with(
    query: &str,
    api_key: &str,
    config: &UpstreamConfig,
) -> Result<SearchOutcome> {
    SearchProxy::new(api_key, config)?.execute(query).await
}

/// Reject missing, empty or whitespace-only queries.
pub fn validate_query(query: &str) -> Result<&str> {
    if query.trim().is_empty() {
        return Err(Error::Validation("query required".to_string()));
    }
    Ok(query)
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
