//! Shared library for the event search backend.
//!
//! This crate holds the search pipeline and everything the transports share:
//! the completion API client, reply extraction, configuration and errors.

pub mod anthropic;
pub mod config;
pub mod error;
pub mod extract;
pub mod http;
pub mod models;
pub mod prompt;
pub mod search;
pub mod secrets;
pub mod validate;

pub use anthropic::{AnthropicClient, MessagesRequest, MessagesResponse};
pub use config::{load_dotenv, Config, UpstreamConfig};
pub use error::{Error, Result};
pub use extract::{extract_events, strip_code_fences, Extraction};
pub use models::{ErrorBody, EventRecord, HealthResponse, SearchRequest, SearchResponse, VibeTag};
pub use search::{execute, execute_with, SearchOutcome, SearchProxy};
pub use secrets::{get_secret, resolve_api_key};
