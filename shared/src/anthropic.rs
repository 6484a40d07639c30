//! Client for the Anthropic Messages API.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::UpstreamConfig;
use crate::prompt::{self, API_VERSION, MAX_TOKENS, MODEL, SYSTEM_PROMPT};
use crate::{Error, Result};

/// Request to the messages endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    /// Model identifier
    pub model: String,
    /// Output budget
    pub max_tokens: u32,
    /// System instruction
    pub system: String,
    /// Conversation turns
    pub messages: Vec<Message>,
    /// Tools the model may call
    pub tools: Vec<Tool>,
}

/// A single conversation turn.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// Tool declaration.
#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub name: String,
}

impl MessagesRequest {
    /// The fixed search request for a query: system prompt, one user turn,
    /// web search enabled.
    pub fn for_query(query: &str) -> Self {
        Self {
            model: MODEL.to_string(),
            max_tokens: MAX_TOKENS,
            system: SYSTEM_PROMPT.to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt::user_message(query),
            }],
            tools: vec![Tool {
                tool_type: prompt::WEB_SEARCH_TOOL_TYPE.to_string(),
                name: prompt::WEB_SEARCH_TOOL_NAME.to_string(),
            }],
        }
    }
}

/// Response from the messages endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    /// Content blocks (absent is treated as empty)
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// One content block. Only `text` blocks carry anything we use; tool use
/// and search result blocks are kept as their type name only.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl MessagesResponse {
    /// Text of every text block, in order, joined with newlines.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter(|b| b.block_type == "text")
            .filter_map(|b| b.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Client for the completion API.
#[derive(Clone)]
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    messages_url: String,
}

impl AnthropicClient {
    /// Create a new client.
    pub fn new(api_key: impl Into<String>, config: &UpstreamConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            api_key: api_key.into(),
            messages_url: config.messages_url(),
        })
    }

    /// Send one request. A non-success status is returned as
    /// [`Error::Upstream`] carrying the body verbatim.
    pub async fn create_message(&self, request: &MessagesRequest) -> Result<MessagesResponse> {
        debug!("POST {}", self.messages_url);

        let response = self
            .http
            .post(&self.messages_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            error!("API error: {}", status.as_u16());
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
