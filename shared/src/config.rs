//! Configuration management loaded from environment variables.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::{Error, Result};

/// Default completion API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Default port for the standalone server.
pub const DEFAULT_PORT: u16 = 3000;

/// Settings for talking to the completion API.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// API base URL, without the `/v1/messages` suffix
    pub base_url: String,
    /// Client-side timeout for the upstream call (none by default)
    pub timeout: Option<Duration>,
    /// Drop records that fail schema validation
    pub validate_events: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            validate_events: false,
        }
    }
}

impl UpstreamConfig {
    /// Load upstream settings from environment variables.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("ANTHROPIC_BASE_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match env::var("UPSTREAM_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    Error::Config(format!("UPSTREAM_TIMEOUT_SECS is not a number: {}", raw))
                })?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        Ok(Self {
            base_url,
            timeout,
            validate_events: env::var("EVENT_SCHEMA_VALIDATION")
                .map(|v| is_truthy(&v))
                .unwrap_or(false),
        })
    }

    /// Full URL of the messages endpoint.
    pub fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Completion API key, absent when not configured
    pub api_key: Option<String>,
    /// Port for the standalone server
    pub port: u16,
    /// Frontend bundle directory; enables static serving when set
    pub static_dir: Option<PathBuf>,
    /// Upstream settings
    pub upstream: UpstreamConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("PORT is not a valid port: {}", raw)))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            api_key: env::var("ANTHROPIC_API_KEY")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            port,
            static_dir: env::var("STATIC_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            upstream: UpstreamConfig::from_env()?,
        })
    }

    /// The API key, or a configuration error when it is missing.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| Error::Config("ANTHROPIC_API_KEY not set".to_string()))
    }

    /// First 12 characters of the key, for startup logs.
    pub fn key_preview(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(|k| format!("{}...", k.chars().take(12).collect::<String>()))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("port", &self.port)
            .field("static_dir", &self.static_dir)
            .field("upstream", &self.upstream)
            .finish()
    }
}

/// Seed the environment from a local `.env` file when one exists.
///
/// Variables already present in the environment win. Returns the file that
/// was loaded; an unreadable file is skipped.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
