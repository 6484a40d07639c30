//! AWS Secrets Manager integration for the completion API key.

use aws_sdk_secretsmanager::Client as SecretsClient;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use tokio::sync::RwLock;

use crate::{Error, Result};

/// Cached secrets with lazy initialization.
static SECRETS_CACHE: OnceLock<RwLock<HashMap<String, String>>> = OnceLock::new();

fn get_cache() -> &'static RwLock<HashMap<String, String>> {
    SECRETS_CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Key/value form of the API key secret.
#[derive(Debug, Deserialize)]
struct ApiKeySecret {
    #[serde(alias = "ANTHROPIC_API_KEY")]
    api_key: String,
}

/// Get a secret value from Secrets Manager with caching.
pub async fn get_secret(client: &SecretsClient, secret_arn: &str) -> Result<String> {
    {
        let cache = get_cache().read().await;
        if let Some(value) = cache.get(secret_arn) {
            return Ok(value.clone());
        }
    }

    let response = client
        .get_secret_value()
        .secret_id(secret_arn)
        .send()
        .await
        .map_err(|e| Error::Aws(format!("Failed to get secret: {}", e)))?;

    let secret_string = response
        .secret_string()
        .ok_or_else(|| Error::Aws("Secret has no string value".to_string()))?
        .to_string();

    {
        let mut cache = get_cache().write().await;
        cache.insert(secret_arn.to_string(), secret_string.clone());
    }

    Ok(secret_string)
}

/// Fetch the completion API key stored under `secret_arn`.
pub async fn resolve_api_key(client: &SecretsClient, secret_arn: &str) -> Result<String> {
    let secret_string = get_secret(client, secret_arn).await?;
    parse_api_key(&secret_string)
}

/// The secret is either the bare key or a JSON object holding it.
fn parse_api_key(secret_string: &str) -> Result<String> {
    let trimmed = secret_string.trim();

    let key = if trimmed.starts_with('{') {
        serde_json::from_str::<ApiKeySecret>(trimmed)
            .map_err(|e| Error::Aws(format!("Failed to parse API key secret: {}", e)))?
            .api_key
    } else {
        trimmed.to_string()
    };

    if key.trim().is_empty() {
        return Err(Error::Config("API key secret is empty".to_string()));
    }
    Ok(key)
}
