//! Anthropic messages-API client.

use super::InferenceClient;
use crate::config::InferenceConfig;
use crate::error::{InferenceError, Result};
use anyhow::Context as _;
use std::time::Duration;

/// Production inference client over the Anthropic messages API.
pub struct AnthropicClient {
    http_client: reqwest::Client,
    config: InferenceConfig,
}

impl AnthropicClient {
    pub fn new(config: InferenceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http_client,
            config,
        })
    }
}

/// Construct the full messages endpoint URL from a base URL.
///
/// If the base URL already ends with the messages path, use it as-is.
fn messages_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/v1/messages") {
        trimmed.to_string()
    } else {
        format!("{trimmed}/v1/messages")
    }
}

/// Join the non-empty text blocks of a messages-API response.
fn extract_text(body: &serde_json::Value) -> std::result::Result<String, InferenceError> {
    let blocks = body
        .get("content")
        .and_then(|content| content.as_array())
        .ok_or_else(|| InferenceError::Malformed("missing content array".into()))?;

    let parts: Vec<&str> = blocks
        .iter()
        .filter_map(|block| block.get("text").and_then(|text| text.as_str()))
        .filter(|text| !text.trim().is_empty())
        .collect();

    if parts.is_empty() {
        return Err(InferenceError::EmptyResponse);
    }

    Ok(parts.join("\n"))
}

#[async_trait::async_trait]
impl InferenceClient for AnthropicClient {
    async fn complete(&self, prompt: &str) -> std::result::Result<String, InferenceError> {
        let body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "messages": [{
                "role": "user",
                "content": prompt,
            }],
        });

        let response = self
            .http_client
            .post(messages_url(&self.config.base_url))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value = response.json().await?;
        extract_text(&body)
    }
}
