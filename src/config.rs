//! Configuration loading and validation.

use crate::error::{ConfigError, Result};
use std::time::Duration;

/// Resource bounds and timing budgets, immutable per process.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Maximum extracted content length in characters.
    pub max_content_chars: usize,

    /// Maximum attachment size in bytes.
    pub max_file_bytes: u64,

    /// Maximum decoded image size in pixels (width × height).
    pub max_image_pixels: u64,

    /// Overall budget for one attachment download.
    pub download_timeout: Duration,

    /// Budget for one attachment while assembling history. Tighter than
    /// the download timeout so a stuck extraction cannot stall the build.
    pub history_attachment_timeout: Duration,

    /// Attempts per inference request before giving up.
    pub inference_attempts: u32,

    /// Minimum spacing between successive inference calls.
    pub inter_call_floor: Duration,

    /// Maximum number of recent messages considered for a transcript.
    pub history_window: usize,

    /// Working per-message size limit for outbound replies. The platform
    /// cap is 2000; 1900 leaves headroom for control characters.
    pub message_chunk_limit: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_content_chars: 100_000,
            max_file_bytes: 10 * 1024 * 1024,
            max_image_pixels: 40_000_000,
            download_timeout: Duration::from_secs(30),
            history_attachment_timeout: Duration::from_secs(10),
            inference_attempts: 3,
            inter_call_floor: Duration::from_millis(500),
            history_window: 25,
            message_chunk_limit: 1900,
        }
    }
}

/// Inference provider configuration.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Model identifier sent to the provider.
    pub model: String,

    /// Output token budget per request.
    pub max_tokens: u32,

    /// Provider base URL. The messages path is appended at request time.
    pub base_url: String,

    /// Provider API key.
    pub api_key: String,
}

impl InferenceConfig {
    /// Load provider configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| ConfigError::MissingKey("ANTHROPIC_API_KEY".into()))?;

        if api_key.trim().is_empty() {
            return Err(ConfigError::Invalid("ANTHROPIC_API_KEY is empty".into()).into());
        }

        Ok(Self {
            model: std::env::var("RELAYBOT_MODEL")
                .unwrap_or_else(|_| "claude-3-5-sonnet-latest".into()),
            max_tokens: 4000,
            base_url: std::env::var("RELAYBOT_BASE_URL")
                .unwrap_or_else(|_| "https://api.anthropic.com".into()),
            api_key,
        })
    }
}
