//! Inference boundary: throttled, retried calls to the language-model API.

pub mod anthropic;
pub mod gateway;
pub mod limiter;
pub mod prompt;

pub use anthropic::AnthropicClient;
pub use gateway::InferenceGateway;
pub use limiter::RateLimiter;

use crate::error::InferenceError;

/// One-shot completion against the inference provider.
///
/// An `Ok` carries the joined text of the response's content blocks; a
/// response without any non-empty text block is `EmptyResponse`, not `Ok`.
#[async_trait::async_trait]
pub trait InferenceClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, InferenceError>;
}
