//! Retry loop and throttling around the inference client.

use super::limiter::RateLimiter;
use super::{InferenceClient, prompt};
use std::sync::Arc;

/// Serializes, throttles, and retries inference calls.
///
/// `respond` is a soft-failure API: exhausted retries and fail-fast
/// errors both surface as `None`, and the layer above renders a
/// user-visible "no response" message instead of crashing.
pub struct InferenceGateway {
    client: Arc<dyn InferenceClient>,
    limiter: RateLimiter,
    attempts: u32,
}

impl InferenceGateway {
    pub fn new(client: Arc<dyn InferenceClient>, limiter: RateLimiter, attempts: u32) -> Self {
        Self {
            client,
            limiter,
            attempts,
        }
    }

    /// Answer `question` from `author` against the rendered `context`.
    ///
    /// Every attempt, successful or not, advances the limiter's marker
    /// after it completes, so bursts of failures stay throttled. Only
    /// transient failures consume further attempts; authentication and
    /// validation errors give up immediately.
    #[tracing::instrument(skip(self, question, context))]
    pub async fn respond(&self, author: &str, question: &str, context: &str) -> Option<String> {
        let prompt = prompt::compose(author, question, context);

        for attempt in 1..=self.attempts {
            let permit = self.limiter.acquire().await;
            let result = self.client.complete(&prompt).await;
            permit.complete();

            match result {
                Ok(text) if !text.trim().is_empty() => {
                    tracing::debug!(attempt, chars = text.len(), "inference call succeeded");
                    return Some(text);
                }
                Ok(_) => {
                    tracing::warn!(attempt, "provider returned blank text");
                }
                Err(error) if error.is_retriable() => {
                    tracing::warn!(%error, attempt, "retriable inference error");
                }
                Err(error) => {
                    tracing::warn!(%error, attempt, "non-retriable inference error, giving up");
                    return None;
                }
            }
        }

        tracing::warn!(attempts = self.attempts, "inference attempts exhausted");
        None
    }
}
