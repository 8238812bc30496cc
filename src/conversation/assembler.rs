//! Transcript assembly: permission pre-flight, history walk, attachment
//! extraction under per-unit deadlines.

use super::{Transcript, TranscriptEntry};
use crate::config::Limits;
use crate::error::ContextError;
use crate::extract::{DegradedKind, Extracted};
use crate::fetch::AttachmentFetcher;
use crate::platform::ChannelClient;
use crate::{Attachment, AttachmentResult};
use futures::future::join_all;
use std::sync::Arc;

/// Builds a bounded transcript of recent channel messages.
pub struct ContextAssembler {
    fetcher: Arc<AttachmentFetcher>,
    limits: Limits,
}

impl ContextAssembler {
    pub fn new(fetcher: Arc<AttachmentFetcher>, limits: Limits) -> Self {
        Self { fetcher, limits }
    }

    /// Build a transcript from the channel's default window.
    pub async fn build(&self, channel: &dyn ChannelClient) -> Result<Transcript, ContextError> {
        self.build_windowed(channel, self.limits.history_window).await
    }

    /// Build a transcript from up to `window` most-recent messages.
    ///
    /// Capabilities are checked before any history read: reading without
    /// the history permission would raise a platform-level fault, so the
    /// missing set is reported proactively instead. One degraded or
    /// timed-out attachment never discards the rest of the transcript.
    #[tracing::instrument(skip(self, channel))]
    pub async fn build_windowed(
        &self,
        channel: &dyn ChannelClient,
        window: usize,
    ) -> Result<Transcript, ContextError> {
        let missing = channel.capabilities().missing();
        if !missing.is_empty() {
            tracing::warn!(?missing, "channel capabilities missing, skipping history read");
            return Err(ContextError::MissingCapabilities { missing });
        }

        // Newest first, as the platform delivers them.
        let messages = channel.recent_messages(window).await?;

        let mut entries = Vec::new();
        for message in messages {
            if message.author_is_bot {
                continue;
            }

            // Attachments on one message fan out concurrently; each unit
            // carries its own deadline so a hang cannot block siblings.
            let attachments = join_all(
                message
                    .attachments
                    .iter()
                    .map(|attachment| self.process_attachment(attachment)),
            )
            .await;

            entries.push(TranscriptEntry {
                timestamp: message.timestamp,
                author: message.author,
                reply_target: message.reply_to_author,
                body: message.content,
                attachments,
            });
        }

        // Oldest first, matching conversational reading order.
        entries.reverse();

        tracing::debug!(entries = entries.len(), "transcript assembled");
        Ok(Transcript { entries })
    }

    /// Fetch one attachment under the history budget, which is tighter
    /// than the fetcher's own download timeout.
    async fn process_attachment(&self, attachment: &Attachment) -> AttachmentResult {
        let budget = self.limits.history_attachment_timeout;
        match tokio::time::timeout(budget, self.fetcher.fetch(attachment)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(filename = %attachment.filename, "attachment processing timed out");
                AttachmentResult {
                    filename: attachment.filename.clone(),
                    mime_hint: attachment.mime_type.clone(),
                    outcome: Extracted::degraded(
                        DegradedKind::Timeout,
                        format!("Timeout processing attachment: {}", attachment.filename),
                    ),
                }
            }
        }
    }
}
