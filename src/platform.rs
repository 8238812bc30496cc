//! Chat-platform boundary: capability checks and history access.
//!
//! The platform gateway itself (sessions, slash commands, delivery) lives
//! in the embedding application. The core only needs to ask a channel what
//! the bot may do there and to page through recent messages.

use crate::Attachment;
use crate::error::PlatformError;

/// Channel permissions the bot needs before building a transcript.
#[derive(Debug, Clone, Copy, Default)]
pub struct Capabilities {
    pub view_channel: bool,
    pub read_message_history: bool,
    pub send_messages: bool,
}

impl Capabilities {
    /// All capabilities granted.
    pub fn all() -> Self {
        Self {
            view_channel: true,
            read_message_history: true,
            send_messages: true,
        }
    }

    /// Names of missing capabilities, in a fixed reporting order.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.view_channel {
            missing.push("view_channel");
        }
        if !self.read_message_history {
            missing.push("read_message_history");
        }
        if !self.send_messages {
            missing.push("send_messages");
        }
        missing
    }
}

/// One message as delivered by the platform.
#[derive(Debug, Clone)]
pub struct ChannelMessage {
    pub id: String,
    pub author: String,
    pub author_is_bot: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub content: String,
    /// Author of the message this one replies to, when the platform could
    /// resolve the reference.
    pub reply_to_author: Option<String>,
    pub attachments: Vec<Attachment>,
}

/// Read access to one channel.
#[async_trait::async_trait]
pub trait ChannelClient: Send + Sync {
    /// The bot's capabilities on this channel.
    fn capabilities(&self) -> Capabilities;

    /// Up to `limit` most recent messages, newest first.
    async fn recent_messages(&self, limit: usize)
    -> Result<Vec<ChannelMessage>, PlatformError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_capabilities_report_nothing_missing() {
        assert!(Capabilities::all().missing().is_empty());
    }

    #[test]
    fn missing_capabilities_reported_in_fixed_order() {
        let caps = Capabilities {
            view_channel: false,
            read_message_history: false,
            send_messages: true,
        };
        assert_eq!(caps.missing(), vec!["view_channel", "read_message_history"]);

        let none = Capabilities::default();
        assert_eq!(
            none.missing(),
            vec!["view_channel", "read_message_history", "send_messages"]
        );
    }
}
