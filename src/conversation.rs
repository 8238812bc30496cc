//! Transcript types and rendering for conversational context.

pub mod assembler;

pub use assembler::ContextAssembler;

use crate::AttachmentResult;
use crate::extract::Extracted;
use chrono::SecondsFormat;

/// One reconstructed message, oldest-first within a transcript.
#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub author: String,
    /// Author of the replied-to message, when resolvable.
    pub reply_target: Option<String>,
    pub body: String,
    pub attachments: Vec<AttachmentResult>,
}

/// Ordered reconstruction of recent channel messages, oldest first.
///
/// Bot-authored messages are excluded and the entry count never exceeds
/// the window it was built with.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    pub entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the transcript for prompt embedding.
    ///
    /// The header describes the attachment-delimiter convention; the model
    /// is instructed to rely on it to separate narrative from attachment
    /// text, so the markers are a content contract.
    pub fn render(&self) -> String {
        let body = self
            .entries
            .iter()
            .map(render_entry)
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "This is a channel chat history with attachments. Each message shows its timestamp, author, and content.\n\
             Attachments are clearly marked between === Begin Attachment Content === and === End Attachment Content === markers.\n\
             \n\
             {body}"
        )
    }
}

fn render_entry(entry: &TranscriptEntry) -> String {
    let mut line = format!(
        "[{}] {}",
        entry.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        entry.author
    );

    if let Some(target) = &entry.reply_target {
        line.push_str(&format!(" (replying to {target})"));
    }

    if !entry.body.is_empty() {
        line.push_str(&format!(": {}", entry.body));
    }

    for attachment in &entry.attachments {
        match &attachment.outcome {
            Extracted::Text(content) if !content.trim().is_empty() => {
                line.push_str(&format!(
                    "\n=== Begin Attachment Content ===\n\
                     Filename: {}\n\
                     Content type: {}\n\
                     Content:\n\
                     {}\n\
                     === End Attachment Content ===",
                    attachment.filename,
                    attachment.mime_hint,
                    content.trim()
                ));
            }
            Extracted::Text(_) => {}
            degraded => {
                line.push_str(&format!("\n{}", degraded.render()));
            }
        }
    }

    line
}
