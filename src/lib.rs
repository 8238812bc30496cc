//! Relaybot: the request-orchestration core of a chat-bot integration.
//!
//! Glues a messaging platform, a language-model API, and a document store:
//! throttled and retried inference calls, guarded attachment download and
//! text extraction, bounded transcript assembly, and reply chunking for a
//! platform with a hard message-size limit. The platform gateway, command
//! dispatch, and credential bootstrap live in the embedding application.

pub mod chunker;
pub mod config;
pub mod conversation;
pub mod docs;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod llm;
pub mod platform;

pub use error::{Error, Result};

use serde::{Deserialize, Serialize};

/// File attachment metadata as declared by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    pub mime_type: String,
    pub url: String,
    pub size_bytes: Option<u64>,
}

/// Outcome of fetching and extracting one attachment.
///
/// Immutable once produced; owned by the transcript entry that requested it.
#[derive(Debug, Clone)]
pub struct AttachmentResult {
    pub filename: String,
    pub mime_hint: String,
    pub outcome: extract::Extracted,
}
