//! Attachment download with whitelist, size pre-flight, and timeouts.

pub mod transport;

use crate::config::Limits;
use crate::extract::{DegradedKind, Extracted, TextExtractor};
use crate::{Attachment, AttachmentResult};
use std::sync::Arc;
use self::transport::{Transport, TransportError};

/// Extensions accepted for download and extraction.
const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "png", "jpg", "jpeg", "gif", "bmp", "txt"];

/// Declared content-type prefixes accepted for download.
const ALLOWED_MIME_PREFIXES: &[&str] = &["image/", "application/pdf", "text/"];

/// How an attachment's bytes should be extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetectedType {
    Pdf,
    Image,
    Text,
}

/// Downloads attachments and turns their bytes into text.
///
/// `fetch` never fails: every failure path is a degraded outcome so
/// callers keep assembling context without special-casing errors.
#[derive(Clone)]
pub struct AttachmentFetcher {
    transport: Arc<dyn Transport>,
    extractor: TextExtractor,
    limits: Limits,
}

impl AttachmentFetcher {
    pub fn new(transport: Arc<dyn Transport>, extractor: TextExtractor, limits: Limits) -> Self {
        Self {
            transport,
            extractor,
            limits,
        }
    }

    /// Fetch and extract one attachment.
    #[tracing::instrument(skip(self, attachment), fields(filename = %attachment.filename))]
    pub async fn fetch(&self, attachment: &Attachment) -> AttachmentResult {
        let outcome = self.fetch_inner(attachment).await;

        if let Extracted::Degraded { kind, detail } = &outcome {
            tracing::debug!(?kind, detail = %detail, "attachment degraded");
        }

        AttachmentResult {
            filename: attachment.filename.clone(),
            mime_hint: attachment.mime_type.clone(),
            outcome,
        }
    }

    async fn fetch_inner(&self, attachment: &Attachment) -> Extracted {
        let Some(detected) = classify(attachment) else {
            return Extracted::degraded(
                DegradedKind::Unsupported,
                format!("Unsupported attachment type: {}", attachment.filename),
            );
        };

        // Platform-declared size: reject before touching the network.
        if let Some(size) = attachment.size_bytes
            && size > self.limits.max_file_bytes
        {
            return self.oversized(attachment, size);
        }

        let download = tokio::time::timeout(self.limits.download_timeout, self.download(attachment));
        let bytes = match download.await {
            Err(_) => {
                return Extracted::degraded(
                    DegradedKind::Timeout,
                    format!("Timeout downloading {}", attachment.filename),
                );
            }
            Ok(Err(DownloadFailure::Oversized(size))) => return self.oversized(attachment, size),
            Ok(Err(DownloadFailure::Transport(error))) => {
                tracing::warn!(%error, filename = %attachment.filename, "attachment download failed");
                return Extracted::degraded(
                    DegradedKind::Transport,
                    format!("Network error fetching {}: {error}", attachment.filename),
                );
            }
            Ok(Ok(bytes)) => bytes,
        };

        match detected {
            DetectedType::Pdf => self.extractor.extract_pdf(bytes).await,
            DetectedType::Image => self.extractor.extract_image(bytes).await,
            DetectedType::Text => self.extractor.extract_text(bytes, &attachment.filename),
        }
    }

    /// Download the body, aborting before the read when the declared
    /// length already exceeds the cap.
    async fn download(&self, attachment: &Attachment) -> Result<Vec<u8>, DownloadFailure> {
        let download = self
            .transport
            .begin(&attachment.url)
            .await
            .map_err(DownloadFailure::Transport)?;

        if let Some(declared) = download.declared_len()
            && declared > self.limits.max_file_bytes
        {
            return Err(DownloadFailure::Oversized(declared));
        }

        let bytes = download.body().await.map_err(DownloadFailure::Transport)?;

        // Servers can lie about (or omit) the declared length.
        if bytes.len() as u64 > self.limits.max_file_bytes {
            return Err(DownloadFailure::Oversized(bytes.len() as u64));
        }

        Ok(bytes)
    }

    fn oversized(&self, attachment: &Attachment, size: u64) -> Extracted {
        Extracted::degraded(
            DegradedKind::Oversized,
            format!(
                "File {} of {size} bytes exceeds the {} byte limit",
                attachment.filename, self.limits.max_file_bytes
            ),
        )
    }
}

enum DownloadFailure {
    Oversized(u64),
    Transport(TransportError),
}

/// Whitelist check and type detection, from the filename extension and the
/// declared content type. No I/O.
fn classify(attachment: &Attachment) -> Option<DetectedType> {
    let extension = attachment
        .filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())?;

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return None;
    }

    // Fall back to the extension's well-known MIME type when the platform
    // didn't declare one.
    let declared = if attachment.mime_type.trim().is_empty() {
        mime_guess::from_path(&attachment.filename)
            .first()
            .map(|m| m.essence_str().to_string())?
    } else {
        attachment.mime_type.clone()
    };

    if !ALLOWED_MIME_PREFIXES
        .iter()
        .any(|prefix| declared.starts_with(prefix))
    {
        return None;
    }

    match extension.as_str() {
        "pdf" => Some(DetectedType::Pdf),
        "png" | "jpg" | "jpeg" | "gif" | "bmp" => Some(DetectedType::Image),
        "txt" => Some(DetectedType::Text),
        _ => None,
    }
}
