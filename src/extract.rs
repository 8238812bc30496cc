//! Format-specific text extraction with size guards and truncation.

pub mod image;
pub mod pdf;
pub mod text;

pub use self::image::OcrEngine;

use crate::config::Limits;
use std::sync::Arc;

/// Marker appended when extracted content is cut at the length cap.
pub const TRUNCATION_MARKER: &str = "\n[Content truncated due to length]";

/// Why an extraction produced no usable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradedKind {
    /// Extension or declared content type outside the whitelist.
    Unsupported,
    /// Byte or pixel ceiling exceeded.
    Oversized,
    /// Download or processing budget exceeded.
    Timeout,
    /// Connection or HTTP failure.
    Transport,
    /// Corrupt PDF, invalid UTF-8, or undecodable image.
    Decode,
    /// Nothing extractable (zero-page PDF, OCR found no text).
    Empty,
}

/// Outcome of one extraction.
///
/// Failure is data here, not an error: downstream consumers keep
/// assembling context and render degraded outcomes as bracketed
/// placeholder text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Text(String),
    Degraded { kind: DegradedKind, detail: String },
}

impl Extracted {
    pub fn degraded(kind: DegradedKind, detail: impl Into<String>) -> Self {
        Extracted::Degraded {
            kind,
            detail: detail.into(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Extracted::Degraded { .. })
    }

    pub fn kind(&self) -> Option<DegradedKind> {
        match self {
            Extracted::Text(_) => None,
            Extracted::Degraded { kind, .. } => Some(*kind),
        }
    }

    /// Render for inclusion in a transcript or prompt. Degraded outcomes
    /// keep the original bracketed placeholder form.
    pub fn render(&self) -> String {
        match self {
            Extracted::Text(text) => text.clone(),
            Extracted::Degraded { detail, .. } => format!("[{detail}]"),
        }
    }
}

/// Cut `text` at `max_chars` characters, appending the truncation marker.
pub fn truncate_content(text: String, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text;
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}{TRUNCATION_MARKER}")
}

/// Format-specific content extraction with shared limits.
///
/// OCR is an injected capability; PDF parsing and OCR both run on the
/// blocking pool so the scheduler thread never stalls on CPU-bound work.
#[derive(Clone)]
pub struct TextExtractor {
    limits: Limits,
    ocr: Arc<dyn OcrEngine>,
}

impl TextExtractor {
    pub fn new(limits: Limits, ocr: Arc<dyn OcrEngine>) -> Self {
        Self { limits, ocr }
    }

    /// Extract text from PDF bytes, page by page.
    pub async fn extract_pdf(&self, bytes: Vec<u8>) -> Extracted {
        pdf::extract(bytes, self.limits.max_content_chars).await
    }

    /// Decode an image, enforce the pixel ceiling, and run OCR.
    pub async fn extract_image(&self, bytes: Vec<u8>) -> Extracted {
        image::extract(bytes, self.limits, Arc::clone(&self.ocr)).await
    }

    /// Decode bytes as UTF-8 plain text.
    pub fn extract_text(&self, bytes: Vec<u8>, filename: &str) -> Extracted {
        text::extract(bytes, filename, self.limits.max_content_chars)
    }
}
