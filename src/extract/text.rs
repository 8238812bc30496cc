//! Plain-text extraction: UTF-8 decode with a binary-file degradation.

use super::{DegradedKind, Extracted, truncate_content};

/// Decode bytes as UTF-8, truncating at the content cap.
pub(super) fn extract(bytes: Vec<u8>, filename: &str, max_chars: usize) -> Extracted {
    match String::from_utf8(bytes) {
        Ok(text) => Extracted::Text(truncate_content(text, max_chars)),
        Err(_) => Extracted::degraded(DegradedKind::Decode, format!("Binary file: {filename}")),
    }
}
