//! PDF text extraction via a temporary file on the blocking pool.

use super::{DegradedKind, Extracted, truncate_content};
use anyhow::Context as _;
use std::io::Write as _;

/// Extract text from PDF bytes, one `[Page N]` section per non-empty page.
///
/// The bytes are materialized into a named temporary file that is removed
/// on every exit path when the handle drops, including parse failures.
pub(super) async fn extract(bytes: Vec<u8>, max_chars: usize) -> Extracted {
    let pages = match tokio::task::spawn_blocking(move || extract_pages(&bytes)).await {
        Ok(Ok(pages)) => pages,
        Ok(Err(error)) => {
            tracing::warn!(%error, "pdf extraction failed");
            return Extracted::degraded(
                DegradedKind::Decode,
                format!("Error extracting PDF content: {error}"),
            );
        }
        Err(error) => {
            tracing::error!(%error, "pdf extraction task panicked");
            return Extracted::degraded(
                DegradedKind::Decode,
                format!("Error extracting PDF content: {error}"),
            );
        }
    };

    render_pages(&pages, max_chars)
}

/// Assemble per-page text into one document, page markers included.
///
/// A document with zero pages, or whose pages are all blank, degrades to
/// an explicit placeholder — callers rely on non-emptiness to decide
/// whether to mention the attachment at all.
fn render_pages(pages: &[String], max_chars: usize) -> Extracted {
    let mut sections = Vec::new();
    for (index, page) in pages.iter().enumerate() {
        let trimmed = page.trim();
        if !trimmed.is_empty() {
            sections.push(format!("[Page {}]\n{}", index + 1, trimmed));
        }
    }

    if sections.is_empty() {
        return Extracted::degraded(
            DegradedKind::Empty,
            "PDF contains no extractable text (possibly a scanned document)",
        );
    }

    Extracted::Text(truncate_content(sections.join("\n\n"), max_chars))
}

/// Blocking body: write bytes to a temp file and parse page by page.
fn extract_pages(bytes: &[u8]) -> anyhow::Result<Vec<String>> {
    let mut file = tempfile::Builder::new()
        .suffix(".pdf")
        .tempfile()
        .context("failed to create temporary pdf file")?;

    file.write_all(bytes)
        .context("failed to write pdf bytes to temporary file")?;
    file.flush()
        .context("failed to flush temporary pdf file")?;

    let pages = pdf_extract::extract_text_by_pages(file.path())
        .context("failed to extract text from pdf")?;

    Ok(pages)
}
