//! Image analysis: decode, guard resolution, run OCR on the blocking pool.

use super::{DegradedKind, Extracted, truncate_content};
use crate::config::Limits;
use image::GenericImageView as _;
use std::sync::Arc;

/// Optical character recognition capability.
///
/// The engine itself is an external collaborator; implementations are
/// expected to be CPU-bound and are always invoked from the blocking pool.
pub trait OcrEngine: Send + Sync {
    /// Recognize text in a decoded image.
    fn recognize(&self, image: &image::DynamicImage) -> anyhow::Result<String>;
}

/// Decode image bytes, enforce the pixel ceiling, and OCR the result.
pub(super) async fn extract(bytes: Vec<u8>, limits: Limits, ocr: Arc<dyn OcrEngine>) -> Extracted {
    if bytes.len() as u64 > limits.max_file_bytes {
        return Extracted::degraded(
            DegradedKind::Oversized,
            format!(
                "Image of {} bytes exceeds the {} byte limit",
                bytes.len(),
                limits.max_file_bytes
            ),
        );
    }

    let outcome = tokio::task::spawn_blocking(move || analyze(&bytes, limits, ocr.as_ref()));
    match outcome.await {
        Ok(extracted) => extracted,
        Err(error) => {
            tracing::error!(%error, "image analysis task panicked");
            Extracted::degraded(
                DegradedKind::Decode,
                format!("Error analyzing image: {error}"),
            )
        }
    }
}

/// Blocking body: decode, guard width×height, OCR, assemble the analysis.
fn analyze(bytes: &[u8], limits: Limits, ocr: &dyn OcrEngine) -> Extracted {
    let decoded = match image::load_from_memory(bytes) {
        Ok(decoded) => decoded,
        Err(error) => {
            return Extracted::degraded(
                DegradedKind::Decode,
                format!("Error analyzing image: {error}"),
            );
        }
    };

    let (width, height) = decoded.dimensions();
    let pixels = u64::from(width) * u64::from(height);
    if pixels > limits.max_image_pixels {
        return Extracted::degraded(
            DegradedKind::Oversized,
            format!(
                "Image resolution {width}x{height} exceeds the {} pixel limit",
                limits.max_image_pixels
            ),
        );
    }

    let text = match ocr.recognize(&decoded) {
        Ok(text) => text,
        Err(error) => {
            tracing::warn!(%error, "ocr failed");
            return Extracted::degraded(
                DegradedKind::Decode,
                format!("Error analyzing image: {error}"),
            );
        }
    };

    if text.trim().is_empty() {
        return Extracted::degraded(DegradedKind::Empty, "Image file - no text detected");
    }

    let format = image::guess_format(bytes)
        .map(|f| f.to_mime_type())
        .unwrap_or("unknown");

    let analysis = format!(
        "Image properties:\n- Dimensions: {width}x{height}\n- Format: {format}\n\nExtracted text:\n{}",
        text.trim()
    );

    Extracted::Text(truncate_content(analysis, limits.max_content_chars))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// OCR double returning a fixed string.
    struct FixedOcr(&'static str);

    impl OcrEngine for FixedOcr {
        fn recognize(&self, _image: &image::DynamicImage) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let buffer = image::RgbImage::new(width, height);
        let mut bytes = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(buffer)
            .write_to(&mut bytes, image::ImageFormat::Png)
            .expect("png encoding");
        bytes.into_inner()
    }

    #[tokio::test]
    async fn recognized_text_includes_image_properties() {
        let outcome = extract(
            png_bytes(8, 4),
            Limits::default(),
            Arc::new(FixedOcr("hello from the scanner")),
        )
        .await;

        let rendered = outcome.render();
        assert!(rendered.contains("Dimensions: 8x4"));
        assert!(rendered.contains("hello from the scanner"));
    }

    #[tokio::test]
    async fn empty_ocr_degrades_to_no_text_detected() {
        let outcome = extract(png_bytes(4, 4), Limits::default(), Arc::new(FixedOcr("  \n")))
            .await;

        assert_eq!(outcome.kind(), Some(DegradedKind::Empty));
        assert_eq!(outcome.render(), "[Image file - no text detected]");
    }

    #[tokio::test]
    async fn pixel_ceiling_is_enforced_after_decode() {
        let limits = Limits {
            max_image_pixels: 16,
            ..Limits::default()
        };
        let outcome = extract(png_bytes(8, 4), limits, Arc::new(FixedOcr("ignored"))).await;

        assert_eq!(outcome.kind(), Some(DegradedKind::Oversized));
        assert!(outcome.render().contains("8x4"));
    }

    #[tokio::test]
    async fn undecodable_bytes_degrade_to_decode() {
        let outcome = extract(
            b"definitely not an image".to_vec(),
            Limits::default(),
            Arc::new(FixedOcr("ignored")),
        )
        .await;

        assert_eq!(outcome.kind(), Some(DegradedKind::Decode));
    }

    #[tokio::test]
    async fn byte_cap_is_checked_before_decoding() {
        let limits = Limits {
            max_file_bytes: 4,
            ..Limits::default()
        };
        let outcome = extract(png_bytes(4, 4), limits, Arc::new(FixedOcr("ignored"))).await;

        assert_eq!(outcome.kind(), Some(DegradedKind::Oversized));
    }
}
