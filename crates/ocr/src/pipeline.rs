use crate::extract::DateExtractor;
use crate::recognizer::OcrBackend;
use crate::types::{ExtractionResult, FailureKind};

/// Orchestrates: OCR → extract → validate → normalize.
///
/// Recognition failures never escape; they come back as a rejected
/// [`ExtractionResult`] like any other extraction failure.
pub struct LabelPipeline<'a, R: OcrBackend> {
    recognizer: R,
    extractor: &'a DateExtractor,
}

impl<R: OcrBackend> LabelPipeline<'static, R> {
    pub fn new(recognizer: R) -> Self {
        Self { recognizer, extractor: DateExtractor::standard() }
    }
}

impl<'a, R: OcrBackend> LabelPipeline<'a, R> {
    pub fn with_extractor(recognizer: R, extractor: &'a DateExtractor) -> Self {
        Self { recognizer, extractor }
    }

    /// Process raw image bytes (camera capture or upload).
    pub fn process_bytes(&self, data: &[u8]) -> ExtractionResult {
        match self.recognizer.recognize(data) {
            Ok(text) => self.extractor.process_text(&text),
            Err(e) => {
                tracing::warn!("Label recognition failed: {e}");
                ExtractionResult::rejected_with(
                    "",
                    FailureKind::Recognition,
                    format!("{}: {e}", FailureKind::Recognition),
                )
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
