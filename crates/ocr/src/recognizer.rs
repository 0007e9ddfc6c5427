use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR engine error: {0}")]
    Engine(String),
}

/// Abstraction over the OCR collaborator.
/// Implementations accept raw label-image bytes and return the recognized
/// lines joined by `\n` in reading order.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError>;
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns a pre-set string, or a pre-set failure.
pub struct MockRecognizer {
    outcome: Result<String, String>,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { outcome: Ok(text.into()) }
    }

    /// A recognizer whose every call fails with [`OcrError::Engine`].
    pub fn failing(reason: impl Into<String>) -> Self {
        Self { outcome: Err(reason.into()) }
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        self.outcome.clone().map_err(OcrError::Engine)
    }
}
