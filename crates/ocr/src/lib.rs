pub mod config;
pub mod extract;
pub mod pipeline;
pub mod recognizer;
pub mod types;

pub use config::{Config, ConfigError, LabelConfig};
pub use extract::{extract_dates, process_text, DateExtractor};
pub use pipeline::LabelPipeline;
pub use recognizer::{MockRecognizer, OcrBackend, OcrError};
pub use types::{
    DateShape, ExpirySource, ExtractedDates, ExtractionResult, FailureKind, RawDateToken,
    NOT_DETECTED,
};
