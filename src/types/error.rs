use thiserror::Error;

use crate::classify::ClassifyError;
use crate::processing::formats::FormatError;
use crate::report::ReportError;
use crate::summary::SummaryError;
use crate::types::llm::LLMError;

/// Top-level error type covering every stage of the pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Document format or extraction errors
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Classification errors
    #[error("Classification error: {0}")]
    Classify(#[from] ClassifyError),

    /// Text generation errors
    #[error("LLM error: {0}")]
    Llm(#[from] LLMError),

    /// Summarization errors
    #[error("Summary error: {0}")]
    Summary(#[from] SummaryError),

    /// Report aggregation errors
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;
