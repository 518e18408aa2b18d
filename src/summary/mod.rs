//! Hierarchical chunked summarization.
//!
//! The full document text is split into overlapping character windows; each
//! window is summarized independently by the generation capability and a
//! single reduction call combines the window summaries into the final
//! document-level summary plus a prioritized review checklist.

mod hierarchical;
mod windows;

pub use hierarchical::HierarchicalSummarizer;
pub use windows::{normalize_text, split_windows, WindowConfig};

use thiserror::Error;

/// Errors that can occur during summary generation
#[derive(Error, Debug)]
pub enum SummaryError {
    /// Content is empty after normalization
    #[error("Empty content")]
    EmptyContent,

    /// Windowing configuration is invalid
    #[error("Invalid window configuration: {0}")]
    InvalidConfig(String),

    /// A generation call failed; the whole summary fails with it
    #[error("Generation error: {0}")]
    GenerationError(String),
}
