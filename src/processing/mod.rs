//! Document processing functionality
//!
//! This module provides functionality for turning a contract document into
//! classified units of work:
//! - Document format handling and text extraction
//! - Clause segmentation

mod segmentation;
mod types;

/// Document format handling and text extraction.
///
/// This module provides functionality for:
/// - Detecting document formats based on file extensions
/// - Extracting text content from PDF and Word documents in reading order
pub mod formats;

pub use segmentation::{segment_clauses, MIN_CLAUSE_LEN};
pub use types::Clause;
