use serde::{Deserialize, Serialize};

/// A segmented unit of contract text, the atomic classification target.
///
/// Clauses are trimmed substrings of the extracted document text, ordered by
/// document position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    /// Position of this clause in the original document (0-based)
    pub index: usize,
    /// The trimmed clause text
    pub text: String,
}

impl Clause {
    /// Number of whitespace-separated words in the clause
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
