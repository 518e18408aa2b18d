use regex::Regex;
use serde::{Deserialize, Serialize};

use super::SummaryError;

/// Windowing parameters for the chunked summarizer.
///
/// Windows are measured in characters; `overlap` must be strictly less than
/// `chunk_size` so consecutive windows always make progress.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window length in characters
    pub chunk_size: usize,
    /// Characters shared between a window and its successor
    pub overlap: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            chunk_size: 2500,
            overlap: 200,
        }
    }
}

impl WindowConfig {
    /// Validate the configuration.
    ///
    /// Called before any generation work is dispatched so an invalid config
    /// never costs a single external call.
    pub fn validate(&self) -> Result<(), SummaryError> {
        if self.chunk_size == 0 {
            return Err(SummaryError::InvalidConfig(
                "chunk_size must be positive".to_string(),
            ));
        }
        if self.overlap >= self.chunk_size {
            return Err(SummaryError::InvalidConfig(format!(
                "overlap ({}) must be strictly less than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }
        Ok(())
    }

    /// Characters between the starts of consecutive windows
    pub fn step(&self) -> usize {
        self.chunk_size - self.overlap
    }
}

/// Collapses runs of 2+ newlines to exactly two and trims the ends.
pub fn normalize_text(text: &str) -> String {
    let blank_runs = Regex::new(r"\n{2,}").unwrap();
    blank_runs.replace_all(text, "\n\n").trim().to_string()
}

/// Splits text into overlapping character windows.
///
/// The first window covers characters `[0, chunk_size)`; each subsequent
/// window starts exactly `chunk_size - overlap` characters after its
/// predecessor. The last window is the one that reaches the end of the text,
/// so for a text of L chars the count is
/// `ceil(max(L - overlap, 0) / (chunk_size - overlap))`, with any non-empty
/// text no longer than `chunk_size` yielding exactly one window.
///
/// Windows are sliced on char boundaries, never mid-codepoint.
pub fn split_windows(text: &str, config: &WindowConfig) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    // Byte offset of every char boundary, plus the end of the text
    let mut offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    offsets.push(text.len());
    let char_count = offsets.len() - 1;

    let mut windows = Vec::new();
    let mut start = 0;
    loop {
        let end = (start + config.chunk_size).min(char_count);
        windows.push(text[offsets[start]..offsets[end]].to_string());
        if end == char_count {
            break;
        }
        start += config.step();
    }

    windows
}
