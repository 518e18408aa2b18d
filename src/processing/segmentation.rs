use regex::Regex;
use tracing::debug;

use super::types::Clause;

/// Minimum length (in characters, after trimming) for a segment to count as
/// a clause. Shorter fragments are list markers, page furniture, or headings.
pub const MIN_CLAUSE_LEN: usize = 20;

/// Splits extracted contract text into an ordered sequence of clauses.
///
/// Boundaries are structural markers: numbered-list markers ("\n1.", "\n1)"),
/// bullet markers ("\n•", "\n-") and blank-line paragraph breaks. Any one
/// marker triggers a boundary. Segments are trimmed and segments shorter than
/// [`MIN_CLAUSE_LEN`] are dropped.
///
/// Segmentation is total: any input produces zero or more clauses, in
/// document order, and never fails. An input with no markers yields the whole
/// text as a single clause if it meets the length threshold.
pub fn segment_clauses(text: &str) -> Vec<Clause> {
    let boundary = Regex::new(r"\n\d+\.|\n\d+\)|\n•|\n-|\n\n").unwrap();

    let clauses: Vec<Clause> = boundary
        .split(text)
        .map(str::trim)
        .filter(|segment| segment.chars().count() >= MIN_CLAUSE_LEN)
        .enumerate()
        .map(|(index, segment)| Clause {
            index,
            text: segment.to_string(),
        })
        .collect();

    debug!(count = clauses.len(), "Segmented text into clauses");
    clauses
}
