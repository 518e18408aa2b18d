use md5::Context as Md5;

/// Computes a stable, prefixed MD5 id for a piece of content.
///
/// Every artifact of a pipeline run (clause table, summary, charts, report)
/// is keyed by the id of the extracted document text, so all outputs can be
/// joined back to the originating document.
///
/// # Arguments
/// * `content` - The string to hash
/// * `prefix` - Prefix to add to the hash (e.g. "run-")
///
/// # Returns
/// A string containing the prefixed MD5 hash
pub fn content_hash_id(content: &str, prefix: &str) -> String {
    let mut hasher = Md5::new();
    hasher.consume(content.as_bytes());
    format!("{}{:x}", prefix, hasher.compute())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_for_same_content() {
        let a = content_hash_id("termination clause", "run-");
        let b = content_hash_id("termination clause", "run-");
        assert_eq!(a, b);
        assert!(a.starts_with("run-"));
    }

    #[test]
    fn differs_for_different_content() {
        assert_ne!(
            content_hash_id("clause a", "run-"),
            content_hash_id("clause b", "run-")
        );
    }
}
