//! Fixed instruction templates for the summarization calls.
//!
//! Both passes run with deterministic generation settings (temperature 0) and
//! bounded output length; the templates here are the only prompts the crate
//! ever sends.

/// System prompt used for every generation call
pub const SYSTEM_PROMPT: &str = "You are a helpful legal assistant.";

/// Instruction template for summarizing one window of contract text
const WINDOW_TEMPLATE: &str = r#"You are a legal summarization assistant. Given the contract clause(s) below, create a concise, abstractive legal summary.
Focus on: parties, effective/expiration dates, termination rights, payment/compensation obligations, liability caps, indemnities, IP ownership/licensing, exclusivity, and any unusual risks.
Keep the answer concise (about 3-6 sentences) and use plain language but preserve legal facts and numeric values.

Clause(s):
{chunk_text}

Provide:
1) A short 1-2 sentence overview.
2) Bullet list of top 4 obligations / risks with short tags (e.g., TERMINATION: either party may..., LIABILITY CAP: $X...).
3) If present, list any key dates or numeric amounts found."#;

/// Instruction header for the final reduction pass
const REDUCTION_HEADER: &str = "You are a legal summarization assistant. The following are intermediate summaries \
of parts of a contract. Produce a single concise abstractive summary of the whole contract, \
emphasizing obligations, risks, and important dates and numeric values. \
Also produce a short (4-item) prioritized checklist of clauses that require human review.";

/// Build the prompt for one window of contract text
pub fn window_prompt(chunk_text: &str) -> String {
    WINDOW_TEMPLATE.replace("{chunk_text}", chunk_text)
}

/// Build the final reduction prompt from the combined window summaries
pub fn reduction_prompt(combined_summaries: &str) -> String {
    format!("{}\n\n{}", REDUCTION_HEADER, combined_summaries)
}
