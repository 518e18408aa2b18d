use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::llm::{prompt, LLMParams, Provider};

use super::windows::{normalize_text, split_windows, WindowConfig};
use super::SummaryError;

/// Maximum tokens generated per window summary
const WINDOW_MAX_TOKENS: usize = 400;

/// Maximum tokens generated by the final reduction pass
const REDUCTION_MAX_TOKENS: usize = 600;

/// Two-level map-reduce summarizer over overlapping character windows.
///
/// The map phase summarizes each window independently (and concurrently, up
/// to `fan_out` in-flight calls); the reduce phase feeds every window summary
/// into one final generation call. A single failed window fails the whole
/// summary: the reduction has no way to signal a silently dropped window
/// without corrupting the final narrative.
pub struct HierarchicalSummarizer {
    provider: Arc<dyn Provider>,
    config: WindowConfig,
    fan_out: usize,
}

impl HierarchicalSummarizer {
    /// Create a summarizer over the given generation provider.
    pub fn new(provider: Arc<dyn Provider>, config: WindowConfig, fan_out: usize) -> Self {
        Self {
            provider,
            config,
            fan_out: fan_out.max(1),
        }
    }

    /// The windowing configuration in effect
    pub fn get_config(&self) -> &WindowConfig {
        &self.config
    }

    /// Produce the document-level abstractive summary.
    ///
    /// Fails fast: configuration problems are rejected before any generation
    /// call is dispatched, and any window failure aborts the run.
    pub async fn summarize(&self, text: &str) -> Result<String, SummaryError> {
        self.config.validate()?;

        let normalized = normalize_text(text);
        if normalized.is_empty() {
            return Err(SummaryError::EmptyContent);
        }

        let windows = split_windows(&normalized, &self.config);
        info!(windows = windows.len(), "Starting hierarchical summary");

        let window_summaries = self.summarize_windows(windows).await?;

        let combined = window_summaries.join("\n\n");
        let reduced = self
            .provider
            .complete(
                &prompt::reduction_prompt(&combined),
                &Self::generation_params(REDUCTION_MAX_TOKENS),
            )
            .await
            .map_err(|e| SummaryError::GenerationError(format!("reduction pass: {}", e)))?;

        Ok(reduced.text)
    }

    /// Map phase: one bounded-concurrency generation call per window.
    ///
    /// Results come back in window order regardless of completion order.
    async fn summarize_windows(&self, windows: Vec<String>) -> Result<Vec<String>, SummaryError> {
        let semaphore = Arc::new(Semaphore::new(self.fan_out));
        let mut tasks = Vec::with_capacity(windows.len());

        for (index, window) in windows.into_iter().enumerate() {
            let provider = Arc::clone(&self.provider);
            let semaphore = Arc::clone(&semaphore);

            tasks.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                debug!(window = index, chars = window.len(), "Summarizing window");
                provider
                    .complete(
                        &prompt::window_prompt(&window),
                        &Self::generation_params(WINDOW_MAX_TOKENS),
                    )
                    .await
            }));
        }

        let mut summaries = Vec::with_capacity(tasks.len());
        let mut failure: Option<SummaryError> = None;
        for (index, task) in tasks.into_iter().enumerate() {
            match task.await {
                Ok(Ok(response)) => summaries.push(response.text),
                Ok(Err(e)) => {
                    warn!(window = index, error = %e, "Window summary failed");
                    failure.get_or_insert(SummaryError::GenerationError(format!(
                        "window {}: {}",
                        index, e
                    )));
                }
                Err(e) => {
                    warn!(window = index, error = %e, "Window summary task failed");
                    failure.get_or_insert(SummaryError::GenerationError(format!(
                        "window {} task: {}",
                        index, e
                    )));
                }
            }
        }

        // Every spawned task has been awaited at this point, so an error
        // never leaves calls running against a cancelled run.
        match failure {
            Some(err) => Err(err),
            None => Ok(summaries),
        }
    }

    fn generation_params(max_tokens: usize) -> LLMParams {
        LLMParams {
            max_tokens,
            temperature: 0.0,
            system_prompt: Some(prompt::SYSTEM_PROMPT.to_string()),
            ..Default::default()
        }
    }
}
