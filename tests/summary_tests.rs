use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use clauselens::llm::{LLMConfig, LLMError, LLMParams, LLMResponse, Provider};
use clauselens::summary::{HierarchicalSummarizer, SummaryError, WindowConfig};

/// Marker the reduction prompt always carries
const REDUCTION_MARKER: &str = "intermediate summaries";

/// Generation provider that scripts its responses and records every prompt.
struct ScriptedProvider {
    config: LLMConfig,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
    fail_on: Option<&'static str>,
}

impl ScriptedProvider {
    fn new(fail_on: Option<&'static str>) -> Self {
        Self {
            config: LLMConfig::default(),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            fail_on,
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

fn window_excerpt(prompt: &str) -> String {
    let start = prompt
        .find("Clause(s):\n")
        .map(|i| i + "Clause(s):\n".len())
        .unwrap_or(0);
    prompt[start..].chars().take(12).collect()
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn complete(&self, prompt: &str, _params: &LLMParams) -> Result<LLMResponse, LLMError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        if let Some(marker) = self.fail_on {
            if prompt.contains(marker) {
                return Err(LLMError::RequestFailed("scripted failure".to_string()));
            }
        }

        let text = if prompt.contains(REDUCTION_MARKER) {
            format!("FINAL::{}", prompt.len())
        } else {
            format!("summary of [{}]", window_excerpt(prompt))
        };

        Ok(LLMResponse {
            text,
            tokens_used: None,
            model: "scripted".to_string(),
        })
    }

    fn get_config(&self) -> &LLMConfig {
        &self.config
    }
}

fn letters(len: usize) -> String {
    (0..len)
        .map(|i| char::from(b'a' + (i % 26) as u8))
        .collect()
}

#[tokio::test]
async fn single_window_document_makes_two_calls() {
    let provider = Arc::new(ScriptedProvider::new(None));
    let summarizer = HierarchicalSummarizer::new(provider.clone(), WindowConfig::default(), 4);

    let result = summarizer.summarize("A short contract between two parties.").await;
    assert!(result.unwrap().starts_with("FINAL::"));
    // One window call plus one reduction call
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn reduction_sees_every_window_summary() {
    let provider = Arc::new(ScriptedProvider::new(None));
    let config = WindowConfig {
        chunk_size: 50,
        overlap: 10,
    };
    let summarizer = HierarchicalSummarizer::new(provider.clone(), config, 4);

    // 130 chars with step 40 -> exactly 3 windows
    let text = letters(130);
    summarizer.summarize(&text).await.unwrap();

    let prompts = provider.recorded_prompts();
    let window_prompts: Vec<&String> = prompts
        .iter()
        .filter(|p| !p.contains(REDUCTION_MARKER))
        .collect();
    assert_eq!(window_prompts.len(), 3);

    let reduction = prompts
        .iter()
        .find(|p| p.contains(REDUCTION_MARKER))
        .expect("reduction prompt missing");
    for window_prompt in &window_prompts {
        let expected = format!("summary of [{}]", window_excerpt(window_prompt));
        assert!(
            reduction.contains(&expected),
            "reduction is missing window summary {:?}",
            expected
        );
    }
}

#[tokio::test]
async fn failed_window_fails_the_whole_summary() {
    // Chars 50..80 are covered only by the middle window, so exactly one
    // window call hits the failure marker
    let mut text = letters(130);
    text.replace_range(60..66, "XFAILX");
    let provider = Arc::new(ScriptedProvider::new(Some("XFAILX")));
    let config = WindowConfig {
        chunk_size: 50,
        overlap: 10,
    };
    let summarizer = HierarchicalSummarizer::new(provider.clone(), config, 4);

    let err = summarizer.summarize(&text).await.unwrap_err();
    assert!(matches!(err, SummaryError::GenerationError(_)));

    // The reduction barrier must never run after a window failure
    assert!(provider
        .recorded_prompts()
        .iter()
        .all(|p| !p.contains(REDUCTION_MARKER)));
}

#[tokio::test]
async fn invalid_window_config_is_rejected_before_any_call() {
    let provider = Arc::new(ScriptedProvider::new(None));
    let config = WindowConfig {
        chunk_size: 200,
        overlap: 200,
    };
    let summarizer = HierarchicalSummarizer::new(provider.clone(), config, 4);

    let err = summarizer.summarize(&letters(500)).await.unwrap_err();
    assert!(matches!(err, SummaryError::InvalidConfig(_)));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn empty_content_is_rejected_before_any_call() {
    let provider = Arc::new(ScriptedProvider::new(None));
    let summarizer = HierarchicalSummarizer::new(provider.clone(), WindowConfig::default(), 4);

    let err = summarizer.summarize("  \n\n ").await.unwrap_err();
    assert!(matches!(err, SummaryError::EmptyContent));
    assert_eq!(provider.call_count(), 0);
}
