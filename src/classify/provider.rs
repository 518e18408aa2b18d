use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tiktoken_rs::cl100k_base;
use tracing::debug;

/// Errors that can occur during clause classification
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// The classification service is unreachable, timed out, or returned an
    /// error status
    #[error("Classification service unavailable: {0}")]
    Unavailable(String),

    /// The service responded with something that is not a prediction
    #[error("Invalid classifier response: {0}")]
    InvalidResponse(String),

    /// Client misconfiguration
    #[error("Classifier configuration error: {0}")]
    ConfigError(String),

    /// Error while writing the clause table
    #[error("Clause table export error: {0}")]
    Export(String),
}

impl From<reqwest::Error> for ClassifyError {
    fn from(err: reqwest::Error) -> Self {
        ClassifyError::Unavailable(err.to_string())
    }
}

/// Configuration for the sequence classification client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Inference endpoint URL
    pub endpoint: String,
    /// API key for authentication
    pub api_key: Option<String>,
    /// Maximum tokens of clause text to send per request; longer clauses are
    /// truncated to this budget before dispatch
    pub max_input_tokens: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/classify".to_string(),
            api_key: None,
            max_input_tokens: 512,
            timeout_secs: 30,
        }
    }
}

/// Trait for the external text classification capability.
///
/// Given clause text, implementations return the integer label id of the
/// highest-scoring class in the model's closed label space.
#[async_trait]
pub trait ClassifierProvider: Send + Sync {
    /// Classify a single clause, returning the predicted label id
    async fn classify(&self, text: &str) -> Result<u32, ClassifyError>;
}

/// One class prediction as returned by the inference service
#[derive(Debug, Deserialize)]
struct Prediction {
    label: String,
    score: f64,
}

/// HTTP client for a hosted sequence classification model.
///
/// Speaks the inference-endpoint protocol: POST `{"inputs": text}`, receive
/// per-class `{label, score}` predictions where labels are `"LABEL_<id>"`.
pub struct HttpClassifier {
    client: Client,
    config: ClassifierConfig,
}

impl HttpClassifier {
    /// Create a new classifier client
    pub fn new(config: ClassifierConfig) -> Result<Self, ClassifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClassifyError::ConfigError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the client configuration
    pub fn get_config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Truncate clause text to the configured token budget.
    fn truncate_input(&self, text: &str) -> Result<String, ClassifyError> {
        let bpe = cl100k_base().map_err(|e| ClassifyError::ConfigError(e.to_string()))?;
        let tokens = bpe.encode_with_special_tokens(text);
        if tokens.len() <= self.config.max_input_tokens {
            return Ok(text.to_string());
        }

        let truncated = bpe
            .decode(tokens[..self.config.max_input_tokens].to_vec())
            .map_err(|e| ClassifyError::InvalidResponse(e.to_string()))?;
        debug!(
            from = tokens.len(),
            to = self.config.max_input_tokens,
            "Truncated clause to token budget"
        );
        Ok(truncated)
    }
}

#[async_trait]
impl ClassifierProvider for HttpClassifier {
    async fn classify(&self, text: &str) -> Result<u32, ClassifyError> {
        let input = self.truncate_input(text)?;

        let mut request = self
            .client
            .post(&self.config.endpoint)
            .json(&json!({ "inputs": input }));

        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifyError::Unavailable(format!(
                "status {}: {}",
                status, body
            )));
        }

        // The service returns one row of per-class predictions per input
        let rows: Vec<Vec<Prediction>> = response.json().await.map_err(|e| {
            ClassifyError::InvalidResponse(format!("unexpected response shape: {}", e))
        })?;

        let predictions = rows
            .into_iter()
            .next()
            .ok_or_else(|| ClassifyError::InvalidResponse("empty prediction set".to_string()))?;

        let best = predictions
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .ok_or_else(|| ClassifyError::InvalidResponse("empty prediction row".to_string()))?;

        parse_label_id(&best.label)
    }
}

/// Parses a `"LABEL_<id>"` class name into the integer label id.
fn parse_label_id(label: &str) -> Result<u32, ClassifyError> {
    let digits = label.strip_prefix("LABEL_").unwrap_or(label);
    digits
        .parse::<u32>()
        .map_err(|_| ClassifyError::InvalidResponse(format!("unparseable label: {}", label)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_label_ids() {
        assert_eq!(parse_label_id("LABEL_41").unwrap(), 41);
        assert_eq!(parse_label_id("7").unwrap(), 7);
        assert!(parse_label_id("Termination").is_err());
    }

    #[test]
    fn truncates_to_token_budget() {
        let classifier = HttpClassifier::new(ClassifierConfig {
            max_input_tokens: 8,
            ..Default::default()
        })
        .unwrap();

        let long = "indemnify and hold harmless ".repeat(100);
        let truncated = classifier.truncate_input(&long).unwrap();
        assert!(truncated.len() < long.len());

        let short = "Payment is due within 30 days.";
        let classifier = HttpClassifier::new(ClassifierConfig::default()).unwrap();
        assert_eq!(classifier.truncate_input(short).unwrap(), short);
    }
}
