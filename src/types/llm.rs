use std::collections::HashMap;
use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Errors that can occur when talking to the text generation service
#[derive(Error, Debug)]
pub enum LLMError {
    /// API request failed
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Invalid response format
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LLMError::RequestFailed(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            LLMError::RequestFailed(format!("Connection failed: {}", err))
        } else {
            LLMError::RequestFailed(err.to_string())
        }
    }
}

/// Configuration for a text generation client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    /// Base API endpoint, e.g. "https://api.openai.com/v1"
    pub api_endpoint: Option<String>,
    /// API key for authentication
    pub api_key: Option<String>,
    /// Model identifier to request
    pub model: String,
    /// Optional organization id forwarded with each request
    pub org_id: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            api_endpoint: Some("https://api.openai.com/v1".to_string()),
            api_key: None,
            model: "gpt-4.1-mini".to_string(),
            org_id: None,
            timeout_secs: 60,
        }
    }
}

/// Parameters for a single generation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMParams {
    /// Maximum tokens to generate
    pub max_tokens: usize,
    /// Sampling temperature (0.0 for deterministic output)
    pub temperature: f32,
    /// Optional system prompt prepended to the conversation
    pub system_prompt: Option<String>,
    /// Additional provider-specific parameters
    pub extra_params: HashMap<String, String>,
}

impl Default for LLMParams {
    fn default() -> Self {
        Self {
            max_tokens: 400,
            temperature: 0.0,
            system_prompt: None,
            extra_params: HashMap::new(),
        }
    }
}

/// Response from a generation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMResponse {
    /// Generated text
    pub text: String,
    /// Total tokens consumed by the call, when the provider reports it
    pub tokens_used: Option<usize>,
    /// Model that produced the response
    pub model: String,
}
