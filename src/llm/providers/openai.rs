use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::llm::Provider;
use crate::types::llm::{LLMConfig, LLMError, LLMParams, LLMResponse};

/// OpenAI chat completion response format
#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    total_tokens: usize,
}

/// OpenAI chat-completions client
pub struct OpenAIClient {
    /// HTTP client
    client: Client,

    /// Client configuration
    config: LLMConfig,
}

impl OpenAIClient {
    /// Create a new OpenAI client
    pub fn new(config: LLMConfig) -> Result<Self, LLMError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LLMError::ConfigError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Build the API request URL
    fn build_url(&self) -> Result<String, LLMError> {
        let endpoint = self
            .config
            .api_endpoint
            .as_ref()
            .ok_or_else(|| LLMError::ConfigError("API endpoint not configured".to_string()))?;

        Ok(format!("{}/chat/completions", endpoint.trim_end_matches('/')))
    }

    /// Build request headers
    fn build_headers(&self) -> Result<reqwest::header::HeaderMap, LLMError> {
        use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| LLMError::ConfigError("API key not configured".to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|e| LLMError::ConfigError(e.to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(org_id) = &self.config.org_id {
            headers.insert(
                "OpenAI-Organization",
                HeaderValue::from_str(org_id).map_err(|e| LLMError::ConfigError(e.to_string()))?,
            );
        }

        Ok(headers)
    }

    /// Build the chat message list for a prompt
    fn build_messages(&self, prompt: &str, params: &LLMParams) -> Vec<serde_json::Value> {
        let mut messages = Vec::new();

        if let Some(system_prompt) = &params.system_prompt {
            messages.push(json!({
                "role": "system",
                "content": system_prompt
            }));
        }

        messages.push(json!({
            "role": "user",
            "content": prompt
        }));

        messages
    }
}

#[async_trait]
impl Provider for OpenAIClient {
    async fn complete(&self, prompt: &str, params: &LLMParams) -> Result<LLMResponse, LLMError> {
        let url = self.build_url()?;
        let headers = self.build_headers()?;

        let body = json!({
            "model": self.config.model,
            "messages": self.build_messages(prompt, params),
            "max_tokens": params.max_tokens,
            "temperature": params.temperature,
        });

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(LLMError::RateLimitExceeded(format!("status {}", status)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LLMError::RequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let parsed: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| LLMError::InvalidResponse(e.to_string()))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::InvalidResponse("no choices in response".to_string()))?;

        debug!(model = %parsed.model, "Completed generation call");

        Ok(LLMResponse {
            text: choice.message.content.trim().to_string(),
            tokens_used: parsed.usage.map(|u| u.total_tokens),
            model: parsed.model,
        })
    }

    fn get_config(&self) -> &LLMConfig {
        &self.config
    }
}
