use async_trait::async_trait;

use crate::types::llm::{LLMConfig, LLMError, LLMParams, LLMResponse};

/// Trait for text generation provider implementations
#[async_trait]
pub trait Provider: Send + Sync {
    /// Generate a text completion for a prompt
    async fn complete(&self, prompt: &str, params: &LLMParams) -> Result<LLMResponse, LLMError>;

    /// Get provider configuration
    fn get_config(&self) -> &LLMConfig;
}
