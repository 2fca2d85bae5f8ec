//! Groq
//!
//! Default backend: hosted open-weight models behind an OpenAI-compatible API.

use super::openai::OpenAICompatibleProvider;
use crate::core::llm::{ChatRequest, ChatResponse, LLMProvider, Result};
use async_trait::async_trait;
use std::time::Duration;

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const GROQ_DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

pub struct GroqProvider {
    inner: OpenAICompatibleProvider,
}

impl GroqProvider {
    /// Point the provider at a different endpoint (proxies, test servers)
    pub fn with_base_url(
        api_key: String,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self> {
        let inner =
            OpenAICompatibleProvider::new("groq", "Groq", api_key, model, base_url, timeout)?
                .with_max_tokens(8192);
        Ok(Self { inner })
    }
}

#[async_trait]
impl LLMProvider for GroqProvider {
    fn id(&self) -> &str {
        "groq"
    }

    fn name(&self) -> &str {
        "Groq"
    }

    fn model(&self) -> &str {
        self.inner.model()
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let mut response = self.inner.chat(request).await?;
        response.provider = "groq".to_string();
        Ok(response)
    }
}
