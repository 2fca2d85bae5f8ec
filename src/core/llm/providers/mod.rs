//! LLM Provider Implementations
//!
//! Concrete implementations of the `LLMProvider` trait plus the
//! configuration enum used to build one at startup.

mod groq;
mod openai;


pub use groq::{GroqProvider, GROQ_BASE_URL, GROQ_DEFAULT_MODEL};
pub use openai::{OpenAICompatibleProvider, OPENAI_BASE_URL};

use super::{LLMProvider, Result};
use std::sync::Arc;
use std::time::Duration;

/// Configuration for creating providers
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ProviderConfig {
    Groq {
        api_key: String,
        model: String,
        base_url: Option<String>,
        timeout: Duration,
    },
    /// Any endpoint speaking the OpenAI chat-completions protocol
    OpenAICompatible {
        api_key: String,
        model: String,
        base_url: String,
        timeout: Duration,
    },
}

impl ProviderConfig {
    /// Create a provider from this configuration
    pub fn create_provider(&self) -> Result<Arc<dyn LLMProvider>> {
        match self {
            ProviderConfig::Groq {
                api_key,
                model,
                base_url,
                timeout,
            } => {
                let base_url = base_url
                    .clone()
                    .unwrap_or_else(|| GROQ_BASE_URL.to_string());
                Ok(Arc::new(GroqProvider::with_base_url(
                    api_key.clone(),
                    model.clone(),
                    base_url,
                    *timeout,
                )?))
            }
            ProviderConfig::OpenAICompatible {
                api_key,
                model,
                base_url,
                timeout,
            } => Ok(Arc::new(OpenAICompatibleProvider::new(
                "openai-compatible",
                "OpenAI-compatible",
                api_key.clone(),
                model.clone(),
                base_url.clone(),
                *timeout,
            )?)),
        }
    }

    /// Get the provider ID for this configuration
    pub fn provider_id(&self) -> &'static str {
        match self {
            ProviderConfig::Groq { .. } => "groq",
            ProviderConfig::OpenAICompatible { .. } => "openai-compatible",
        }
    }

    /// Get the model name for this configuration
    pub fn model_name(&self) -> &str {
        match self {
            ProviderConfig::Groq { model, .. } | ProviderConfig::OpenAICompatible { model, .. } => {
                model
            }
        }
    }
}
