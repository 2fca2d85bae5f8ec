//! LLM Client Module
//!
//! Provides the completion-provider seam used by the explanation core:
//! - `LLMProvider` trait: one injectable request-in, text-out capability
//! - Chat request/response types shared by all providers
//! - `providers`: HTTP implementations (Groq, generic OpenAI-compatible)

mod error;
mod provider;
mod types;

pub mod providers;

pub use error::{LLMError, Result};
pub use provider::LLMProvider;
pub use providers::{GroqProvider, OpenAICompatibleProvider, ProviderConfig};
pub use types::{ChatMessage, ChatRequest, ChatResponse, MessageRole, TokenUsage};
