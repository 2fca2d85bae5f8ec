//! The completion seam injected into the explanation core

use async_trait::async_trait;

use super::error::Result;
use super::types::{ChatRequest, ChatResponse};

/// A chat-completion capability: request in, generated text out (or failure).
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Stable identifier, used in logs
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn model(&self) -> &str;

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;
}
