//! `/chat/completions` client
//!
//! The wire format shared by OpenAI, Groq and most hosted inference APIs.
//! Vendor providers wrap [`OpenAICompatibleProvider`] and only change the
//! endpoint, identity and completion budget.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{header::RETRY_AFTER, Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::core::llm::{
    ChatRequest, ChatResponse, LLMError, LLMProvider, MessageRole, Result, TokenUsage,
};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Seconds to wait when a 429 carries no usable `Retry-After`
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct CompletionBody<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: MessageRole,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionReply {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

// ============================================================================
// Provider
// ============================================================================

pub struct OpenAICompatibleProvider {
    id: String,
    name: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    base_url: String,
    client: Client,
}

impl OpenAICompatibleProvider {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        api_key: String,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            id: id.into(),
            name: name.into(),
            api_key,
            model,
            max_tokens: DEFAULT_MAX_TOKENS,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::builder().timeout(timeout).build()?,
        })
    }

    /// Completion budget for requests that leave `max_tokens` unset
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// The JSON body for `request`; the system prompt leads the message list.
    pub(crate) fn completion_body<'a>(&'a self, request: &'a ChatRequest) -> CompletionBody<'a> {
        let system = request.system_prompt.as_deref().map(|content| WireMessage {
            role: MessageRole::System,
            content,
        });
        let messages = system
            .into_iter()
            .chain(request.messages.iter().map(|m| WireMessage {
                role: m.role,
                content: &m.content,
            }))
            .collect();

        CompletionBody {
            model: &self.model,
            messages,
            max_tokens: request.max_tokens.unwrap_or(self.max_tokens),
            temperature: request.temperature,
            top_p: request.top_p,
        }
    }

    async fn error_for(status: StatusCode, resp: reqwest::Response) -> LLMError {
        match status {
            StatusCode::TOO_MANY_REQUESTS => LLMError::RateLimited {
                retry_after_secs: resp
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or(DEFAULT_RETRY_AFTER_SECS),
            },
            StatusCode::UNAUTHORIZED => LLMError::AuthError("Invalid API key".to_string()),
            _ => LLMError::ApiError {
                status: status.as_u16(),
                message: resp.text().await.unwrap_or_default(),
            },
        }
    }
}

#[async_trait]
impl LLMProvider for OpenAICompatibleProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let started = Instant::now();
        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&self.completion_body(&request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LLMError::Timeout
                } else {
                    LLMError::HttpError(e)
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Self::error_for(status, resp).await);
        }

        let reply: CompletionReply = resp
            .json()
            .await
            .map_err(|e| LLMError::InvalidResponse(e.to_string()))?;
        let latency_ms = started.elapsed().as_millis() as u64;

        let choice = reply
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::InvalidResponse("no choices in completion".to_string()))?;
        let content = choice
            .message
            .content
            .ok_or_else(|| LLMError::InvalidResponse("completion has no content".to_string()))?;

        Ok(ChatResponse {
            content,
            model: reply.model.unwrap_or_else(|| self.model.clone()),
            provider: self.id.clone(),
            usage: reply
                .usage
                .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens)),
            finish_reason: choice.finish_reason,
            latency_ms,
        })
    }
}
