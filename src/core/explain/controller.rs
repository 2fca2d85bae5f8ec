//! Validated generation loop.
//!
//! One call makes at most `max_retries + 1` provider requests, strictly in
//! sequence. Each response is trimmed and, when validation is requested,
//! scored; the attempt with the fewest deficiencies is kept so an exhausted
//! loop can still return something useful.

use super::level::Level;
use super::observer::{GenerationObserver, GenerationState, TracingObserver};
use super::prompts::PromptCatalog;
use super::result::{GenerationAttempt, GenerationRequest, GenerationResult};
use super::validator::{word_count, ResponseValidator};
use crate::core::llm::{ChatMessage, ChatRequest, LLMProvider};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Sampling parameters and retry policy
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    /// Default retry budget for batch and CLI calls
    pub max_retries: u32,
    /// Fixed pause between attempts
    pub retry_delay: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.9,
            max_tokens: 2048,
            max_retries: 2,
            retry_delay: Duration::from_millis(2000),
        }
    }
}

/// Drives prompt → provider → validator → retry/fallback.
///
/// Holds no per-call state, so one instance can be shared behind an `Arc`
/// by any number of concurrent callers.
pub struct GenerationController {
    provider: Arc<dyn LLMProvider>,
    config: GenerationConfig,
    validator: ResponseValidator,
    observer: Arc<dyn GenerationObserver>,
}

impl GenerationController {
    pub fn new(provider: Arc<dyn LLMProvider>, config: GenerationConfig) -> Self {
        Self {
            provider,
            config,
            validator: ResponseValidator::default(),
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_validator(mut self, validator: ResponseValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn GenerationObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn validator(&self) -> &ResponseValidator {
        &self.validator
    }

    pub fn provider(&self) -> &Arc<dyn LLMProvider> {
        &self.provider
    }

    /// Entry point for callers holding raw input.
    ///
    /// Rejects an unknown level code or blank text without contacting the
    /// provider. `max_retries` falls back to the configured default.
    pub async fn explain(
        &self,
        text: &str,
        level_code: &str,
        validate: bool,
        max_retries: Option<u32>,
    ) -> GenerationResult {
        let level = match level_code.parse::<Level>() {
            Ok(level) => level,
            Err(e) => return GenerationResult::invalid_input(None, e.to_string()),
        };

        let request = GenerationRequest::new(text.trim(), level)
            .with_validation(validate)
            .with_max_retries(max_retries.unwrap_or(self.config.max_retries));
        self.generate(request).await
    }

    /// Runs the retry loop for an already-parsed request.
    ///
    /// Blank source text is rejected before the provider is contacted.
    pub async fn generate(&self, request: GenerationRequest) -> GenerationResult {
        let level = request.level;
        if request.source_text.trim().is_empty() {
            return GenerationResult::invalid_input(Some(level), "Text cannot be empty");
        }
        let max_retries = request.max_retries;
        let chat_request = self.build_chat_request(&request);

        let mut best: Option<GenerationAttempt> = None;
        let mut calls: u32 = 0;

        for attempt in 0..=max_retries {
            let has_next = attempt < max_retries;

            self.observer
                .on_transition(level, attempt, GenerationState::Requesting);
            calls += 1;

            let response = match self.provider.chat(chat_request.clone()).await {
                Ok(response) => response,
                Err(e) => {
                    self.observer.on_provider_error(level, attempt, &e);
                    if !has_next {
                        // a failed final call fails the request, even after usable attempts
                        self.observer
                            .on_transition(level, attempt, GenerationState::Exhausted);
                        return GenerationResult::provider_failure(
                            level,
                            format!("Provider error: {e}"),
                            calls,
                        );
                    }
                    self.observer
                        .on_transition(level, attempt, GenerationState::RetryPending);
                    self.backoff().await;
                    continue;
                }
            };

            tracing::debug!(
                level = level.code(),
                attempt,
                model = %response.model,
                latency_ms = response.latency_ms,
                output_tokens = response.usage.map(|u| u.output_tokens),
                finish_reason = response.finish_reason.as_deref(),
                "completion received"
            );
            let text = response.content.trim().to_string();
            let words = word_count(&text);

            if !request.validate {
                self.observer
                    .on_transition(level, attempt, GenerationState::Accepted);
                return GenerationResult::unvalidated(text, words, level, calls);
            }

            self.observer
                .on_transition(level, attempt, GenerationState::Validating);
            let (valid, deficiencies) = self.validator.validate(&text, level);
            if valid {
                self.observer
                    .on_transition(level, attempt, GenerationState::Accepted);
                return GenerationResult::validated(text, words, level, calls);
            }

            self.observer
                .on_validation_failed(level, attempt, &deficiencies);
            let candidate = GenerationAttempt {
                response_text: text,
                word_count: words,
                deficiencies,
            };
            match &best {
                Some(current) if !candidate.is_better_than(current) => {}
                _ => best = Some(candidate),
            }

            if has_next {
                self.observer
                    .on_transition(level, attempt, GenerationState::RetryPending);
                self.backoff().await;
            }
        }

        self.observer
            .on_transition(level, max_retries, GenerationState::Exhausted);

        match best {
            Some(best) => GenerationResult::best_effort(best, level, calls),
            None => GenerationResult::provider_failure(
                level,
                format!("Failed to generate a response after {calls} attempts"),
                calls,
            ),
        }
    }

    /// One unvalidated generation per level, in level order.
    ///
    /// Levels run sequentially; a failure in one never affects the rest.
    pub async fn explain_batch(
        &self,
        text: &str,
        levels: Option<&[Level]>,
    ) -> BTreeMap<Level, GenerationResult> {
        let levels = levels.unwrap_or(&Level::ALL);
        let mut results = BTreeMap::new();

        for &level in levels {
            let result = self.explain(text, level.code(), false, None).await;
            if !result.success {
                tracing::warn!(
                    level = level.code(),
                    error = result.error_message.as_deref().unwrap_or_default(),
                    "batch level failed"
                );
            }
            results.insert(level, result);
        }

        results
    }

    fn build_chat_request(&self, request: &GenerationRequest) -> ChatRequest {
        let user_prompt = PromptCatalog::user_prompt(&request.source_text, request.level);
        ChatRequest::new(vec![ChatMessage::user(user_prompt)])
            .with_system(PromptCatalog::system_prompt(request.level))
            .with_temperature(self.config.temperature)
            .with_top_p(self.config.top_p)
            .with_max_tokens(self.config.max_tokens)
    }

    async fn backoff(&self) {
        if !self.config.retry_delay.is_zero() {
            tokio::time::sleep(self.config.retry_delay).await;
        }
    }
}
