//! Test fixtures: synthetic model responses with a controlled word count,
//! section set and emoji count, plus a scripted provider.

use super::level::Level;
use super::validator::{required_sections, word_range};
use crate::core::llm::{ChatRequest, ChatResponse, LLMError, LLMProvider, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

const FILLER: &str = "word";
const EMOJI: char = '⭐';

#[derive(Debug, Clone)]
pub(crate) struct ResponseSpec {
    level: Level,
    words: usize,
    omit: Vec<String>,
    emojis: usize,
}

impl ResponseSpec {
    /// A response that passes validation for `level`
    pub(crate) fn valid(level: Level) -> Self {
        let range = word_range(level);
        Self {
            level,
            words: (range.min + range.max) / 2,
            omit: Vec::new(),
            emojis: if level == Level::Child { 8 } else { 0 },
        }
    }

    pub(crate) fn words(mut self, words: usize) -> Self {
        self.words = words;
        self
    }

    pub(crate) fn without(mut self, markers: &[&str]) -> Self {
        self.omit.extend(markers.iter().map(|m| m.to_string()));
        self
    }

    pub(crate) fn emojis(mut self, emojis: usize) -> Self {
        self.emojis = emojis;
        self
    }
}

/// Renders the spec. Emojis are glued onto filler tokens so they never
/// change the word count.
pub(crate) fn response_with(spec: ResponseSpec) -> String {
    let mut tokens: Vec<String> = required_sections(spec.level)
        .iter()
        .copied()
        .filter(|marker| !spec.omit.iter().any(|o| o == marker))
        .flat_map(str::split_whitespace)
        .map(str::to_string)
        .collect();

    let fillers = spec.words.saturating_sub(tokens.len());
    for i in 0..fillers {
        if i < spec.emojis {
            tokens.push(format!("{FILLER}{EMOJI}"));
        } else {
            tokens.push(FILLER.to_string());
        }
    }

    tokens.join(" ")
}

pub(crate) fn valid_response(level: Level) -> String {
    response_with(ResponseSpec::valid(level))
}

/// A response with exactly `count` deficiencies (1 to 3) at `level`
pub(crate) fn response_with_deficiencies(level: Level, count: usize) -> String {
    let mut spec = ResponseSpec::valid(level);
    if count >= 1 {
        spec = spec.without(&[required_sections(level)[0]]);
    }
    if count >= 2 {
        spec = spec.words(word_range(level).max + 10);
    }
    if count >= 3 {
        assert_eq!(level, Level::Child, "only child responses can have three");
        spec = spec.emojis(0);
    }
    response_with(spec)
}

// ============================================================================
// Scripted provider
// ============================================================================

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Text(String),
    Fail,
}

/// Replays a fixed script of replies, then repeats `fallback` forever.
pub(crate) struct MockProvider {
    script: Mutex<VecDeque<Reply>>,
    fallback: Reply,
    calls: AtomicU32,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockProvider {
    pub(crate) fn new(script: Vec<Reply>, fallback: Reply) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn always(reply: Reply) -> Self {
        Self::new(Vec::new(), reply)
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProvider for MockProvider {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);

        let reply = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match reply {
            Reply::Text(content) => Ok(ChatResponse {
                content,
                model: "mock-model".to_string(),
                provider: "mock".to_string(),
                usage: None,
                finish_reason: Some("stop".to_string()),
                latency_ms: 0,
            }),
            Reply::Fail => Err(LLMError::ApiError {
                status: 503,
                message: "upstream unavailable".to_string(),
            }),
        }
    }
}
