//! Shared helpers for integration tests

#![allow(dead_code)]

use explainthis::core::explain::{required_sections, word_range, Level};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A response that satisfies every check for `level`.
pub fn valid_response(level: Level) -> String {
    response(level, required_sections(level))
}

/// A response of valid length that only contains `sections`.
pub fn response(level: Level, sections: &[&str]) -> String {
    let range = word_range(level);
    let target = (range.min + range.max) / 2;

    let mut tokens: Vec<String> = sections
        .iter()
        .flat_map(|s| s.split_whitespace())
        .map(str::to_string)
        .collect();
    let mut emojis = 0;
    while tokens.len() < target {
        if emojis < 10 {
            tokens.push("fun🎉".to_string());
            emojis += 1;
        } else {
            tokens.push("word".to_string());
        }
    }
    tokens.join(" ")
}

pub fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "llama-3.3-70b-versatile",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 100, "completion_tokens": 200, "total_tokens": 300 }
    })
}

/// Mount a completion reply that is served at most `times` times.
pub async fn reply_times(server: &MockServer, content: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .up_to_n_times(times)
        .mount(server)
        .await;
}
