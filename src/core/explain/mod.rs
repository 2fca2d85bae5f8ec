//! Explanation Core
//!
//! Turns arbitrary text into a simplified explanation for one of three
//! reading levels:
//! - `prompts`: the level-specific system/user instructions
//! - `validator`: length, section and expressive-marker checks
//! - `controller`: the validate/retry/fallback loop around the provider
//! - `observer`: side-channel hooks for logging the loop's transitions
//! - `response`: the caller-facing JSON shape

mod controller;
mod level;
mod observer;
mod prompts;
mod response;
mod result;
mod validator;

#[cfg(test)]
pub(crate) mod fixtures;

pub use controller::{GenerationConfig, GenerationController};
pub use level::{Level, ParseLevelError};
pub use observer::{GenerationObserver, GenerationState, NoopObserver, TracingObserver};
pub use prompts::PromptCatalog;
pub use response::ExplainResponse;
pub use result::{
    FailureKind, GenerationAttempt, GenerationRequest, GenerationResult, BEST_EFFORT_WARNING,
};
pub use validator::{
    required_sections, word_count, word_range, ExpressiveMarkerRule, ResponseValidator,
    ValidationReport, WordRange,
};
