//! Hooks into the generation loop.
//!
//! The controller reports each state change to an observer so the loop
//! itself stays free of logging policy. Observers must not influence the
//! outcome.

use super::level::Level;
use crate::core::llm::LLMError;
use std::fmt;

/// States of the per-request generation loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationState {
    /// Waiting on the provider
    Requesting,
    /// Scoring a response
    Validating,
    /// A result is being returned to the caller
    Accepted,
    /// Backing off before the next attempt
    RetryPending,
    /// No attempts remain
    Exhausted,
}

impl fmt::Display for GenerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenerationState::Requesting => "requesting",
            GenerationState::Validating => "validating",
            GenerationState::Accepted => "accepted",
            GenerationState::RetryPending => "retry_pending",
            GenerationState::Exhausted => "exhausted",
        };
        f.write_str(name)
    }
}

/// Receives loop events. `attempt` is zero-based.
pub trait GenerationObserver: Send + Sync {
    fn on_transition(&self, _level: Level, _attempt: u32, _state: GenerationState) {}

    fn on_provider_error(&self, _level: Level, _attempt: u32, _error: &LLMError) {}

    fn on_validation_failed(&self, _level: Level, _attempt: u32, _deficiencies: &[String]) {}
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GenerationObserver for NoopObserver {}

/// Emits `tracing` events for each transition
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl GenerationObserver for TracingObserver {
    fn on_transition(&self, level: Level, attempt: u32, state: GenerationState) {
        match state {
            GenerationState::Exhausted => {
                tracing::warn!(level = level.code(), attempt, "generation attempts exhausted")
            }
            GenerationState::Accepted => {
                tracing::info!(level = level.code(), attempt, "generation accepted")
            }
            _ => tracing::debug!(level = level.code(), attempt, %state, "generation state"),
        }
    }

    fn on_provider_error(&self, level: Level, attempt: u32, error: &LLMError) {
        tracing::warn!(level = level.code(), attempt, error = %error, "provider call failed");
    }

    fn on_validation_failed(&self, level: Level, attempt: u32, deficiencies: &[String]) {
        tracing::info!(
            level = level.code(),
            attempt,
            deficiencies = ?deficiencies,
            "response failed validation"
        );
    }
}
