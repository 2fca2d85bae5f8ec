//! Request, attempt and result records for one generation call.

use super::level::Level;
use serde::{Deserialize, Serialize};

/// Attached to results that fell back to the least-bad attempt.
pub const BEST_EFFORT_WARNING: &str = "best-effort response: did not fully validate";

/// Input to one `generate` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub source_text: String,
    pub level: Level,
    pub validate: bool,
    pub max_retries: u32,
}

impl GenerationRequest {
    pub fn new(source_text: impl Into<String>, level: Level) -> Self {
        Self {
            source_text: source_text.into(),
            level,
            validate: true,
            max_retries: 2,
        }
    }

    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// One provider response that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationAttempt {
    pub response_text: String,
    pub word_count: usize,
    pub deficiencies: Vec<String>,
}

impl GenerationAttempt {
    /// Strictly fewer deficiencies wins; ties keep the incumbent.
    pub fn is_better_than(&self, other: &GenerationAttempt) -> bool {
        self.deficiencies.len() < other.deficiencies.len()
    }
}

/// Why a result carries `success = false`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// Unrecognized level or empty text; no provider call was made
    InvalidInput,
    /// Every attempt failed at the provider and nothing usable came back
    ProviderFailure,
}

/// Terminal output of one generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub success: bool,
    pub text: Option<String>,
    /// `None` only when the requested level could not be parsed
    pub level: Option<Level>,
    pub word_count: Option<usize>,
    pub validation_passed: bool,
    pub deficiencies: Vec<String>,
    pub warning: Option<String>,
    pub error_message: Option<String>,
    #[serde(skip)]
    pub failure: Option<FailureKind>,
    /// Provider calls made while producing this result
    pub attempts: u32,
}

impl GenerationResult {
    /// Response accepted without running the validator
    pub fn unvalidated(text: String, word_count: usize, level: Level, attempts: u32) -> Self {
        Self {
            success: true,
            text: Some(text),
            level: Some(level),
            word_count: Some(word_count),
            validation_passed: false,
            deficiencies: Vec::new(),
            warning: None,
            error_message: None,
            failure: None,
            attempts,
        }
    }

    /// Response that passed every check
    pub fn validated(text: String, word_count: usize, level: Level, attempts: u32) -> Self {
        Self {
            validation_passed: true,
            ..Self::unvalidated(text, word_count, level, attempts)
        }
    }

    /// Retries exhausted; return the least-bad attempt with a warning
    pub fn best_effort(attempt: GenerationAttempt, level: Level, attempts: u32) -> Self {
        Self {
            success: true,
            text: Some(attempt.response_text),
            level: Some(level),
            word_count: Some(attempt.word_count),
            validation_passed: false,
            deficiencies: attempt.deficiencies,
            warning: Some(BEST_EFFORT_WARNING.to_string()),
            error_message: None,
            failure: None,
            attempts,
        }
    }

    pub fn invalid_input(level: Option<Level>, message: impl Into<String>) -> Self {
        Self::failed(level, FailureKind::InvalidInput, message.into(), 0)
    }

    pub fn provider_failure(level: Level, message: impl Into<String>, attempts: u32) -> Self {
        Self::failed(Some(level), FailureKind::ProviderFailure, message.into(), attempts)
    }

    fn failed(level: Option<Level>, kind: FailureKind, message: String, attempts: u32) -> Self {
        Self {
            success: false,
            text: None,
            level,
            word_count: None,
            validation_passed: false,
            deficiencies: Vec::new(),
            warning: None,
            error_message: Some(message),
            failure: Some(kind),
            attempts,
        }
    }

    /// Successful, but only as a best-effort fallback
    pub fn is_degraded(&self) -> bool {
        self.success && self.warning.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(deficiencies: &[&str]) -> GenerationAttempt {
        GenerationAttempt {
            response_text: "text".to_string(),
            word_count: 1,
            deficiencies: deficiencies.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[test]
    fn test_attempt_ranking_is_strict() {
        let one = attempt(&["a"]);
        let other_one = attempt(&["b"]);
        let two = attempt(&["a", "b"]);

        assert!(one.is_better_than(&two));
        assert!(!two.is_better_than(&one));
        assert!(!other_one.is_better_than(&one));
    }

    #[test]
    fn test_best_effort_sets_warning() {
        let result = GenerationResult::best_effort(attempt(&["Too short"]), Level::Teen, 3);
        assert!(result.success);
        assert!(!result.validation_passed);
        assert_eq!(result.warning.as_deref(), Some(BEST_EFFORT_WARNING));
        assert_eq!(result.deficiencies, vec!["Too short".to_string()]);
        assert!(result.is_degraded());
    }

    #[test]
    fn test_validated_has_no_deficiencies() {
        let result = GenerationResult::validated("ok".to_string(), 1, Level::Child, 1);
        assert!(result.validation_passed);
        assert!(result.deficiencies.is_empty());
        assert!(!result.is_degraded());
    }

    #[test]
    fn test_invalid_input_makes_no_calls() {
        let result = GenerationResult::invalid_input(None, "bad level");
        assert!(!result.success);
        assert_eq!(result.attempts, 0);
        assert_eq!(result.failure, Some(FailureKind::InvalidInput));
        assert!(result.text.is_none());
    }

    #[test]
    fn test_request_builder() {
        let request = GenerationRequest::new("photosynthesis", Level::Teen)
            .with_validation(false)
            .with_max_retries(0);
        assert!(!request.validate);
        assert_eq!(request.max_retries, 0);
    }
}
