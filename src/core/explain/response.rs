use super::result::GenerationResult;
use serde::{Deserialize, Serialize};

/// JSON shape returned to web and CLI callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainResponse {
    pub success: bool,
    pub simplified: Option<String>,
    /// Wire code of the level, e.g. `"2"`
    pub level: Option<String>,
    pub word_count: Option<usize>,
    pub validation_passed: bool,
    pub deficiencies: Vec<String>,
    pub warning: Option<String>,
    pub error_message: Option<String>,
}

impl From<GenerationResult> for ExplainResponse {
    fn from(result: GenerationResult) -> Self {
        Self {
            success: result.success,
            simplified: result.text,
            level: result.level.map(|l| l.code().to_string()),
            word_count: result.word_count,
            validation_passed: result.validation_passed,
            deficiencies: result.deficiencies,
            warning: result.warning,
            error_message: result.error_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::explain::Level;
    use serde_json::json;

    #[test]
    fn test_serializes_camel_case() {
        let result = GenerationResult::validated("Hello there".to_string(), 2, Level::Teen, 1);
        let value = serde_json::to_value(ExplainResponse::from(result)).unwrap();

        assert_eq!(
            value,
            json!({
                "success": true,
                "simplified": "Hello there",
                "level": "2",
                "wordCount": 2,
                "validationPassed": true,
                "deficiencies": [],
                "warning": null,
                "errorMessage": null
            })
        );
    }

    #[test]
    fn test_failure_has_no_text() {
        let result = GenerationResult::invalid_input(None, "Invalid level '9'");
        let response = ExplainResponse::from(result);

        assert!(!response.success);
        assert!(response.simplified.is_none());
        assert!(response.level.is_none());
        assert_eq!(response.error_message.as_deref(), Some("Invalid level '9'"));
    }
}
