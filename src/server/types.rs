use serde::{Deserialize, Serialize};

fn default_level() -> String {
    "1".to_string()
}

/// Body of `POST /api/explain`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainRequest {
    #[serde(default)]
    pub text: String,
    /// Level code; `level` is accepted too
    #[serde(default = "default_level", alias = "level")]
    pub complexity: String,
    #[serde(default)]
    pub validate: bool,
}

/// Body of `POST /api/explain/batch`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub text: String,
    /// Level codes to run; all three when absent
    #[serde(default)]
    pub levels: Option<Vec<String>>,
}

/// Error body for requests rejected before reaching the core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub success: bool,
    pub error_message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: message.into(),
        }
    }
}
