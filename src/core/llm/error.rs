//! Provider failures

/// Why a completion call produced no text
#[derive(Debug, thiserror::Error)]
pub enum LLMError {
    #[error("request could not be sent: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("provider returned HTTP {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("authentication failed: {0}")]
    AuthError(String),

    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("unusable completion: {0}")]
    InvalidResponse(String),

    #[error("request timed out")]
    Timeout,
}

pub type Result<T> = std::result::Result<T, LLMError>;
