//! Agent error types.
//!
//! Errors never reach the user: [`GeminiClient`](crate::GeminiClient)
//! turns each one into a spoken fallback.  They exist so the failure can be
//! logged with its cause.

/// Unified error type for model calls.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The API key is missing.
    #[error("missing api key for provider: {provider}")]
    MissingApiKey { provider: String },

    /// The HTTP request failed or the API returned an error status.
    #[error("llm request failed: {reason}")]
    RequestFailed { reason: String },

    /// The request did not complete in time.
    #[error("llm request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The response did not have the expected shape.
    #[error("llm response parse error: {reason}")]
    ParseFailed { reason: String },

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the agent crate.
pub type Result<T> = std::result::Result<T, AgentError>;
