//! Intent engine error types.
//!
//! Classification itself never fails; errors only surface while the rule
//! tables are being compiled.

/// Unified error type for the intent crate.
#[derive(Debug, thiserror::Error)]
pub enum IntentError {
    /// A regex pattern in a rule table is invalid.
    #[error("invalid regex pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Building a phrase automaton failed.
    #[error("phrase table build error: {reason}")]
    PhraseTableBuild { reason: String },
}

/// Convenience alias used throughout the intent crate.
pub type Result<T> = std::result::Result<T, IntentError>;
