//! Adapter error types.
//!
//! All collaborators surface errors through [`AdapterError`].  The
//! dispatcher turns any of these into a failed result whose message is the
//! error's display text, so variants read well as plain sentences.

/// Unified error type for Jarvis collaborators.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// An I/O operation failed.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// An external command could not be run or reported failure.
    #[error("{operation} failed: {reason}")]
    ExecutionFailed { operation: String, reason: String },

    /// An operation exceeded its time limit.
    #[error("timeout after {seconds}s: {reason}")]
    Timeout { seconds: u64, reason: String },

    /// A capability is not available on this host.
    #[error("{capability} is not available: {reason}")]
    Unavailable { capability: String, reason: String },

    /// Invalid input provided to a collaborator.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience alias used throughout the adapters crate.
pub type Result<T> = std::result::Result<T, AdapterError>;
