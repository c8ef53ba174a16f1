//! Dispatcher error types.
//!
//! Handlers return [`DispatchError`] for failures they do not turn into a
//! friendly message themselves.  [`Dispatcher::dispatch`] converts every
//! such error into a failed
//! [`ExecutionResult`](crate::result::ExecutionResult); nothing is
//! propagated to the caller.
//!
//! [`Dispatcher::dispatch`]: crate::dispatcher::Dispatcher::dispatch

use jarvis_adapters::AdapterError;
use jarvis_intent::IntentKind;

/// Unified error type for intent handlers.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// A required entity was missing or empty.
    #[error("missing required entity `{entity}` for {kind}")]
    MissingEntity { kind: IntentKind, entity: String },

    /// An OS collaborator failed.
    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

/// Convenience alias used throughout the dispatch crate.
pub type Result<T> = std::result::Result<T, DispatchError>;
