//! Command dispatch for Jarvis.
//!
//! This crate executes classified intents:
//!
//! - **[`dispatcher`]** -- The [`Dispatcher`], an exhaustive match from
//!   [`IntentKind`](jarvis_intent::IntentKind) to one handler per kind.
//!   Handler failures never escape; they become failed results.
//! - **[`handlers`]** -- The per-kind handlers (apps, web, files, system,
//!   time, information, conversation).
//! - **[`tables`]** -- Fixed lookup tables: app launch commands per
//!   platform, site URLs, search endpoints, canned replies.
//! - **[`engine`]** -- [`CommandEngine`], the classify-then-dispatch entry
//!   point used by callers.
//! - **[`result`]** -- The [`ExecutionResult`] record.
//! - **[`error`]** -- Handler-level error types.

pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod result;
pub mod tables;

#[cfg(test)]
mod testing;

pub use dispatcher::{Collaborators, Dispatcher};
pub use engine::CommandEngine;
pub use error::{DispatchError, Result};
pub use result::ExecutionResult;
