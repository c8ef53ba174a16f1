//! Per-kind intent handlers.
//!
//! Each submodule adds `impl Dispatcher` methods for a family of intents.
//! Handlers return `Ok` with a failed [`ExecutionResult`] for conditions
//! they can explain in plain words, and `Err` for everything else.
//!
//! [`ExecutionResult`]: crate::result::ExecutionResult

mod apps;
mod files;
mod info;
mod system;
mod web;

pub use files::FileAction;
pub use system::SystemAction;
