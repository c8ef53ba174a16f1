//! Conversational AI for Jarvis.
//!
//! - **[`ai`]** -- The [`ConversationalAi`] collaborator trait.
//! - **[`gemini`]** -- [`GeminiClient`], backed by the Gemini
//!   `generateContent` API with optional Google Search grounding.
//! - **[`fallback`]** -- [`FallbackResponder`], keyword replies used when the
//!   model is unreachable.
//! - **[`assistant`]** -- [`Assistant`], which decides per utterance whether
//!   the AI answers or the command engine dispatches.
//! - **[`error`]** -- Error types for model calls.

pub mod ai;
pub mod assistant;
pub mod error;
pub mod fallback;
pub mod gemini;

pub use ai::ConversationalAi;
pub use assistant::{Assistant, AssistantReply};
pub use error::{AgentError, Result};
pub use fallback::FallbackResponder;
pub use gemini::{Exchange, GeminiClient, GeminiConfig};
