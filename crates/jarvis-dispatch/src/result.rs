//! The outcome of executing one intent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Data key telling the caller to forward the request to the conversational
/// AI collaborator.
pub const DATA_NEEDS_AI: &str = "needs_ai";

/// Data key marking a message that was written by the conversational AI.
pub const DATA_AI_GENERATED: &str = "ai_generated";

/// The result of one dispatch call.
///
/// `message` is always a natural-language sentence suitable for display and
/// speech, including on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Whether the handler considers the command done.
    pub success: bool,

    /// Human-readable outcome.
    pub message: String,

    /// Optional structured side information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

impl ExecutionResult {
    /// A successful result with no data.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    /// A failed result with no data.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// Builder-style helper that attaches one data entry.
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Look up a data entry.
    pub fn data_value(&self, key: &str) -> Option<&Value> {
        self.data.as_ref()?.get(key)
    }

    /// Whether the caller should ask the conversational AI for the reply.
    pub fn needs_ai(&self) -> bool {
        self.data_value(DATA_NEEDS_AI)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}
