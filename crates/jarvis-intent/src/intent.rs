//! The classified intent record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Entity key carrying the primary argument (app name, site, search query,
/// file path, volume direction, ...).
pub const ENTITY_TARGET: &str = "target";

/// Entity key carrying the full query for conversational fallbacks.
pub const ENTITY_QUERY: &str = "query";

// ---------------------------------------------------------------------------
// IntentKind
// ---------------------------------------------------------------------------

/// The closed set of intent kinds the dispatcher knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    OpenApplication,
    CloseApplication,
    WebSearch,
    OpenWebsite,
    FileOperation,
    SystemControl,
    Information,
    TimeDate,
    Conversation,
    Unknown,
}

impl IntentKind {
    /// Every kind, in declaration order.
    pub const ALL: [IntentKind; 10] = [
        Self::OpenApplication,
        Self::CloseApplication,
        Self::WebSearch,
        Self::OpenWebsite,
        Self::FileOperation,
        Self::SystemControl,
        Self::Information,
        Self::TimeDate,
        Self::Conversation,
        Self::Unknown,
    ];

    /// The snake_case wire name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenApplication => "open_application",
            Self::CloseApplication => "close_application",
            Self::WebSearch => "web_search",
            Self::OpenWebsite => "open_website",
            Self::FileOperation => "file_operation",
            Self::SystemControl => "system_control",
            Self::Information => "information",
            Self::TimeDate => "time_date",
            Self::Conversation => "conversation",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Intent
// ---------------------------------------------------------------------------

/// A structured representation of a classified utterance.
///
/// Produced once per input and never mutated afterwards.  Handlers that need
/// more than the extracted entities re-read [`Intent::raw_text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// What the speaker wants done.
    pub kind: IntentKind,

    /// Named parameters extracted from the text (see [`ENTITY_TARGET`] and
    /// [`ENTITY_QUERY`]).  May be empty.
    pub entities: BTreeMap<String, String>,

    /// Classifier certainty between 0.0 and 1.0.  Diagnostic only.
    pub confidence: f64,

    /// The original input, casing preserved.
    pub raw_text: String,
}

impl Intent {
    /// Create an intent with no entities.
    pub fn new(kind: IntentKind, confidence: f64, raw_text: impl Into<String>) -> Self {
        Self {
            kind,
            entities: BTreeMap::new(),
            confidence,
            raw_text: raw_text.into(),
        }
    }

    /// Builder-style helper that adds one entity.
    #[must_use]
    pub fn with_entity(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entities.insert(key.into(), value.into());
        self
    }

    /// Look up an entity by key.
    pub fn entity(&self, key: &str) -> Option<&str> {
        self.entities.get(key).map(String::as_str)
    }

    /// The `target` entity, or an empty string when absent.
    pub fn target(&self) -> &str {
        self.entity(ENTITY_TARGET).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
