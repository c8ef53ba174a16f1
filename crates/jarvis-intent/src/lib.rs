//! Intent classification for the Jarvis command assistant.
//!
//! This crate turns a free-text utterance into a typed [`Intent`]:
//!
//! - **[`intent`]** -- The [`Intent`] record and the closed [`IntentKind`]
//!   enumeration shared with the dispatcher.
//! - **[`rules`]** -- Immutable, ordered rule tables: curated site/app
//!   phrase tables (aho-corasick) and the regex rule groups.
//! - **[`classifier`]** -- The [`IntentClassifier`], which walks the rule
//!   tables in priority order and never fails.
//! - **[`error`]** -- Error types for rule-table construction.

pub mod classifier;
pub mod error;
pub mod intent;
pub mod rules;

pub use classifier::IntentClassifier;
pub use error::{IntentError, Result};
pub use intent::{ENTITY_QUERY, ENTITY_TARGET, Intent, IntentKind};
pub use rules::{PatternRule, PhraseTable, RuleMatch, RuleSet};
