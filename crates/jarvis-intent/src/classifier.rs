//! Intent classifier -- transforms raw user text into a typed [`Intent`].
//!
//! Rules are tried in a fixed priority order and the first hit wins:
//!
//! 1. **New-tab phrases** ("new tab", "open tab", "blank tab").
//! 2. **Curated websites** after open / go to / show me / visit.
//! 3. **Curated applications** after open / launch / start.
//! 4. **Regex rule groups** from [`RuleSet::builtin`].
//! 5. **Conversation fallback** carrying the whole utterance as the query.
//!
//! Curated tables run before the generic regex groups because list
//! membership is what tells "open youtube" (a site) apart from "open
//! chrome" (an application).

use tracing::debug;

use crate::error::Result;
use crate::intent::{ENTITY_QUERY, ENTITY_TARGET, Intent, IntentKind};
use crate::rules::{
    APPLICATION_VERBS, KNOWN_APPLICATIONS, KNOWN_WEBSITES, NEW_TAB_PHRASES, PhraseTable,
    RuleMatch, RuleSet, WEBSITE_VERBS,
};

/// Confidence reported for a new-tab request.
pub const NEW_TAB_CONFIDENCE: f64 = 0.98;

/// Confidence reported for curated-list hits.
pub const CURATED_CONFIDENCE: f64 = 0.95;

/// Confidence reported for regex rule hits.
pub const PATTERN_CONFIDENCE: f64 = 0.85;

/// Confidence reported for the conversation fallback.
pub const FALLBACK_CONFIDENCE: f64 = 0.9;

/// The intent classifier.
///
/// Holds only immutable tables, so a single instance can be shared behind an
/// `Arc` by any number of concurrent requests.
pub struct IntentClassifier {
    websites: PhraseTable,
    applications: PhraseTable,
    rules: RuleSet,
}

impl IntentClassifier {
    /// Compile the built-in tables.
    pub fn new() -> Result<Self> {
        let classifier = Self {
            websites: PhraseTable::new(IntentKind::OpenWebsite, WEBSITE_VERBS, KNOWN_WEBSITES)?,
            applications: PhraseTable::new(
                IntentKind::OpenApplication,
                APPLICATION_VERBS,
                KNOWN_APPLICATIONS,
            )?,
            rules: RuleSet::builtin()?,
        };

        debug!(
            websites = KNOWN_WEBSITES.len(),
            applications = KNOWN_APPLICATIONS.len(),
            patterns = classifier.rules.len(),
            "intent classifier ready"
        );

        Ok(classifier)
    }

    /// Classify raw user text.  Never fails.
    pub fn classify(&self, text: &str) -> Intent {
        let lowered = text.trim().to_lowercase();

        let intent = match self.match_action(&lowered) {
            Some((hit, confidence)) => {
                let intent = Intent::new(hit.kind, confidence, text);
                match hit.target {
                    Some(target) => intent.with_entity(ENTITY_TARGET, target),
                    None => intent,
                }
            }
            None => {
                // The query is the utterance as typed; blank input yields "".
                let query = if lowered.is_empty() { "" } else { text };
                Intent::new(IntentKind::Conversation, FALLBACK_CONFIDENCE, text)
                    .with_entity(ENTITY_QUERY, query)
            }
        };

        debug!(
            kind = %intent.kind,
            confidence = intent.confidence,
            entities = ?intent.entities,
            "intent classified"
        );

        intent
    }

    /// Walk tiers 1-4.  Returns `None` when the conversation fallback applies.
    fn match_action(&self, lowered: &str) -> Option<(RuleMatch, f64)> {
        if lowered.is_empty() {
            return None;
        }

        if NEW_TAB_PHRASES.iter().any(|phrase| lowered.contains(phrase)) {
            let hit = RuleMatch {
                kind: IntentKind::OpenWebsite,
                target: Some(String::new()),
            };
            return Some((hit, NEW_TAB_CONFIDENCE));
        }

        if let Some(hit) = self.websites.probe(lowered) {
            return Some((hit, CURATED_CONFIDENCE));
        }

        if let Some(hit) = self.applications.probe(lowered) {
            return Some((hit, CURATED_CONFIDENCE));
        }

        self.rules
            .first_match(lowered)
            .map(|hit| (hit, PATTERN_CONFIDENCE))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
