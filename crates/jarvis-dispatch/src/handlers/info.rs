//! Time and date, information requests, conversation and unknown intents.

use jarvis_intent::Intent;
use tracing::debug;

use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::result::{DATA_NEEDS_AI, ExecutionResult};
use crate::tables::{LISTENING_PROMPT, THINKING_PLACEHOLDER, WEB_SEARCH_URL, canned_reply};

impl Dispatcher {
    pub(crate) fn time_date(&self, intent: &Intent) -> Result<ExecutionResult> {
        let lowered = intent.raw_text.to_lowercase();
        let now = self.collaborators.clock.now();

        let result = if lowered.contains("time") {
            ExecutionResult::success(format!("The time is {}", now.format("%I:%M %p")))
        } else if lowered.contains("date") || lowered.contains("day") {
            ExecutionResult::success(format!("Today is {}", now.format("%A, %B %d, %Y")))
        } else {
            ExecutionResult::failure("Unknown time/date query")
        };
        Ok(result)
    }

    /// Canned small-talk replies first, then an implicit web search for
    /// anything with a subject.
    pub(crate) async fn information(&self, intent: &Intent) -> Result<ExecutionResult> {
        let lowered = intent.raw_text.to_lowercase();
        if let Some(reply) = canned_reply(&lowered) {
            return Ok(ExecutionResult::success(reply));
        }

        let target = intent.target().trim();
        if target.is_empty() {
            return Ok(ExecutionResult::success(LISTENING_PROMPT));
        }

        // Always a plain web search; site qualifiers are part of the subject.
        let url = format!("{WEB_SEARCH_URL}{}", target.replace(' ', "+"));
        // The reply does not depend on whether the browser opened.
        match self.collaborators.browser.open(&url).await {
            Ok(opened) => debug!(url = %url, opened, "information lookup"),
            Err(e) => debug!(url = %url, error = %e, "information lookup not opened"),
        }
        Ok(ExecutionResult::success("Let me look that up for you"))
    }

    /// Open conversation is answered by the AI collaborator outside the
    /// dispatcher; flag the result accordingly.
    pub(crate) fn conversation(&self, _intent: &Intent) -> ExecutionResult {
        ExecutionResult::success(THINKING_PLACEHOLDER).with_data(DATA_NEEDS_AI, true)
    }

    pub(crate) fn unknown(&self, intent: &Intent) -> ExecutionResult {
        ExecutionResult::failure(format!(
            "I'm not sure what you mean by '{}'. Try asking me to open Chrome, search for \
             something, or check the time.",
            intent.raw_text
        ))
    }
}

#[cfg(test)]
mod tests {
    use jarvis_intent::{ENTITY_QUERY, ENTITY_TARGET, IntentKind};

    use crate::testing::Fakes;

    use super::*;

    #[tokio::test]
    async fn time_uses_clock() {
        let intent = Intent::new(IntentKind::TimeDate, 0.85, "what time is it");
        let result = Fakes::new().dispatcher().dispatch(&intent).await;

        assert!(result.success);
        assert_eq!(result.message, "The time is 02:07 PM");
    }

    #[tokio::test]
    async fn date_uses_clock() {
        let intent = Intent::new(IntentKind::TimeDate, 0.85, "what's the date");
        let result = Fakes::new().dispatcher().dispatch(&intent).await;

        assert_eq!(result.message, "Today is Tuesday, March 05, 2024");
    }

    #[tokio::test]
    async fn time_date_without_keyword() {
        let intent = Intent::new(IntentKind::TimeDate, 0.85, "when");
        let result = Fakes::new().dispatcher().dispatch(&intent).await;

        assert!(!result.success);
        assert_eq!(result.message, "Unknown time/date query");
    }

    #[tokio::test]
    async fn canned_reply_wins_over_lookup() {
        let fakes = Fakes::new();
        let intent = Intent::new(IntentKind::Information, 0.85, "What's your name?")
            .with_entity(ENTITY_TARGET, "your name?");
        let result = fakes.dispatcher().dispatch(&intent).await;

        assert!(result.message.starts_with("I'm JARVIS, your personal assistant"));
        assert!(fakes.opened_urls().is_empty());
    }

    #[tokio::test]
    async fn subject_triggers_lookup() {
        let fakes = Fakes::new();
        let intent = Intent::new(IntentKind::Information, 0.85, "who is ada lovelace")
            .with_entity(ENTITY_TARGET, "ada lovelace");
        let result = fakes.dispatcher().dispatch(&intent).await;

        assert!(result.success);
        assert_eq!(result.message, "Let me look that up for you");
        assert_eq!(
            fakes.opened_urls(),
            ["https://www.google.com/search?q=ada+lovelace"]
        );
    }

    #[tokio::test]
    async fn lookup_ignores_site_qualifier() {
        let fakes = Fakes::new();
        let intent = Intent::new(IntentKind::Information, 0.85, "who is trending on youtube")
            .with_entity(ENTITY_TARGET, "trending on youtube");
        fakes.dispatcher().dispatch(&intent).await;

        assert_eq!(
            fakes.opened_urls(),
            ["https://www.google.com/search?q=trending+on+youtube"]
        );
    }

    #[tokio::test]
    async fn nothing_to_look_up() {
        let intent = Intent::new(IntentKind::Information, 0.85, "tell me");
        let result = Fakes::new().dispatcher().dispatch(&intent).await;

        assert_eq!(result.message, LISTENING_PROMPT);
    }

    #[tokio::test]
    async fn conversation_requests_ai() {
        let intent = Intent::new(IntentKind::Conversation, 0.9, "tell a joke")
            .with_entity(ENTITY_QUERY, "tell a joke");
        let result = Fakes::new().dispatcher().dispatch(&intent).await;

        assert!(result.success);
        assert!(result.needs_ai());
        assert_eq!(result.message, THINKING_PLACEHOLDER);
    }

    #[tokio::test]
    async fn unknown_echoes_raw_text() {
        let intent = Intent::new(IntentKind::Unknown, 0.0, "flibber the jabber");
        let result = Fakes::new().dispatcher().dispatch(&intent).await;

        assert!(!result.success);
        assert!(result.message.contains("'flibber the jabber'"));
    }
}
