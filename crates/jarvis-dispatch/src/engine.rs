//! Classify-then-dispatch entry point.

use std::sync::Arc;

use jarvis_intent::{Intent, IntentClassifier};
use tracing::info;

use crate::dispatcher::Dispatcher;
use crate::result::ExecutionResult;

/// Pairs a shared [`IntentClassifier`] with a [`Dispatcher`].
///
/// `Send + Sync`; one engine can serve any number of concurrent requests.
pub struct CommandEngine {
    classifier: Arc<IntentClassifier>,
    dispatcher: Dispatcher,
}

impl CommandEngine {
    pub fn new(classifier: Arc<IntentClassifier>, dispatcher: Dispatcher) -> Self {
        Self {
            classifier,
            dispatcher,
        }
    }

    pub fn classifier(&self) -> &Arc<IntentClassifier> {
        &self.classifier
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Classify `text` without executing anything.
    pub fn classify(&self, text: &str) -> Intent {
        self.classifier.classify(text)
    }

    /// Classify `text` and execute the resulting intent.
    pub async fn classify_and_dispatch(&self, text: &str) -> (Intent, ExecutionResult) {
        let intent = self.classify(text);
        info!(
            kind = %intent.kind,
            confidence = intent.confidence,
            target = intent.target(),
            "intent classified"
        );

        let result = self.dispatcher.dispatch(&intent).await;
        (intent, result)
    }
}

#[cfg(test)]
mod tests {
    use jarvis_intent::IntentKind;

    use crate::testing::Fakes;

    use super::*;

    #[tokio::test]
    async fn round_trip_through_classifier() {
        let fakes = Fakes::new();
        let engine = CommandEngine::new(
            Arc::new(IntentClassifier::new().unwrap()),
            fakes.dispatcher(),
        );

        let (intent, result) = engine.classify_and_dispatch("open github").await;
        assert_eq!(intent.kind, IntentKind::OpenWebsite);
        assert!(result.success);
        assert_eq!(fakes.opened_urls(), ["https://github.com"]);
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CommandEngine>();
    }
}
