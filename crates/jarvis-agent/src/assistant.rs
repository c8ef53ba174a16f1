//! The assistant front door: answer with the AI or dispatch a command.

use std::sync::Arc;

use jarvis_dispatch::result::DATA_AI_GENERATED;
use jarvis_dispatch::{CommandEngine, ExecutionResult};
use jarvis_intent::{Intent, IntentKind};
use serde::Serialize;
use tracing::{debug, info};

use crate::ai::ConversationalAi;

/// Everything produced for one utterance.
#[derive(Debug, Clone, Serialize)]
pub struct AssistantReply {
    pub intent: Intent,
    pub result: ExecutionResult,
    /// Text to speak back, set for successfully executed commands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech: Option<String>,
}

/// Routes questions and small talk to a [`ConversationalAi`] and everything
/// else to the [`CommandEngine`].
pub struct Assistant {
    engine: CommandEngine,
    ai: Option<Arc<dyn ConversationalAi>>,
}

impl Assistant {
    pub fn new(engine: CommandEngine) -> Self {
        Self { engine, ai: None }
    }

    #[must_use]
    pub fn with_ai(mut self, ai: Arc<dyn ConversationalAi>) -> Self {
        self.ai = Some(ai);
        self
    }

    pub fn engine(&self) -> &CommandEngine {
        &self.engine
    }

    /// Whether an AI collaborator is attached and available.
    pub fn ai_available(&self) -> bool {
        self.ai.as_ref().is_some_and(|ai| ai.is_available())
    }

    /// Handle one utterance.
    pub async fn respond(&self, text: &str) -> AssistantReply {
        let intent = self.engine.classify(text);
        info!(kind = %intent.kind, confidence = intent.confidence, "intent classified");

        let conversational = matches!(
            intent.kind,
            IntentKind::Information | IntentKind::Conversation
        );

        if conversational && let Some(ai) = self.ai.as_ref().filter(|ai| ai.is_available()) {
            debug!(kind = %intent.kind, "answering with conversational ai");
            let reply = ai.reply(text).await;
            let result = ExecutionResult::success(reply).with_data(DATA_AI_GENERATED, true);
            return AssistantReply {
                intent,
                result,
                speech: None,
            };
        }

        let result = self.engine.dispatcher().dispatch(&intent).await;
        let speech = (!conversational && result.success).then(|| result.message.clone());

        AssistantReply {
            intent,
            result,
            speech,
        }
    }
}
