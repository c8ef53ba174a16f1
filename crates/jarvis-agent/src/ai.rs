//! The conversational AI collaborator.

use async_trait::async_trait;

/// Answers free-form questions and small talk.
#[async_trait]
pub trait ConversationalAi: Send + Sync {
    /// Whether the backing model is configured and worth asking.
    fn is_available(&self) -> bool;

    /// Reply to `text`.  Never fails; implementations degrade to canned
    /// replies.
    async fn reply(&self, text: &str) -> String;
}
