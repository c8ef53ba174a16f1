//! Offline replies used when the model cannot be reached.

/// Keyword -> reply, probed in order against the lowercased message.
const KEYWORD_REPLIES: &[(&str, &str)] = &[
    ("hello", "Hello! I'm JARVIS, your personal assistant. What can I do for you today?"),
    ("hi", "Hi! I'm here to help. What would you like to do?"),
    ("how are you", "I'm running smoothly and ready to help. What can I do for you?"),
    (
        "who are you",
        "I'm JARVIS, a personal assistant that can open apps, search the web and answer \
         questions.",
    ),
    ("what's your name", "I'm JARVIS, your personal assistant."),
    ("thank", "You're welcome! Just ask whenever you need something."),
    ("bye", "Goodbye! I'll be here when you need me."),
    (
        "help",
        "I can open apps and websites, search the web, tell you the time and answer questions. \
         What would you like to try?",
    ),
    (
        "what can you do",
        "I can open applications, browse websites, run web searches, manage files, take \
         screenshots and chat with you.",
    ),
];

const QUESTION_REPLY: &str =
    "That's a good question. I can't reach my knowledge service right now, but I can search \
     the web for you if you'd like.";

const DEFAULT_REPLY: &str = "I'm here to help. What would you like me to do?";

/// Canned replies keyed on simple substring matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackResponder;

impl FallbackResponder {
    /// Pick a reply for `message`.
    pub fn respond(&self, message: &str) -> &'static str {
        let lowered = message.to_lowercase();

        if let Some((_, reply)) = KEYWORD_REPLIES
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
        {
            return reply;
        }

        if message.contains('?') {
            QUESTION_REPLY
        } else {
            DEFAULT_REPLY
        }
    }
}
