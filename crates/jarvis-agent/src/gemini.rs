//! Gemini client.
//!
//! Talks to the non-streaming `generateContent` endpoint of the Gemini API.
//! Each call sends one prompt made of the system instruction, the last few
//! exchanges and the new message.  Successful replies are appended to a
//! bounded rolling history.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, error, info, warn};

use crate::ai::ConversationalAi;
use crate::error::{AgentError, Result};
use crate::fallback::FallbackResponder;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default Gemini API base URL.
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default number of exchanges kept in history.
pub const DEFAULT_HISTORY_LEN: usize = 10;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Exchanges from history included in each prompt.
const PROMPT_HISTORY: usize = 3;

/// Speaker tag the model sometimes echoes at the start of a reply.
const SPEAKER_TAG: &str = "JARVIS:";

/// Reply used when the request times out.
const TIMEOUT_REPLY: &str = "I'm having trouble connecting right now. Please try again.";

const SYSTEM_INSTRUCTION: &str = "You are JARVIS, a helpful personal desktop assistant.

You help the user with everyday questions, explanations and small talk.  Separate \
tooling already handles opening applications and websites, web searches, files and the \
time, so focus on answering in words.

Communication style:
- Friendly, direct and concise (one to three sentences for speech)
- Plain language without markdown, since replies may be read aloud
- Say so honestly when you are unsure";

const GROUNDING_NOTE: &str = "\n\nYou have access to Google Search. Use it for current \
events and facts that may have changed recently.";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for a [`GeminiClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key sent as the `key` query parameter.
    pub api_key: String,
    /// Model identifier, e.g. `gemini-2.5-flash`.
    pub model: String,
    /// Attach the Google Search grounding tool to every request.
    pub use_search_grounding: bool,
    /// Maximum exchanges kept in the rolling history.
    pub history_len: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// API base URL.
    pub base_url: String,
}

impl GeminiConfig {
    /// A configuration with default settings for `api_key`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
            use_search_grounding: true,
            history_len: DEFAULT_HISTORY_LEN,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: GEMINI_BASE_URL.to_owned(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// One user message and the model's reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub user: String,
    pub assistant: String,
    /// Whether the reply carried search grounding metadata.
    pub grounded: bool,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Conversational AI backed by Google Gemini.
#[derive(Debug)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
    history: Mutex<VecDeque<Exchange>>,
    fallback: FallbackResponder,
}

impl GeminiClient {
    /// Create a client.  Fails when the API key is empty.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AgentError::MissingApiKey {
                provider: "gemini".into(),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::RequestFailed {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        info!(
            model = %config.model,
            search_grounding = config.use_search_grounding,
            "gemini client ready"
        );

        Ok(Self {
            config,
            http,
            history: Mutex::new(VecDeque::new()),
            fallback: FallbackResponder,
        })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Snapshot of the rolling history, oldest first.
    pub fn history(&self) -> Vec<Exchange> {
        self.history
            .lock()
            .map(|h| h.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn clear_history(&self) {
        if let Ok(mut h) = self.history.lock() {
            h.clear();
        }
    }

    /// Send `message` to the model and return the cleaned reply.
    pub async fn generate(&self, message: &str) -> Result<String> {
        let recent = {
            let history = self.history();
            let skip = history.len().saturating_sub(PROMPT_HISTORY);
            history.into_iter().skip(skip).collect::<Vec<_>>()
        };
        let prompt = build_prompt(&self.system_instruction(), &recent, message);
        let body = build_request_body(&prompt, self.config.use_search_grounding);

        debug!(model = %self.config.model, history = recent.len(), "sending gemini request");

        let resp = self
            .http
            .post(self.config.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| self.request_error(e))?;

        if !status.is_success() {
            return Err(AgentError::RequestFailed {
                reason: format!("API returned {status}: {text}"),
            });
        }

        let v: Value = serde_json::from_str(&text)?;
        let (reply, grounded) = parse_reply(&v)?;
        if grounded {
            debug!("reply grounded with search results");
        }

        self.remember(Exchange {
            user: message.to_owned(),
            assistant: reply.clone(),
            grounded,
        });

        Ok(reply)
    }

    fn system_instruction(&self) -> String {
        if self.config.use_search_grounding {
            format!("{SYSTEM_INSTRUCTION}{GROUNDING_NOTE}")
        } else {
            SYSTEM_INSTRUCTION.to_owned()
        }
    }

    fn request_error(&self, e: reqwest::Error) -> AgentError {
        if e.is_timeout() {
            AgentError::Timeout {
                seconds: self.config.timeout_secs,
            }
        } else {
            AgentError::RequestFailed {
                reason: e.to_string(),
            }
        }
    }

    fn remember(&self, exchange: Exchange) {
        if let Ok(mut h) = self.history.lock() {
            h.push_back(exchange);
            while h.len() > self.config.history_len {
                h.pop_front();
            }
        }
    }
}

#[async_trait]
impl ConversationalAi for GeminiClient {
    fn is_available(&self) -> bool {
        true
    }

    async fn reply(&self, text: &str) -> String {
        match self.generate(text).await {
            Ok(reply) => reply,
            Err(AgentError::Timeout { seconds }) => {
                warn!(seconds, "gemini request timed out");
                TIMEOUT_REPLY.to_owned()
            }
            Err(e) => {
                error!(error = %e, "gemini request failed; using fallback reply");
                self.fallback.respond(text).to_owned()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Request / response helpers
// ---------------------------------------------------------------------------

/// Assemble the single text prompt sent to the model.
fn build_prompt(system: &str, recent: &[Exchange], message: &str) -> String {
    if recent.is_empty() {
        return format!("{system}\n\nUser: {message}\n{SPEAKER_TAG}");
    }

    let history = recent
        .iter()
        .map(|h| format!("User: {}\n{SPEAKER_TAG} {}", h.user, h.assistant))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{system}\n\nRecent conversation:\n{history}\n\nUser: {message}\n{SPEAKER_TAG}")
}

fn build_request_body(prompt: &str, search_grounding: bool) -> Value {
    let mut body = json!({
        "contents": [{
            "parts": [{ "text": prompt }]
        }],
        "generationConfig": {
            "temperature": 0.7,
            "maxOutputTokens": 500,
            "topP": 0.95,
            "topK": 40
        }
    });

    if search_grounding {
        body["tools"] = json!([{ "googleSearch": {} }]);
    }

    body
}

/// Extract the reply text and grounding flag from a `generateContent`
/// response.
fn parse_reply(v: &Value) -> Result<(String, bool)> {
    let candidate = v
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|c| c.first())
        .ok_or_else(|| AgentError::ParseFailed {
            reason: "response has no candidates".into(),
        })?;

    let text: String = candidate
        .pointer("/content/parts")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    let mut reply = text.trim();
    if let Some(rest) = reply.strip_prefix(SPEAKER_TAG) {
        reply = rest.trim();
    }

    let grounded = candidate.get("groundingMetadata").is_some();
    Ok((reply.to_owned(), grounded))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_rejected() {
        let err = GeminiClient::new(GeminiConfig::new("  ")).unwrap_err();
        assert!(matches!(err, AgentError::MissingApiKey { .. }));
    }

    #[test]
    fn endpoint_includes_model() {
        let mut config = GeminiConfig::new("k");
        config.base_url = "http://localhost:1234/v1beta/".into();
        assert_eq!(
            config.endpoint(),
            "http://localhost:1234/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn prompt_without_history() {
        let prompt = build_prompt("SYS", &[], "hello");
        assert_eq!(prompt, "SYS\n\nUser: hello\nJARVIS:");
    }

    #[test]
    fn prompt_with_history() {
        let recent = vec![Exchange {
            user: "hi".into(),
            assistant: "Hello!".into(),
            grounded: false,
        }];
        let prompt = build_prompt("SYS", &recent, "how are you");
        assert!(prompt.contains("Recent conversation:\nUser: hi\nJARVIS: Hello!"));
        assert!(prompt.ends_with("User: how are you\nJARVIS:"));
    }

    #[test]
    fn request_body_shape() {
        let body = build_request_body("p", true);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "p");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 500);
        assert_eq!(body["generationConfig"]["topK"], 40);
        assert!(body["tools"][0].get("googleSearch").is_some());

        let plain = build_request_body("p", false);
        assert!(plain.get("tools").is_none());
    }

    #[test]
    fn parse_reply_joins_parts_and_strips_tag() {
        let v = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "JARVIS: Rust is " }, { "text": "a language. " }] },
                "groundingMetadata": {}
            }]
        });
        let (reply, grounded) = parse_reply(&v).unwrap();
        assert_eq!(reply, "Rust is a language.");
        assert!(grounded);
    }

    #[test]
    fn parse_reply_without_candidates() {
        let err = parse_reply(&json!({ "candidates": [] })).unwrap_err();
        assert!(matches!(err, AgentError::ParseFailed { .. }));
    }

    #[test]
    fn history_is_bounded() {
        let mut config = GeminiConfig::new("k");
        config.history_len = 2;
        let client = GeminiClient::new(config).unwrap();

        for i in 0..5 {
            client.remember(Exchange {
                user: format!("q{i}"),
                assistant: format!("a{i}"),
                grounded: false,
            });
        }

        let history = client.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].user, "q3");
        assert_eq!(history[1].user, "q4");

        client.clear_history();
        assert!(client.history().is_empty());
    }

    #[tokio::test]
    async fn unreachable_api_degrades_to_fallback() {
        let mut config = GeminiConfig::new("k");
        config.base_url = "http://127.0.0.1:9/v1beta".into();
        config.timeout_secs = 2;
        let client = GeminiClient::new(config).unwrap();

        let reply = client.reply("hello").await;
        assert!(!reply.is_empty());
        assert!(client.history().is_empty());
    }
}
