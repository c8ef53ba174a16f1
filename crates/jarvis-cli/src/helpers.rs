//! Shared helper functions used across CLI subcommands.

use std::sync::Arc;

use anyhow::{Context, Result};
use jarvis_adapters::Platform;
use jarvis_agent::{Assistant, GeminiClient};
use jarvis_dispatch::{Collaborators, CommandEngine, Dispatcher};
use jarvis_intent::IntentClassifier;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

/// Initialize the tracing subscriber with the given default log level.
///
/// `RUST_LOG` overrides `default_level` when set.  Logs go to stderr so
/// JSON printed on stdout stays machine-readable.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

/// Build the command engine over the real system collaborators.
pub fn build_engine(config: &AppConfig, platform: Platform) -> Result<CommandEngine> {
    let classifier =
        Arc::new(IntentClassifier::new().context("failed to build intent classifier")?);

    let collaborators = Collaborators::system(
        platform,
        config.dispatch.process_timeout_secs,
        config.dispatch.enable_screenshots,
    );
    let dispatcher = Dispatcher::new(platform, collaborators)
        .with_screenshot_dir(config.dispatch.screenshot_dir.clone());

    info!(
        %platform,
        screen_capture = dispatcher.can_capture_screen(),
        "command engine ready"
    );

    Ok(CommandEngine::new(classifier, dispatcher))
}

/// Build the assistant, attaching the Gemini client unless disabled or
/// unconfigured.
pub fn build_assistant(config: &AppConfig, no_ai: bool) -> Result<Assistant> {
    let platform = Platform::detect();
    let assistant = Assistant::new(build_engine(config, platform)?);

    if no_ai {
        info!("conversational ai disabled by flag");
        return Ok(assistant);
    }

    let Some(gemini) = config.ai.gemini() else {
        warn!("GEMINI_API_KEY not set; questions get offline replies");
        return Ok(assistant);
    };

    match GeminiClient::new(gemini) {
        Ok(client) => Ok(assistant.with_ai(Arc::new(client))),
        Err(e) => {
            warn!(error = %e, "gemini client unavailable");
            Ok(assistant)
        }
    }
}

/// Join positional words back into one utterance.
pub fn join_words(words: &[String]) -> String {
    words.join(" ")
}
