//! CLI entry point for Jarvis.
//!
//! This binary provides the `jarvis` command with subcommands for the
//! interactive loop, one-shot execution, classification and status.

mod cli;
mod config;
mod helpers;
mod repl;

use anyhow::{Context, Result};
use clap::Parser;
use jarvis_adapters::{CommandScreenCapture, Platform};
use jarvis_intent::IntentClassifier;
use serde_json::json;

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::helpers::{build_assistant, init_tracing, join_words};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, source) = AppConfig::load(cli.config.as_deref())?;
    init_tracing(&config.logging.level);

    match cli.command {
        Commands::Repl => {
            let assistant = build_assistant(&config, cli.no_ai)?;
            repl::run(&assistant).await
        }
        Commands::Run { text } => {
            let assistant = build_assistant(&config, cli.no_ai)?;
            let reply = assistant.respond(&join_words(&text)).await;
            let body = json!({ "intent": reply.intent, "result": reply.result });
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        Commands::Classify { text } => {
            let classifier = IntentClassifier::new().context("failed to build intent classifier")?;
            let intent = classifier.classify(&join_words(&text));
            println!("{}", serde_json::to_string_pretty(&intent)?);
            Ok(())
        }
        Commands::Status => cmd_status(&config, source.as_deref(), cli.no_ai),
    }
}

// ---------------------------------------------------------------------------
// Subcommand: status
// ---------------------------------------------------------------------------

fn cmd_status(config: &AppConfig, source: Option<&std::path::Path>, no_ai: bool) -> Result<()> {
    let classifier_ready = IntentClassifier::new().is_ok();
    let platform = Platform::detect();
    let capture = config
        .dispatch
        .enable_screenshots
        .then(|| CommandScreenCapture::detect(platform))
        .flatten();
    let ai = if no_ai {
        "disabled (--no-ai)".to_owned()
    } else if config.ai.gemini().is_some() {
        format!("gemini ({})", config.ai.model)
    } else {
        "offline replies (no GEMINI_API_KEY)".to_owned()
    };

    println!();
    println!("  Jarvis v{}", env!("CARGO_PKG_VERSION"));
    println!("    Classifier:     {}", if classifier_ready { "ready" } else { "failed" });
    println!("    Platform:       {platform}");
    println!("    AI:             {ai}");
    match &capture {
        Some(tool) => println!("    Screen capture: {}", tool.program().display()),
        None => println!("    Screen capture: unavailable"),
    }
    match source {
        Some(path) => println!("    Config:         {}", path.display()),
        None => println!("    Config:         built-in defaults"),
    }
    println!();

    Ok(())
}
