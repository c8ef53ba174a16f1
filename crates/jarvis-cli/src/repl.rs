//! Subcommand: `jarvis repl` -- interactive command loop.

use std::io::Write as _;

use anyhow::{Context, Result};
use jarvis_agent::{Assistant, AssistantReply};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// Run the interactive loop until `quit`, `exit`, EOF or Ctrl+C.
pub async fn run(assistant: &Assistant) -> Result<()> {
    println!();
    println!("  Jarvis v{}", env!("CARGO_PKG_VERSION"));
    println!("  Type a command, or 'quit' to exit.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush().context("failed to flush stdout")?;

        let line = tokio::select! {
            line = lines.next_line() => line.context("failed to read input")?,
            _ = tokio::signal::ctrl_c() => {
                println!();
                info!("interrupted");
                break;
            }
        };

        let Some(line) = line else {
            println!();
            break;
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            info!("user requested exit");
            break;
        }

        let reply = assistant.respond(trimmed).await;
        print_reply(&reply);
    }

    println!("  Goodbye.");
    Ok(())
}

fn print_reply(reply: &AssistantReply) {
    debug!(
        kind = %reply.intent.kind,
        confidence = reply.intent.confidence,
        entities = ?reply.intent.entities,
        "intent"
    );

    let marker = if reply.result.success { "ok" } else { "!!" };
    println!("  [{marker}] {}", reply.result.message);

    if let Some(speech) = &reply.speech {
        println!("  [speech] {speech}");
    }
}
