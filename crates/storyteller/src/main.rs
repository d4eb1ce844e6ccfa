//! Storyteller CLI binary.
//!
//! - `segment` parses the anthology into the story document
//! - `enrich` fills in summaries, morals and guided questions
//! - `narrate` synthesizes audio with word timings
//! - `run-all` does all three

use clap::Parser;
use storyteller::{StorytellerConfig, init_logging};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, run_command};

    // Credentials and overrides may live in .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.log_format, cli.verbose)?;

    let config = StorytellerConfig::load(cli.config.as_deref()).inspect_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
    })?;

    run_command(cli.command, config).await.inspect_err(|e| {
        tracing::error!(error = %e, "Run aborted");
    })?;

    Ok(())
}
