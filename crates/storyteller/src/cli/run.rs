//! Command handlers.

use super::Commands;
use storyteller::{StorytellerConfig, StorytellerResult, stages};
use tracing::info;

/// Execute one command against a loaded configuration.
pub async fn run_command(command: Commands, mut config: StorytellerConfig) -> StorytellerResult<()> {
    let report = match command {
        Commands::Segment => {
            let collection = stages::segment(&config).await?;
            info!(stories = collection.len(), "Segmentation complete");
            return Ok(());
        }
        Commands::Enrich => stages::enrich(&config).await?,
        Commands::Narrate { limit, all } => {
            if all {
                config.narrator.story_limit = 0;
            } else if let Some(limit) = limit {
                config.narrator.story_limit = limit;
            }
            stages::narrate(&config).await?
        }
        Commands::RunAll => stages::run_all(&config).await?,
    };

    info!(
        succeeded = report.succeeded_count(),
        skipped = report.skipped_count(),
        failed = report.failed_count(),
        "Run complete"
    );
    Ok(())
}
