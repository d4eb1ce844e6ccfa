//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use storyteller::LogFormat;

/// Storyteller - prepare stories, questions and narration for the story app
#[derive(Parser, Debug)]
#[command(name = "storyteller")]
#[command(about = "Segment, enrich and narrate a children's story anthology", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file layered over the defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse the anthology into a fresh story document
    Segment,

    /// Generate summaries, morals, pause points and guided questions
    Enrich,

    /// Synthesize narration audio and word timings
    Narrate {
        /// Narrate only the first N stories
        #[arg(long, conflicts_with = "all")]
        limit: Option<usize>,

        /// Narrate every story
        #[arg(long)]
        all: bool,
    },

    /// Segment, enrich and narrate in order
    RunAll,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrate_limit() {
        let cli = Cli::try_parse_from(["storyteller", "narrate", "--limit", "2"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Narrate {
                limit: Some(2),
                all: false
            }
        ));
    }

    #[test]
    fn test_limit_conflicts_with_all() {
        assert!(Cli::try_parse_from(["storyteller", "narrate", "--limit", "2", "--all"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "storyteller",
            "enrich",
            "-v",
            "--log-format",
            "json",
            "--config",
            "custom.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Commands::Enrich));
    }

    #[test]
    fn test_run_all_name() {
        let cli = Cli::try_parse_from(["storyteller", "run-all"]).unwrap();
        assert!(matches!(cli.command, Commands::RunAll));
    }
}
