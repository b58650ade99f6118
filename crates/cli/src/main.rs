//! EEG Focus - Main Entry Point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::commands::{artifacts, audio, dataset, live, models, segment, survey, windows};
use cli::{emit, init_logging, AppContext, Settings};
use tracing::info;

#[derive(Parser)]
#[command(name = "eeg-focus")]
#[command(version)]
#[command(about = "Windowed band-power analysis of focused vs distracted EEG", long_about = None)]
struct Cli {
    /// Settings file (defaults to ./eeg-focus.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare one synthetic window of focused and distracted alpha waves
    Segment,

    /// Track variance and band power across consecutive windows
    Windows {
        /// Number of windows (defaults to analysis.windows)
        #[arg(long)]
        count: Option<usize>,
    },

    /// Truncate a WAV file to a preview length
    Truncate {
        input: PathBuf,
        output: PathBuf,

        /// Maximum length in seconds (defaults to audio.preview_seconds)
        #[arg(long)]
        seconds: Option<f64>,
    },

    /// Cut the study and phone songs down to previews
    Previews,

    /// Dataset statistics
    Dataset {
        #[command(subcommand)]
        command: DatasetCommands,
    },

    /// Seed live waves from the dataset and advance them
    Live {
        /// Animation frames to advance
        #[arg(long, default_value = "10")]
        steps: usize,

        /// Samples to print from the newest end
        #[arg(long, default_value = "8")]
        tail: usize,
    },

    /// Behavioural survey: group focus and habit correlations
    Survey,

    /// Trained model metrics
    Models {
        #[command(subcommand)]
        command: ModelsCommands,
    },

    /// List expected charts and audio files
    Artifacts,
}

#[derive(Subcommand)]
enum ModelsCommands {
    /// Accuracy, precision, recall, F1 and ROC-AUC per model
    Compare,
}

#[derive(Subcommand)]
enum DatasetCommands {
    /// Class balance, band means and column statistics
    Summary,

    /// Show a single row
    Row { index: usize },

    /// Pearson correlation of two feature columns
    Corr { a: String, b: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    info!("=== EEG Focus v{} ===", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load(cli.config.as_deref())?;
    let mut ctx = AppContext::new(settings);
    let json = cli.json;

    match cli.command {
        Commands::Segment => emit(&segment::run(&mut ctx)?, json),
        Commands::Windows { count } => emit(&windows::run(&mut ctx, count)?, json),
        Commands::Truncate {
            input,
            output,
            seconds,
        } => {
            let seconds = seconds.unwrap_or(ctx.settings.audio.preview_seconds);
            emit(&audio::truncate(&input, &output, seconds)?, json)
        }
        Commands::Previews => emit(&audio::previews(&ctx)?, json),
        Commands::Dataset { command } => match command {
            DatasetCommands::Summary => emit(&dataset::summary(&ctx)?, json),
            DatasetCommands::Row { index } => emit(&dataset::row(&ctx, index)?, json),
            DatasetCommands::Corr { a, b } => emit(&dataset::correlation(&ctx, &a, &b)?, json),
        },
        Commands::Live { steps, tail } => emit(&live::run(&mut ctx, steps, tail)?, json),
        Commands::Survey => emit(&survey::run(&ctx)?, json),
        Commands::Models { command } => match command {
            ModelsCommands::Compare => emit(&models::compare(&ctx)?, json),
        },
        Commands::Artifacts => emit(&artifacts::run(&ctx)?, json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["eeg-focus", "windows", "--count", "3", "--json"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Windows { count: Some(3) }));
    }

    #[test]
    fn test_parse_dataset_row() {
        let cli = Cli::parse_from(["eeg-focus", "-v", "dataset", "row", "5"]);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Dataset {
                command: DatasetCommands::Row { index: 5 }
            }
        ));
    }

    #[test]
    fn test_parse_models_compare() {
        let cli = Cli::parse_from(["eeg-focus", "models", "compare", "--json"]);
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Commands::Models {
                command: ModelsCommands::Compare
            }
        ));
        assert!(matches!(
            Cli::parse_from(["eeg-focus", "survey"]).command,
            Commands::Survey
        ));
    }
}
