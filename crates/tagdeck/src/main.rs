//! tagdeck CLI - multi-label image tagging and one-hot dataset encoding.
//!
//! Browse a folder of images in the terminal, apply tags, and export the
//! associations as `Image Path,Tags` CSV. Encode any CSV with a
//! space-separated `Tags` column into one binary column per label.
//!
//! # Usage
//!
//! ```bash
//! # Tag a folder, resuming from an earlier export
//! tagdeck tag ./photos --import tags.csv --export tags.csv
//!
//! # One-hot encode a dataset
//! tagdeck encode tags.csv --output encoded.csv
//!
//! # Tag counts of an association file
//! tagdeck stats tags.csv --format json
//!
//! # View configuration
//! tagdeck config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// tagdeck - multi-label image tagging and one-hot dataset encoding.
#[derive(Parser, Debug)]
#[command(name = "tagdeck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Tag the images of a folder interactively
    Tag(cli::tag::TagArgs),

    /// One-hot encode the Tags column of a CSV dataset
    Encode(cli::encode::EncodeArgs),

    /// Show tag counts of an association file
    Stats(cli::stats::StatsArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match tagdeck_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `tagdeck config path`."
            );
            tagdeck_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("tagdeck v{}", tagdeck_core::VERSION);

    match cli.command {
        Commands::Tag(args) => cli::tag::execute(args, &config),
        Commands::Encode(args) => cli::encode::execute(args, &config),
        Commands::Stats(args) => cli::stats::execute(args, &config),
        Commands::Config(args) => cli::config::execute(args),
    }
}
