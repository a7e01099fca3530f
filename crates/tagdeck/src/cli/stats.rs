//! The `tagdeck stats` command: tag counts of an association file.

use clap::{Args, ValueEnum};
use std::path::PathBuf;
use tagdeck_core::config::expand_path;
use tagdeck_core::{AssociationCodec, Config, OutputFormat, TagReport};

/// Report formats.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum StatsFormat {
    /// Aligned text table
    #[default]
    Table,
    /// Single JSON object
    Json,
    /// One JSON object per tag
    Jsonl,
}

impl From<StatsFormat> for OutputFormat {
    fn from(format: StatsFormat) -> Self {
        match format {
            StatsFormat::Table => OutputFormat::Table,
            StatsFormat::Json => OutputFormat::Json,
            StatsFormat::Jsonl => OutputFormat::JsonLines,
        }
    }
}

/// Arguments for the `stats` command.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Association file (`Image Path,Tags` CSV)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Report format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: StatsFormat,
}

/// Execute the stats command.
pub fn execute(args: StatsArgs, config: &Config) -> anyhow::Result<()> {
    let codec = AssociationCodec::from_config(&config.codec);
    let store = codec.import_from_path(&expand_path(&args.input.to_string_lossy()))?;

    TagReport::from_store(&store).write_to(std::io::stdout().lock(), args.format.into())?;
    Ok(())
}
