//! The `tagdeck encode` command: one-hot encode a CSV dataset.

use clap::Args;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tagdeck_core::config::{expand_path, EncoderConfig};
use tagdeck_core::{Config, OneHotEncoder};

/// Arguments for the `encode` command.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// CSV dataset with a multi-label column
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Name of the space-separated label column (defaults to config, "Tags")
    #[arg(long)]
    pub tags_column: Option<String>,

    /// Write 0/1 membership instead of per-row label counts
    #[arg(long)]
    pub binary: bool,
}

impl EncodeArgs {
    /// Merge CLI flags over the `[encoder]` config section.
    fn encoder_config(&self, config: &Config) -> EncoderConfig {
        EncoderConfig {
            tags_column: self
                .tags_column
                .clone()
                .unwrap_or_else(|| config.encoder.tags_column.clone()),
            binary: self.binary || config.encoder.binary,
        }
    }
}

/// Execute the encode command.
pub fn execute(args: EncodeArgs, config: &Config) -> anyhow::Result<()> {
    let encoder = OneHotEncoder::from_config(&args.encoder_config(config));
    let input = expand_path(&args.input.to_string_lossy());

    let summary = match &args.output {
        Some(output) => {
            let output = expand_path(&output.to_string_lossy());
            let summary = encoder.encode_file(&input, &output)?;
            eprintln!(
                "Encoded {} row(s) into {} label column(s): {}",
                summary.rows,
                summary.labels.len(),
                output.display()
            );
            summary
        }
        None => {
            let reader = BufReader::new(File::open(&input)?);
            encoder.encode_csv(reader, std::io::stdout().lock())?
        }
    };

    tracing::debug!("Labels: {:?}", summary.labels);
    Ok(())
}
