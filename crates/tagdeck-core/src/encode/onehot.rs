//! Multi-label one-hot encoding.
//!
//! A single text column holding space-separated labels is replaced by one
//! numeric column per distinct label. Two passes: the first builds the label
//! vocabulary and per-row token counts, the second lays out the output rows.

use std::io::{Read, Write};
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::EncoderConfig;
use crate::error::EncodeError;

use super::dataset::Dataset;

/// How a row's label occurrences become a cell value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueMode {
    /// Number of times the label appears in the row (`cat cat` gives 2)
    #[default]
    Count,
    /// 1 if the label appears at all, otherwise 0
    Binary,
}

/// Result counters from an encode run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodeSummary {
    /// Rows in the output (same as input)
    pub rows: usize,
    /// New label columns, in first-seen order
    pub labels: Vec<String>,
}

/// Replaces a multi-label column with one column per label.
#[derive(Debug, Clone)]
pub struct OneHotEncoder {
    tags_column: String,
    mode: ValueMode,
}

impl Default for OneHotEncoder {
    fn default() -> Self {
        Self::from_config(&EncoderConfig::default())
    }
}

impl OneHotEncoder {
    pub fn new(tags_column: impl Into<String>, mode: ValueMode) -> Self {
        Self {
            tags_column: tags_column.into(),
            mode,
        }
    }

    pub fn from_config(config: &EncoderConfig) -> Self {
        let mode = if config.binary {
            ValueMode::Binary
        } else {
            ValueMode::Count
        };
        Self::new(config.tags_column.clone(), mode)
    }

    pub fn tags_column(&self) -> &str {
        &self.tags_column
    }

    /// Encode `dataset`, returning a new dataset.
    ///
    /// Output columns are the input columns minus the tag column, followed by
    /// one column per distinct label in the order labels were first seen.
    /// Empty tokens (empty cells, doubled or edge spaces) are ignored.
    pub fn encode(&self, dataset: &Dataset) -> Result<Dataset, EncodeError> {
        let tags_idx =
            dataset
                .column_index(&self.tags_column)
                .ok_or_else(|| EncodeError::MissingColumn {
                    column: self.tags_column.clone(),
                })?;

        // Pass 1: vocabulary (label -> output offset) and per-row counts
        let mut vocabulary: IndexMap<&str, usize> = IndexMap::new();
        let mut row_counts: Vec<IndexMap<usize, u32>> = Vec::with_capacity(dataset.len());
        for row in dataset.rows() {
            let mut counts = IndexMap::new();
            for token in row[tags_idx].split(' ') {
                if token.is_empty() {
                    continue;
                }
                let next = vocabulary.len();
                let offset = *vocabulary.entry(token).or_insert(next);
                *counts.entry(offset).or_insert(0) += 1;
            }
            row_counts.push(counts);
        }

        let kept: Vec<usize> = (0..dataset.headers().len())
            .filter(|&i| i != tags_idx)
            .collect();
        for label in vocabulary.keys() {
            if kept.iter().any(|&i| dataset.headers()[i] == *label) {
                return Err(EncodeError::ColumnConflict {
                    label: label.to_string(),
                });
            }
        }

        // Pass 2: lay out output rows
        let mut headers: Vec<String> = kept.iter().map(|&i| dataset.headers()[i].clone()).collect();
        headers.extend(vocabulary.keys().map(|label| label.to_string()));

        let rows = dataset
            .rows()
            .iter()
            .zip(&row_counts)
            .map(|(row, counts)| {
                let mut out: Vec<String> = kept.iter().map(|&i| row[i].clone()).collect();
                out.extend((0..vocabulary.len()).map(|offset| {
                    let count = counts.get(&offset).copied().unwrap_or(0);
                    self.cell(count)
                }));
                out
            })
            .collect();

        tracing::debug!(
            "Encoded {} row(s) into {} label column(s)",
            dataset.len(),
            vocabulary.len()
        );
        Ok(Dataset::new(headers, rows))
    }

    /// Read CSV from `reader`, encode, and write CSV to `writer`.
    ///
    /// Nothing is written unless encoding succeeds.
    pub fn encode_csv<R: Read, W: Write>(
        &self,
        reader: R,
        writer: W,
    ) -> Result<EncodeSummary, EncodeError> {
        let input = Dataset::read(reader)?;
        let output = self.encode(&input)?;
        output.write(writer)?;
        Ok(self.summarize(&input, &output))
    }

    /// File-to-file variant of [`encode_csv`](Self::encode_csv).
    pub fn encode_file(&self, input: &Path, output: &Path) -> Result<EncodeSummary, EncodeError> {
        let dataset = Dataset::from_path(input)?;
        let encoded = self.encode(&dataset)?;
        encoded.to_path(output)?;

        let summary = self.summarize(&dataset, &encoded);
        tracing::info!(
            "Encoded {} row(s) with {} label(s): {} -> {}",
            summary.rows,
            summary.labels.len(),
            input.display(),
            output.display()
        );
        Ok(summary)
    }

    fn cell(&self, count: u32) -> String {
        match self.mode {
            ValueMode::Count => count.to_string(),
            ValueMode::Binary => u32::from(count > 0).to_string(),
        }
    }

    fn summarize(&self, input: &Dataset, output: &Dataset) -> EncodeSummary {
        // Label columns are everything after the retained input columns
        let retained = input.headers().len() - 1;
        EncodeSummary {
            rows: output.len(),
            labels: output.headers()[retained..].to_vec(),
        }
    }
}
