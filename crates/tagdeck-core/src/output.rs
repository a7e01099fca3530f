//! Tag usage reports in table, JSON or JSON Lines form.

use serde::Serialize;
use std::io::{self, Write};

use crate::session::Session;
use crate::tagging::AssociationStore;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned two-column text
    Table,
    /// Single pretty-printed JSON object
    Json,
    /// One JSON object per tag (newline-delimited JSON)
    JsonLines,
}

/// One row of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

/// Tag usage over a set of associations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagReport {
    /// Image keys present in the associations
    pub images: usize,
    /// Images carrying at least one tag
    pub tagged_images: usize,
    pub tags: Vec<TagCount>,
}

impl TagReport {
    /// Report every tag found in `store`, in first-seen order.
    pub fn from_store(store: &AssociationStore) -> Self {
        let tags = store
            .distinct_tags()
            .into_iter()
            .map(|name| {
                let count = store.count_for(&name);
                TagCount { name, count }
            })
            .collect();
        Self::new(store, tags)
    }

    /// Report the registered tags of a session, in registry order.
    pub fn from_session(session: &Session) -> Self {
        let tags = session
            .tags()
            .iter()
            .map(|tag| TagCount {
                name: tag.name().to_string(),
                count: tag.count(),
            })
            .collect();
        Self::new(session.store(), tags)
    }

    fn new(store: &AssociationStore, tags: Vec<TagCount>) -> Self {
        Self {
            images: store.len(),
            tagged_images: store.iter().filter(|(_, tags)| !tags.is_empty()).count(),
            tags,
        }
    }

    /// Write the report to `writer` in `format`.
    pub fn write_to<W: Write>(&self, mut writer: W, format: OutputFormat) -> io::Result<()> {
        match format {
            OutputFormat::Table => {
                let width = self
                    .tags
                    .iter()
                    .map(|t| t.name.chars().count())
                    .max()
                    .unwrap_or(0)
                    .max("Tag".len());
                writeln!(writer, "{:<width$}  Count", "Tag")?;
                for tag in &self.tags {
                    writeln!(writer, "{:<width$}  {}", tag.name, tag.count)?;
                }
                writeln!(
                    writer,
                    "\n{} of {} image(s) tagged",
                    self.tagged_images, self.images
                )?;
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, self).map_err(io::Error::other)?;
                writeln!(writer)?;
            }
            OutputFormat::JsonLines => {
                for tag in &self.tags {
                    serde_json::to_writer(&mut writer, tag).map_err(io::Error::other)?;
                    writeln!(writer)?;
                }
            }
        }
        writer.flush()
    }
}
