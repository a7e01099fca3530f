//! Association file import and export.
//!
//! The file is CSV with the header `Image Path,Tags`. Each row holds one image
//! identifier and its tags joined by the configured [`TagDelimiter`]. The same
//! delimiter is used in both directions, so an exported store re-imports to an
//! equal store as long as no tag name contains the delimiter.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use crate::config::{CodecConfig, TagDelimiter};
use crate::error::CodecError;
use crate::tagging::{AssociationStore, TagSet};

/// Header row written on export and skipped on import.
pub const HEADER: [&str; 2] = ["Image Path", "Tags"];

/// Reads and writes [`AssociationStore`]s as `Image Path,Tags` CSV.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssociationCodec {
    delimiter: TagDelimiter,
}

impl AssociationCodec {
    pub fn new(delimiter: TagDelimiter) -> Self {
        Self { delimiter }
    }

    pub fn from_config(config: &CodecConfig) -> Self {
        Self::new(config.delimiter)
    }

    pub fn delimiter(&self) -> TagDelimiter {
        self.delimiter
    }

    /// Write the header and one row per image key, in store order.
    ///
    /// Images with no tags still get a row with an empty `Tags` field.
    /// Returns the number of rows written (excluding the header).
    pub fn export<W: Write>(&self, store: &AssociationStore, writer: W) -> Result<usize, CodecError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(HEADER)?;

        for (image, tags) in store.iter() {
            let field = self.join(image, tags);
            wtr.write_record([image, field.as_str()])?;
        }

        wtr.flush()?;
        Ok(store.len())
    }

    /// Parse a complete association file into a new store.
    ///
    /// The first row is treated as the header. Every row must have exactly two
    /// fields; the first offending row aborts the import and nothing is
    /// returned. Empty tokens are dropped, so an empty `Tags` field yields an
    /// empty set. If an image appears twice the later row wins.
    pub fn import<R: Read>(&self, reader: R) -> Result<AssociationStore, CodecError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?;
        if headers.iter().ne(HEADER) {
            tracing::warn!(
                "Unexpected association header {:?}, reading anyway",
                headers.iter().collect::<Vec<_>>()
            );
        }

        let mut store = AssociationStore::new();
        for result in rdr.records() {
            let record = result?;
            if record.len() != HEADER.len() {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                return Err(CodecError::MalformedRow {
                    line,
                    found: record.len(),
                });
            }
            store.set_all(&record[0], self.split(&record[1]));
        }

        tracing::debug!("Parsed {} association row(s)", store.len());
        Ok(store)
    }

    /// Export to a file. The file is only created once the whole output has
    /// been rendered.
    pub fn export_to_path(&self, store: &AssociationStore, path: &Path) -> Result<usize, CodecError> {
        let mut buffer = Vec::new();
        let rows = self.export(store, &mut buffer)?;
        std::fs::write(path, buffer)?;
        tracing::info!("Exported {} image(s) to {}", rows, path.display());
        Ok(rows)
    }

    /// Import from a file.
    pub fn import_from_path(&self, path: &Path) -> Result<AssociationStore, CodecError> {
        let file = File::open(path)?;
        let store = self.import(BufReader::new(file))?;
        tracing::info!("Imported {} image(s) from {}", store.len(), path.display());
        Ok(store)
    }

    /// Split a `Tags` field into trimmed, non-empty tokens.
    pub fn split(&self, field: &str) -> TagSet {
        field
            .split(self.delimiter.as_char())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }

    fn join(&self, image: &str, tags: &TagSet) -> String {
        let delimiter = self.delimiter.as_char();
        if let Some(tag) = tags.iter().find(|t| t.contains(delimiter)) {
            tracing::warn!(
                "Tag '{}' on {} contains the {} delimiter and will not re-import as one tag",
                tag,
                image,
                self.delimiter
            );
        }
        tags.iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(&delimiter.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn export_string(codec: &AssociationCodec, store: &AssociationStore) -> String {
        let mut buffer = Vec::new();
        codec.export(store, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_export_format() {
        let store = AssociationStore::from_iter([
            ("img1.png", vec!["cat", "dog"]),
            ("img2.png", vec![]),
        ]);
        let output = export_string(&AssociationCodec::default(), &store);
        assert_eq!(output, "Image Path,Tags\nimg1.png,cat dog\nimg2.png,\n");
    }

    #[test]
    fn test_export_quotes_comma_delimited_tags() {
        let store = AssociationStore::from_iter([("img1.png", vec!["cat", "dog"])]);
        let output = export_string(&AssociationCodec::new(TagDelimiter::Comma), &store);
        assert_eq!(output, "Image Path,Tags\nimg1.png,\"cat,dog\"\n");
    }

    #[test]
    fn test_round_trip_space() {
        let codec = AssociationCodec::default();
        let store = AssociationStore::from_iter([
            ("img1.png", vec!["cat", "dog"]),
            ("dir, with comma/img2.jpg", vec!["bird"]),
            ("img3.jpeg", vec![]),
        ]);

        let output = export_string(&codec, &store);
        let imported = codec.import(output.as_bytes()).unwrap();

        assert_eq!(imported, store);
        let keys: Vec<&str> = imported.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["img1.png", "dir, with comma/img2.jpg", "img3.jpeg"]);
    }

    #[test]
    fn test_round_trip_comma() {
        let codec = AssociationCodec::new(TagDelimiter::Comma);
        let store = AssociationStore::from_iter([
            ("img1.png", vec!["black cat", "dog"]),
            ("img2.png", vec![]),
        ]);

        let output = export_string(&codec, &store);
        assert_eq!(codec.import(output.as_bytes()).unwrap(), store);
    }

    #[test]
    fn test_import_empty_tags_field_is_empty_set() {
        let codec = AssociationCodec::default();
        let store = codec.import("Image Path,Tags\na.png,\n".as_bytes()).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get("a.png").is_empty());
    }

    #[test]
    fn test_import_drops_empty_tokens() {
        let codec = AssociationCodec::default();
        let store = codec
            .import("Image Path,Tags\na.png, cat  dog \n".as_bytes())
            .unwrap();
        let tags: Vec<String> = store.get("a.png").into_iter().collect();
        assert_eq!(tags, vec!["cat", "dog"]);
    }

    #[test]
    fn test_import_rejects_malformed_row() {
        let codec = AssociationCodec::default();
        let input = "Image Path,Tags\na.png,cat\nb.png,dog,extra\nc.png,bird\n";
        let err = codec.import(input.as_bytes()).unwrap_err();
        match err {
            CodecError::MalformedRow { line, found } => {
                assert_eq!(line, 3);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_import_rejects_single_field_row() {
        let codec = AssociationCodec::default();
        let err = codec
            .import("Image Path,Tags\nlonely.png\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, CodecError::MalformedRow { found: 1, .. }));
    }

    #[test]
    fn test_import_duplicate_image_last_row_wins() {
        let codec = AssociationCodec::default();
        let input = "Image Path,Tags\na.png,cat\nb.png,dog\na.png,bird\n";
        let store = codec.import(input.as_bytes()).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.contains("a.png", "bird"));
        assert!(!store.contains("a.png", "cat"));
    }

    #[test]
    fn test_space_import_reads_comma_joined_field_as_one_token() {
        // A comma-joined field read with the space delimiter stays whole.
        let codec = AssociationCodec::default();
        let store = codec
            .import("Image Path,Tags\nimg1.png,\"cat,dog\"\n".as_bytes())
            .unwrap();
        assert!(store.contains("img1.png", "cat,dog"));
    }

    #[test]
    fn test_path_helpers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tags.csv");
        let codec = AssociationCodec::default();
        let store = AssociationStore::from_iter([("a.png", vec!["cat"])]);

        assert_eq!(codec.export_to_path(&store, &path).unwrap(), 1);
        assert_eq!(codec.import_from_path(&path).unwrap(), store);

        let missing = dir.path().join("missing.csv");
        assert!(matches!(
            codec.import_from_path(&missing).unwrap_err(),
            CodecError::Io(_)
        ));
    }
}
