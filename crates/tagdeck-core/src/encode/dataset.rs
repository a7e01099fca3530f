//! In-memory tabular dataset read from and written to CSV.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use crate::error::EncodeError;

/// Named columns and string cells. Every row has one cell per header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Build a dataset from headers and rows.
    ///
    /// Short rows are padded with empty cells and long rows truncated, so the
    /// one-cell-per-header shape always holds.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// Parse CSV with a header row. Rows whose length differs from the header
    /// are rejected by the reader.
    pub fn read<R: Read>(reader: R) -> Result<Self, EncodeError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        let headers = rdr.headers()?.iter().map(String::from).collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            rows.push(record?.iter().map(String::from).collect());
        }
        Ok(Self { headers, rows })
    }

    pub fn from_path(path: &Path) -> Result<Self, EncodeError> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Write as CSV with a header row.
    pub fn write<W: Write>(&self, writer: W) -> Result<(), EncodeError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write to a file once the whole CSV has been rendered in memory.
    pub fn to_path(&self, path: &Path) -> Result<(), EncodeError> {
        let mut buffer = Vec::new();
        self.write(&mut buffer)?;
        std::fs::write(path, buffer)?;
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell at `row` in the column named `column`.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| r[col].as_str())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
