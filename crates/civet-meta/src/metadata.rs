//! Delimited metadata files
//!
//! [`MetadataFile`] opens a CSV with a header row and exposes its column set
//! and a fresh row iterator on every call to [`MetadataFile::rows`]. Nothing
//! is cached between scans and the source file is never written.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Terminator, WriterBuilder};

use crate::{Error, Result};

/// A metadata table on disk.
#[derive(Debug, Clone)]
pub struct MetadataFile {
    path: PathBuf,
    columns: Rc<[String]>,
}

impl MetadataFile {
    /// Open `path` and read its header row.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut reader = Self::reader(&path)?;
        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| Error::csv(&path, e))?
            .iter()
            .map(str::to_string)
            .collect();

        tracing::debug!(path = %path.display(), columns = columns.len(), "Opened metadata");
        Ok(Self {
            path,
            columns: Rc::from(columns),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Column names in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Start a new scan over the data rows.
    pub fn rows(&self) -> Result<Rows> {
        let reader = Self::reader(&self.path)?;
        Ok(Rows {
            path: self.path.clone(),
            columns: Rc::clone(&self.columns),
            records: reader.into_records(),
            number: 0,
        })
    }

    fn reader(path: &Path) -> Result<csv::Reader<File>> {
        if !path.is_file() {
            return Err(Error::MetadataNotFound {
                path: path.to_path_buf(),
            });
        }
        ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|e| Error::csv(path, e))
    }
}

/// Iterator over the data rows of a [`MetadataFile`].
pub struct Rows {
    path: PathBuf,
    columns: Rc<[String]>,
    records: StringRecordsIntoIter<File>,
    number: usize,
}

impl Iterator for Rows {
    type Item = Result<MetadataRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        self.number += 1;
        Some(
            record
                .map(|record| MetadataRow {
                    number: self.number,
                    columns: Rc::clone(&self.columns),
                    record,
                })
                .map_err(|e| Error::csv(&self.path, e)),
        )
    }
}

/// One record of a metadata table, keyed by the table's columns.
#[derive(Debug, Clone)]
pub struct MetadataRow {
    number: usize,
    columns: Rc<[String]>,
    record: StringRecord,
}

impl MetadataRow {
    /// 1-based position among the data rows (the header is not counted).
    pub fn number(&self) -> usize {
        self.number
    }

    /// Value of `column`, if the table has that column.
    pub fn get(&self, column: &str) -> Option<&str> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.record.get(index)
    }

    /// Values in column order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.record.iter()
    }

    /// `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.record.iter())
    }
}

/// Write a header and records as CSV, replacing `path` atomically.
///
/// Rows are newline-terminated with standard CSV quoting. Returns the number
/// of records written.
pub fn write_records<I, R, T>(path: &Path, header: &[String], records: I) -> Result<usize>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(header)
        .map_err(|e| Error::csv(path, e))?;

    let mut count = 0;
    for record in records {
        writer
            .write_record(record)
            .map_err(|e| Error::csv(path, e))?;
        count += 1;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::csv(path, e.into_error().into()))?;
    civet_fs::io::write_atomic(path, &bytes)?;

    Ok(count)
}
