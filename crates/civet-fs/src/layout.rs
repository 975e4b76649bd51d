//! Reference data directory layout
//!
//! A data directory is only usable when all five [`DataFile`]s are present.
//! The layout is validated here, never produced.

use std::path::{Path, PathBuf};

use crate::{DataFile, Error, Result};

/// A data directory holding the reference alignments, metadata and tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `file` inside this directory.
    pub fn path(&self, file: DataFile) -> PathBuf {
        self.root.join(file)
    }

    /// Required files that are not present as regular files.
    pub fn missing(&self) -> Vec<DataFile> {
        DataFile::ALL
            .into_iter()
            .filter(|file| !self.path(*file).is_file())
            .collect()
    }

    /// Check that the directory exists and holds every required file.
    pub fn validate(&self) -> Result<()> {
        if !self.root.is_dir() {
            return Err(Error::DataDirNotFound {
                path: self.root.clone(),
            });
        }

        let missing = self.missing();
        if !missing.is_empty() {
            return Err(Error::MissingDataFile {
                path: self.root.clone(),
                missing: missing.iter().map(|f| f.as_str().to_string()).collect(),
            });
        }

        tracing::debug!(root = %self.root.display(), "Data directory validated");
        Ok(())
    }

    /// Every required file paired with its resolved path.
    pub fn files(&self) -> impl Iterator<Item = (DataFile, PathBuf)> + '_ {
        DataFile::ALL
            .into_iter()
            .map(move |file| (file, self.path(file)))
    }
}
