//! [`TestWorkspace`] builder for civet run scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use civet_fs::DataFile;
use tempfile::TempDir;

use crate::fixtures;

/// A temporary working directory with helpers to lay out query files,
/// config files and reference data directories.
///
/// # Example
///
/// ```rust,no_run
/// use civet_test_utils::workspace::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// let data_dir = ws.data_dir();
/// ws.write_query();
/// ws.assert_file_exists("data/cog_metadata.csv");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Root of the temporary directory; use it as the working directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestWorkspace::write: {}: {e}", path.display()));
        path
    }

    /// A complete data directory at `data/` holding all five reference files.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir_at("data", &[])
    }

    /// A data directory at `relative`, leaving out the `missing` files.
    pub fn data_dir_at(&self, relative: &str, missing: &[DataFile]) -> PathBuf {
        let dir = self.path(relative);
        fs::create_dir_all(&dir).unwrap();
        for file in DataFile::ALL {
            if missing.contains(&file) {
                continue;
            }
            let content = match file {
                DataFile::CogMetadata => fixtures::COG_METADATA,
                DataFile::CogGlobalMetadata => fixtures::COG_GLOBAL_METADATA,
                DataFile::CogGlobalTree => "#NEXUS\n",
                DataFile::CogAlignment | DataFile::CogGlobalAlignment => ">ref\nACGT\n",
            };
            fs::write(dir.join(file.as_str()), content).unwrap();
        }
        dir
    }

    /// The fixture query at `query.csv`.
    pub fn write_query(&self) -> PathBuf {
        self.write("query.csv", fixtures::QUERY)
    }

    /// The fixture config at `civet.yaml`, with the fixture query next to it.
    pub fn write_config(&self) -> PathBuf {
        self.write_query();
        self.write("civet.yaml", fixtures::CONFIG)
    }

    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, relative: &str, content: &str) {
        let full_path = self.path(relative);
        let file_content = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            full_path.display(),
            content,
            file_content
        );
    }
}
