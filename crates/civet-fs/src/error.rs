//! Error types for civet-fs

use std::path::PathBuf;

use crate::constants::DataFile;

/// Result type for civet-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in civet-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Failed to serialize {format} config for {path}: {message}")]
    ConfigSerialize {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension:?} (expected yaml, yml, toml or json)")]
    UnsupportedFormat { extension: String },

    #[error("Data directory not found at {path}.\n{}", required_files_hint())]
    DataDirNotFound { path: PathBuf },

    #[error(
        "Cannot find correct data files at {path} (missing: {}).\n{}",
        missing.join(", "),
        required_files_hint()
    )]
    MissingDataFile { path: PathBuf, missing: Vec<String> },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// The directory contents every data-directory error spells out.
pub fn required_files_hint() -> String {
    let mut hint = String::from("The directory should contain the following files:");
    for file in DataFile::ALL {
        hint.push_str("\n    - ");
        hint.push_str(file.as_str());
    }
    hint
}
