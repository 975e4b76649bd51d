//! Positional input classification

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// What the positional input argument names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryInput {
    /// Sequence IDs given inline.
    Ids(Vec<String>),
    /// A query CSV.
    QueryFile(PathBuf),
    /// A YAML config file.
    ConfigFile(PathBuf),
}

impl QueryInput {
    /// Classify `input`.
    ///
    /// Anything containing `,`, or any input at all when `id_string` is set,
    /// is a list of IDs. Otherwise the extension decides: `.csv` is a query
    /// file and `.yaml`/`.yml` a config file, both resolved against `cwd`.
    pub fn classify(input: &str, id_string: bool, cwd: &Path) -> Result<Self> {
        let input = input.trim();

        if id_string || input.contains(',') {
            let ids = input
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect();
            return Ok(Self::Ids(ids));
        }

        let path = cwd.join(input);
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(Self::QueryFile(path)),
            "yaml" | "yml" => Ok(Self::ConfigFile(path)),
            _ => Err(Error::UnsupportedInput {
                input: input.to_string(),
            }),
        }
    }

    /// Directory that relative paths in a config file are resolved against.
    ///
    /// For inline IDs this is the output directory the ID query is written to.
    pub fn path_to_query(&self, outdir: &Path) -> PathBuf {
        match self {
            Self::Ids(_) => outdir.to_path_buf(),
            Self::QueryFile(path) | Self::ConfigFile(path) => path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| outdir.to_path_buf()),
        }
    }
}
