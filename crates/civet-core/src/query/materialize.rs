//! Query file output
//!
//! Two writers produce the query CSV every later stage reads:
//! [`write_filtered_query`] copies the selected metadata rows with the
//! metadata header, and [`write_id_query`] writes a single ID column.

use std::path::{Path, PathBuf};

use civet_meta::{MetadataFile, MetadataRow, write_records};

use crate::{Error, Result};

/// File written by [`write_filtered_query`].
pub const FILTERED_QUERY_FILE: &str = "from_metadata_query.csv";

/// File written by [`write_id_query`].
pub const ID_QUERY_FILE: &str = "query.csv";

/// Longest ID list echoed back to the user.
pub const ID_PREVIEW_LIMIT: usize = 100;

/// A query file written to disk and the IDs it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedQuery {
    pub path: PathBuf,
    pub ids: Vec<String>,
}

impl MaterializedQuery {
    /// IDs to print, or `None` when there are too many to be useful.
    pub fn preview(&self) -> Option<&[String]> {
        (self.ids.len() < ID_PREVIEW_LIMIT).then_some(self.ids.as_slice())
    }
}

/// Write `rows` to `<outdir>/from_metadata_query.csv` with the full header
/// of `metadata`.
///
/// Zero rows is [`Error::EmptyResult`] and nothing is written.
pub fn write_filtered_query(
    metadata: &MetadataFile,
    rows: &[MetadataRow],
    id_column: &str,
    outdir: &Path,
) -> Result<MaterializedQuery> {
    if rows.is_empty() {
        return Err(Error::EmptyResult);
    }
    if !metadata.has_column(id_column) {
        return Err(Error::UnknownColumn {
            column: id_column.to_string(),
            table: metadata.path().to_path_buf(),
            available: metadata.columns().to_vec(),
        });
    }

    let path = outdir.join(FILTERED_QUERY_FILE);
    let count = write_records(&path, metadata.columns(), rows.iter().map(MetadataRow::values))?;

    let ids = rows
        .iter()
        .filter_map(|row| row.get(id_column))
        .map(str::to_string)
        .collect();

    tracing::info!(path = %path.display(), count, "Wrote query from metadata");
    Ok(MaterializedQuery { path, ids })
}

/// Write `ids` under a single `id_column` header to `<outdir>/query.csv`.
///
/// IDs are written in the given order without checking them against any
/// metadata.
pub fn write_id_query<S: AsRef<str>>(ids: &[S], id_column: &str, outdir: &Path) -> Result<MaterializedQuery> {
    let path = outdir.join(ID_QUERY_FILE);
    let header = [id_column.to_string()];
    let ids: Vec<String> = ids.iter().map(|id| id.as_ref().to_string()).collect();

    write_records(&path, &header, ids.iter().map(|id| [id.as_str()]))?;

    tracing::info!(path = %path.display(), count = ids.len(), "Wrote query from ID list");
    Ok(MaterializedQuery { path, ids })
}
