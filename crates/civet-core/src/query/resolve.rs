//! Query source selection
//!
//! A run has exactly one query. It comes from the first of these that is
//! set, comparing where each value came from before falling back to this
//! order:
//!
//! 1. `from_metadata` filters, evaluated against the reference metadata
//! 2. `query`, a path to a query CSV
//! 3. `ids`, a list of sequence IDs

use std::path::{Path, PathBuf};

use civet_fs::DataFile;
use civet_meta::MetadataFile;

use super::filter::parse_filters;
use super::matcher::select_rows;
use super::materialize::{MaterializedQuery, write_filtered_query, write_id_query};
use crate::config::{Config, Source};
use crate::{Error, Result, keys};

/// How the query file was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOrigin {
    /// Written from metadata rows matching the filters.
    Metadata(MaterializedQuery),
    /// An existing query CSV.
    File(PathBuf),
    /// Written from an ID list.
    Ids(MaterializedQuery),
}

impl QueryOrigin {
    pub fn path(&self) -> &Path {
        match self {
            Self::Metadata(query) | Self::Ids(query) => &query.path,
            Self::File(path) => path,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Candidate {
    FromMetadata,
    Query,
    Ids,
}

impl Candidate {
    fn key(&self) -> &'static str {
        match self {
            Self::FromMetadata => keys::FROM_METADATA,
            Self::Query => keys::QUERY,
            Self::Ids => keys::IDS,
        }
    }
}

/// Resolve the query source and write `query` as an absolute path.
///
/// Needs `outdir` and, for metadata filters, `cog_metadata` to be resolved.
pub fn resolve_query(config: Config, cwd: &Path) -> Result<(Config, QueryOrigin)> {
    let chosen = [Candidate::FromMetadata, Candidate::Query, Candidate::Ids]
        .into_iter()
        .filter_map(|candidate| {
            config
                .source(candidate.key())
                .map(|source| (source, candidate))
        })
        .min()
        .ok_or(Error::MissingInput)?;

    tracing::debug!(source = ?chosen.0, candidate = ?chosen.1, "Selected query source");
    let outdir = outdir(&config)?;

    let (config, origin) = match chosen {
        (_, Candidate::FromMetadata) => {
            let data_column = config.get_text(keys::DATA_COLUMN).unwrap_or_default();
            let config = config.with(keys::INPUT_COLUMN, data_column);
            let query = query_from_metadata(&config, &outdir)?;
            (config, QueryOrigin::Metadata(query))
        }
        (source, Candidate::Query) => {
            let path = query_path(&config, source, cwd);
            if !path.is_file() {
                return Err(Error::QueryFileNotFound { path });
            }
            (config, QueryOrigin::File(path))
        }
        (_, Candidate::Ids) => {
            let ids = config.get_list(keys::IDS).unwrap_or_default();
            if ids.is_empty() {
                return Err(Error::MissingInput);
            }
            let id_column = config.get_text(keys::INPUT_COLUMN).unwrap_or_default();
            let query = write_id_query(&ids, &id_column, &outdir)?;
            (config, QueryOrigin::Ids(query))
        }
    };

    tracing::info!(query = %origin.path().display(), "Resolved query file");
    let config = config.with(keys::QUERY, origin.path());
    Ok((config, origin))
}

/// Resolve the optional query FASTA.
///
/// A command-line path is taken relative to `cwd` and a config-file path
/// relative to `path_to_query`. When unset, `fasta` is stored as an empty
/// string.
pub fn resolve_fasta(config: Config, cwd: &Path) -> Result<Config> {
    let Some(fasta) = config.get_path(keys::FASTA) else {
        return Ok(config.with(keys::FASTA, ""));
    };

    let base = match config.source(keys::FASTA) {
        Some(Source::Cli) => cwd.to_path_buf(),
        _ => config.get_path(keys::PATH_TO_QUERY).unwrap_or_else(|| cwd.to_path_buf()),
    };
    let path = base.join(fasta);
    if !path.is_file() {
        return Err(Error::FastaNotFound { path });
    }

    tracing::info!(fasta = %path.display(), "Resolved query fasta");
    Ok(config.with(keys::FASTA, path))
}

fn outdir(config: &Config) -> Result<PathBuf> {
    config
        .get_path(keys::OUTDIR)
        .ok_or_else(|| Error::setting(keys::OUTDIR, "output directory has not been resolved"))
}

fn query_path(config: &Config, source: Source, cwd: &Path) -> PathBuf {
    let query = config.get_path(keys::QUERY).unwrap_or_default();
    match source {
        Source::File => config
            .get_path(keys::PATH_TO_QUERY)
            .unwrap_or_else(|| cwd.to_path_buf())
            .join(query),
        _ => cwd.join(query),
    }
}

fn query_from_metadata(config: &Config, outdir: &Path) -> Result<MaterializedQuery> {
    let metadata_key = DataFile::CogMetadata.config_key();
    let metadata_path = config
        .get_path(metadata_key)
        .ok_or_else(|| Error::setting(metadata_key, "reference metadata has not been resolved"))?;
    let metadata = MetadataFile::open(metadata_path)?;

    let filters = config.get_list(keys::FROM_METADATA).unwrap_or_default();
    let predicates = parse_filters(&filters, &metadata)?;
    let rows = select_rows(&metadata, &predicates)?;

    let id_column = config.get_text(keys::DATA_COLUMN).unwrap_or_default();
    write_filtered_query(&metadata, &rows, &id_column, outdir)
}
