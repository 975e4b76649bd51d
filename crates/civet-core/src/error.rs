//! Error types for civet-core

use std::path::PathBuf;

/// Result type for civet-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop configuration resolution.
///
/// None of these are retried. Each message is written for the person at the
/// terminal and, where a fixed set of alternatives exists, lists it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No query source could be resolved
    #[error(
        "No query input provided.\nPass a query csv, a comma-separated list of IDs, \
         `--from-metadata` filters, or set `query`/`ids` in a config file"
    )]
    MissingInput,

    /// The positional input is neither IDs, a csv nor a config file
    #[error("Input `{input}` is not a .csv query, a .yaml/.yml config file or a list of IDs (use `--id-string` for a single ID)")]
    UnsupportedInput { input: String },

    /// Query file path resolved but absent
    #[error(
        "Cannot find query file at {}.\nCheck the file exists, or if you are passing a set of IDs \
         (e.g. EPI12345,EPI23456) use `--id-string` or provide `ids` in the config file",
        path.display()
    )]
    QueryFileNotFound { path: PathBuf },

    /// Query FASTA path resolved but absent
    #[error("Cannot find fasta query at {}", path.display())]
    FastaNotFound { path: PathBuf },

    /// The query FASTA could not be read or copied
    #[error("Cannot read fasta query {}: {source}", path.display())]
    FastaRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The query file lacks the configured input column
    #[error("Query file {} is missing header field `{column}`", path.display())]
    MissingQueryColumn { column: String, path: PathBuf },

    /// A metadata filter is not of the form `column=value`
    #[error("Invalid metadata filter `{expression}`: expected `column=value`")]
    InvalidFilter { expression: String },

    /// A filter names a column the metadata does not have
    #[error(
        "`from-metadata` argument contains a column `{column}` that is not found in {}.\nColumns that were found:\n{}",
        table.display(),
        bullet_list(available)
    )]
    UnknownColumn {
        column: String,
        table: PathBuf,
        available: Vec<String>,
    },

    /// A display, label, date or summary field resolves nowhere
    #[error("`{field}` field not found in {searched}")]
    UnknownField { field: String, searched: String },

    /// A date-range filter bound is not `YYYY-MM-DD`
    #[error("Invalid date range `{value}` for column `{column}`: expected `YYYY-MM-DD:YYYY-MM-DD`")]
    InvalidDateFormat { column: String, value: String },

    /// A metadata row holds an unparseable date
    #[error(
        "Metadata field `{value}` [at column: {column}, row: {row}] contains unaccepted date format.\n\
         Please use format `YYYY-MM-DD`"
    )]
    DateParse {
        column: String,
        value: String,
        row: usize,
    },

    /// Metadata query requested without any predicate
    #[error("`from-metadata` needs at least one `column=value` filter")]
    NoFilters,

    /// Every row was filtered out
    #[error("No sequences meet the criteria defined with `--from-metadata`")]
    EmptyResult,

    /// Unknown colour scheme in a display setting
    #[error(
        "{palette} is not a matplotlib compatible colour scheme.\nPlease use one of:\n{}",
        bullet_list(valid)
    )]
    UnknownPalette { palette: String, valid: Vec<String> },

    /// Unknown sequencing-centre header
    #[error("Sequencing centre must be one of the following:\n{}", bullet_list(valid))]
    UnknownSequencingCentre { centre: String, valid: Vec<String> },

    /// Neither a data directory, CLIMB nor a remote sync was requested
    #[error(
        "No way to find source data.\nTo run civet please either\n\
         1) ssh into CLIMB and run with the --CLIMB flag\n\
         2) run with `--remote-sync` and your CLIMB username, e.g. `--uun climb-covid19-otoolexyz`\n\
         3) specify a local directory with `--datadir`\n{}",
        civet_fs::error::required_files_hint()
    )]
    NoDataSource,

    /// --CLIMB requested but the cluster path is not mounted
    #[error("--CLIMB argument called, but CLIMB data path {} doesn't exist", path.display())]
    ClimbUnavailable { path: PathBuf },

    /// An external sync exited unsuccessfully
    #[error("`{command}` failed ({status}).\n{hint}")]
    ExternalTransfer {
        command: String,
        status: String,
        hint: String,
    },

    /// Mapping options are incomplete or inconsistent
    #[error("Invalid mapping options: {message}")]
    InvalidMapping { message: String },

    /// A setting has an unusable value
    #[error("Invalid value for `{key}`: {message}")]
    InvalidSetting { key: String, message: String },

    /// The tree directory has no single tree name stem
    #[error("Cannot determine tree name stem in {}: {message}", dir.display())]
    TreeStem { dir: PathBuf, message: String },

    /// Filesystem error from civet-fs
    #[error(transparent)]
    Fs(#[from] civet_fs::Error),

    /// Metadata error from civet-meta
    #[error(transparent)]
    Meta(#[from] civet_meta::Error),
}

impl Error {
    pub fn setting(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            message: message.into(),
        }
    }
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
