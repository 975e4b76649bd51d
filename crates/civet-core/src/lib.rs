//! Configuration resolution and metadata query engine for civet
//!
//! Given command-line options, an optional config file and a reference
//! data directory, this crate decides what query a civet run processes and
//! checks that the request can be satisfied before any report stage runs.
//!
//! # Stages
//!
//! [`Setup::run`] resolves, in order: input, config layers, output and
//! temporary directories, reference data, the query file, query sequence
//! QC, field lists and report options. Every stage returns a new [`Config`]; no stage exits
//! the process.

pub mod config;
pub mod data;
pub mod dump;
pub mod error;
pub mod fields;
pub mod keys;
pub mod options;
pub mod paths;
pub mod qc;
pub mod query;
pub mod setup;
pub mod trees;

pub use config::{Config, ConfigLayer, ConfigResolver, ConfigValue, Source};
pub use data::{DataResolver, DataTransfer, RsyncTransfer};
pub use dump::{CONFIG_DUMP_FILE, write_config_dump};
pub use error::{Error, Result};
pub use fields::{DisplayTrait, FieldKind, FieldValidator, QueryTable};
pub use qc::{QcFailure, QcReason, QcThresholds};
pub use query::{MaterializedQuery, QueryInput, QueryOrigin};
pub use setup::{RunOutcome, RunRequest, RunSummary, Setup};
