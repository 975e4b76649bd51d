//! Metadata tables and known-value registries for civet.
//!
//! This crate reads delimited metadata files and holds the fixed sets of
//! names the configuration is validated against: the canonical header set,
//! colour palettes and sequencing centres.

pub mod error;
pub mod headers;
pub mod metadata;
pub mod registry;

pub use error::{Error, Result};
pub use headers::{CANONICAL_HEADERS, is_canonical_header};
pub use metadata::{MetadataFile, MetadataRow, Rows, write_records};
pub use registry::{DEFAULT_PALETTE, PaletteRegistry, SequencingCentreRegistry};
