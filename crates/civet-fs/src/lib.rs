//! Filesystem layer for civet
//!
//! Provides atomic writes, format-agnostic config files and validation of
//! the reference data directory the pipeline reads from.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod layout;

pub use config::{ConfigFormat, ConfigStore};
pub use constants::DataFile;
pub use error::{Error, Result};
pub use layout::DataLayout;
