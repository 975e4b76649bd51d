//! Layered configuration resolution
//!
//! `ConfigResolver` merges up to three [`ConfigLayer`]s into one [`Config`]:
//!
//! 1. **CLI**: values the user passed on the command line
//! 2. **File**: values from a loaded config file
//! 3. **Defaults**: built-in fallbacks
//!
//! Merging is first-write-wins, so a key set by an earlier layer is never
//! overwritten by a later one.

use std::path::Path;

use super::layer::ConfigLayer;
use super::value::{Config, Source};
use crate::qc::{DEFAULT_MAX_AMBIGUITY, DEFAULT_MIN_LENGTH};
use crate::{Result, keys};

/// Built-in defaults applied below the CLI and file layers.
///
/// Field defaults (`tree_fields`, `label_fields`, ...) are not listed here:
/// they apply only after the field they guard has been validated.
pub fn builtin_defaults() -> ConfigLayer {
    ConfigLayer::new()
        .with(keys::INPUT_COLUMN, "name")
        .with(keys::DATA_COLUMN, "central_sample_id")
        .with(keys::UP_DISTANCE, 2_i64)
        .with(keys::DOWN_DISTANCE, 2_i64)
        .with(keys::SEQUENCING_CENTRE, "DEFAULT")
        .with(keys::MIN_LENGTH, DEFAULT_MIN_LENGTH)
        .with(keys::MAX_AMBIGUITY, DEFAULT_MAX_AMBIGUITY)
        .with(keys::MAP_SEQUENCES, false)
        .with(keys::LOCAL_LINEAGES, false)
        .with(keys::REMOTE, false)
        .with(keys::NO_TEMP, false)
        .with(keys::GENERATE_CONFIG, false)
}

/// Resolves a [`Config`] from CLI, file and default layers.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    cli: ConfigLayer,
    file: Option<ConfigLayer>,
    defaults: ConfigLayer,
}

impl ConfigResolver {
    /// A resolver over `cli` with the built-in defaults and no file layer.
    pub fn new(cli: ConfigLayer) -> Self {
        Self {
            cli,
            file: None,
            defaults: builtin_defaults(),
        }
    }

    #[must_use]
    pub fn with_file(mut self, file: ConfigLayer) -> Self {
        self.file = Some(file);
        self
    }

    /// Load the file layer from `path`.
    pub fn load_file(self, path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file layer");
        let layer = ConfigLayer::from_file(path)?;
        Ok(self.with_file(layer))
    }

    /// Merge the layers, highest precedence first.
    pub fn resolve(&self) -> Config {
        let mut config = Config::new().merge_absent(&self.cli, Source::Cli);
        tracing::debug!(keys = self.cli.len(), "Merged CLI layer");

        if let Some(file) = &self.file {
            config = config.merge_absent(file, Source::File);
            tracing::debug!(keys = file.len(), "Merged config file layer");
        } else {
            tracing::debug!("No config file layer, skipping");
        }

        config.merge_absent(&self.defaults, Source::Default)
    }
}
