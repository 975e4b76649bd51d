//! Configuration dump

use std::path::PathBuf;

use civet_fs::ConfigStore;

use crate::config::Config;
use crate::{Error, Result, keys};

/// File the dump is written to, inside the output directory.
pub const CONFIG_DUMP_FILE: &str = "civet_config.yaml";

/// Write every resolved key except `generate_config` to
/// `<outdir>/civet_config.yaml` and return the path.
pub fn write_config_dump(config: &Config) -> Result<PathBuf> {
    let outdir = config
        .get_path(keys::OUTDIR)
        .ok_or_else(|| Error::setting(keys::OUTDIR, "output directory has not been resolved"))?;
    let path = outdir.join(CONFIG_DUMP_FILE);

    let document = config.to_document(&[keys::GENERATE_CONFIG]);
    ConfigStore::new().save(&path, &document)?;

    tracing::info!(path = %path.display(), keys = document.len(), "Config file written");
    Ok(path)
}
