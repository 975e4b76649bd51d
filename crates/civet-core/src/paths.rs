//! Output and temporary directory resolution

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use civet_fs::io::ensure_dir;

use crate::config::Config;
use crate::{Result, keys};

/// Prefix of generated temporary directories.
pub const TEMPDIR_PREFIX: &str = "civet-";

/// Directory name for a run started at `now`, e.g. `2020-05-19-123456789`.
///
/// Local time to the millisecond with separators stripped.
pub fn timestamp_dirname(now: DateTime<Local>) -> String {
    now.format("%Y-%m-%d-%H%M%S%3f").to_string()
}

/// Resolve `outdir` against `cwd`, create it, and record `rel_outdir`.
///
/// Without an `outdir` setting a timestamped directory under `cwd` is
/// used. An existing directory is reused.
pub fn resolve_outdir(config: Config, cwd: &Path) -> Result<Config> {
    let (outdir, rel_outdir) = match config.get_path(keys::OUTDIR) {
        Some(requested) => (cwd.join(&requested), requested),
        None => {
            let name = timestamp_dirname(Local::now());
            (cwd.join(&name), Path::new(".").join(name))
        }
    };

    if ensure_dir(&outdir)? {
        tracing::debug!(outdir = %outdir.display(), "Created output directory");
    }
    tracing::info!(outdir = %outdir.display(), "Output dir");

    Ok(config
        .with(keys::OUTDIR, outdir)
        .with(keys::REL_OUTDIR, rel_outdir))
}

/// Resolve `tempdir`.
///
/// - `no_temp`: intermediate files go to the output directory
/// - `tempdir`: a new uniquely named directory under that parent
/// - neither: a new uniquely named directory under the system temp dir
///
/// Generated directories are kept after the run so later stages can use
/// them.
pub fn resolve_tempdir(config: Config, cwd: &Path) -> Result<Config> {
    let tempdir = if config.flag(keys::NO_TEMP) {
        let outdir = config.get_path(keys::OUTDIR).unwrap_or_else(|| cwd.to_path_buf());
        tracing::info!(outdir = %outdir.display(), "--no-temp: all intermediate files will be written to the output directory");
        outdir
    } else {
        let parent = match config.get_path(keys::TEMPDIR) {
            Some(requested) => {
                let parent = cwd.join(requested);
                ensure_dir(&parent)?;
                parent
            }
            None => std::env::temp_dir(),
        };
        unique_dir_in(&parent)?
    };

    tracing::debug!(tempdir = %tempdir.display(), "Resolved temporary directory");
    Ok(config.with(keys::TEMPDIR, tempdir))
}

fn unique_dir_in(parent: &Path) -> Result<PathBuf> {
    let dir = tempfile::Builder::new()
        .prefix(TEMPDIR_PREFIX)
        .tempdir_in(parent)
        .map_err(|e| civet_fs::Error::io(parent, e))?;
    Ok(dir.keep())
}
