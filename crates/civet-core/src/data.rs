//! Reference data directory resolution
//!
//! The five reference files come from one of three places:
//!
//! 1. the CLIMB cluster path, when running on CLIMB
//! 2. a local data directory
//! 3. a remote sync from CLIMB into a local directory
//!
//! The sync itself runs through [`DataTransfer`] so it can be replaced in
//! tests.

use std::path::{Path, PathBuf};
use std::process::Command;

use civet_fs::DataLayout;

use crate::config::Config;
use crate::{Error, Result, keys};

/// Reference data path on the CLIMB cluster.
pub const CLIMB_DATA_PATH: &str = "/cephfs/covid/bham/civet-cat";

/// Host remote syncs pull from.
pub const CLIMB_HOST: &str = "bham.covid19.climb.ac.uk";

/// Directory a remote sync creates inside the destination.
pub const SYNCED_DIR: &str = "civet-cat";

/// Copies the reference data directory to local storage.
pub trait DataTransfer {
    /// Sync the CLIMB data directory into `dest`, creating `dest/civet-cat`.
    fn fetch(&self, username: Option<&str>, dest: &Path) -> Result<()>;
}

/// [`DataTransfer`] backed by the `rsync` command.
#[derive(Debug, Default, Clone, Copy)]
pub struct RsyncTransfer;

impl RsyncTransfer {
    fn remote(username: Option<&str>) -> String {
        match username {
            Some(user) => format!("{user}@{CLIMB_HOST}:{CLIMB_DATA_PATH}"),
            None => format!("{CLIMB_HOST}:{CLIMB_DATA_PATH}"),
        }
    }

    fn hint(username: Option<&str>) -> &'static str {
        match username {
            Some(_) => {
                "Check your user name is a valid CLIMB username e.g. climb-covid19-smithj\n\
                 Also, check if you have access to CLIMB from this machine and are in the UK"
            }
            None => {
                "Check your ssh is configured with Host bham.covid19.climb.ac.uk\n\
                 Alternatively enter your CLIMB username with --uun e.g. climb-covid19-smithj\n\
                 Also, check if you have access to CLIMB from this machine and are in the UK"
            }
        }
    }
}

impl DataTransfer for RsyncTransfer {
    fn fetch(&self, username: Option<&str>, dest: &Path) -> Result<()> {
        let remote = Self::remote(username);
        let command = format!("rsync -avzh {remote} {}", dest.display());
        tracing::info!(%command, "Syncing civet data");

        let status = Command::new("rsync")
            .arg("-avzh")
            .arg(&remote)
            .arg(dest)
            .status()
            .map_err(|e| Error::ExternalTransfer {
                command: command.clone(),
                status: e.to_string(),
                hint: Self::hint(username).to_string(),
            })?;

        if !status.success() {
            return Err(Error::ExternalTransfer {
                command,
                status: status.to_string(),
                hint: Self::hint(username).to_string(),
            });
        }
        Ok(())
    }
}

/// Resolves where the reference data lives and records each file's path.
pub struct DataResolver<'a> {
    cwd: PathBuf,
    climb_root: PathBuf,
    transfer: &'a dyn DataTransfer,
}

impl<'a> DataResolver<'a> {
    pub fn new(cwd: impl Into<PathBuf>, transfer: &'a dyn DataTransfer) -> Self {
        Self {
            cwd: cwd.into(),
            climb_root: PathBuf::from(CLIMB_DATA_PATH),
            transfer,
        }
    }

    /// Use `root` in place of the CLIMB cluster path.
    #[must_use]
    pub fn with_climb_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.climb_root = root.into();
        self
    }

    /// Locate the data directory, validate it and store the five file
    /// paths (`cog_seqs`, `cog_metadata`, ...) and `datadir`.
    ///
    /// A failed sync is fatal and not retried.
    pub fn resolve(&self, config: Config) -> Result<Config> {
        let remote = config.flag(keys::REMOTE);
        let datadir = config.get_path(keys::DATADIR).map(|dir| self.cwd.join(dir));

        let (config, layout) = if config.flag(keys::CLIMB) {
            if !self.climb_root.is_dir() {
                return Err(Error::ClimbUnavailable {
                    path: self.climb_root.clone(),
                });
            }
            let config = config.with(keys::REMOTE, false).with(keys::USERNAME, "");
            (config, DataLayout::new(&self.climb_root))
        } else if remote {
            let dest = datadir.unwrap_or_else(|| self.cwd.clone());
            civet_fs::io::ensure_dir(&dest)?;
            let username = config.get_str(keys::USERNAME).filter(|u| !u.is_empty());
            self.transfer.fetch(username, &dest)?;
            (config, DataLayout::new(dest.join(SYNCED_DIR)))
        } else if let Some(datadir) = datadir {
            (config, DataLayout::new(datadir))
        } else {
            return Err(Error::NoDataSource);
        };

        layout.validate()?;
        tracing::info!(datadir = %layout.root().display(), "Found cog data");

        let config = layout
            .files()
            .fold(config, |config, (file, path)| config.with(file.config_key(), path));
        Ok(config.with(keys::DATADIR, layout.root()))
    }
}
