//! Tree name stem discovery

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::{Error, Result, keys};

/// Stem of a `<stem>_<n>.tree` file name, or `None` for other files.
pub fn tree_stem(file_name: &str) -> Option<&str> {
    let basename = file_name.strip_suffix(".tree")?;
    Some(basename.rsplit_once('_').map_or("", |(stem, _)| stem))
}

/// The single stem shared by every `*.tree` file under `dir`.
///
/// Subdirectories are searched too. No trees, or trees with differing
/// stems, is an error.
pub fn find_tree_stem(dir: &Path) -> Result<String> {
    let mut stems = BTreeSet::new();
    collect_stems(dir, &mut stems)?;

    let mut stems = stems.into_iter();
    match (stems.next(), stems.next()) {
        (Some(stem), None) => Ok(stem),
        (None, _) => Err(Error::TreeStem {
            dir: dir.to_path_buf(),
            message: "no trees found in tree directory".to_string(),
        }),
        (Some(_), Some(_)) => Err(Error::TreeStem {
            dir: dir.to_path_buf(),
            message: "multiple tree names found".to_string(),
        }),
    }
}

/// Store the stem of the trees under `dir` as `tree_name_stem`.
pub fn resolve_tree_name_stem(config: Config, dir: &Path) -> Result<Config> {
    let stem = find_tree_stem(dir)?;
    tracing::debug!(%stem, "Resolved tree name stem");
    Ok(config.with(keys::TREE_NAME_STEM, stem))
}

fn collect_stems(dir: &Path, stems: &mut BTreeSet<String>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| civet_fs::Error::io(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| civet_fs::Error::io(dir, e))?.path();
        if path.is_dir() {
            collect_stems(&path, stems)?;
        } else if let Some(stem) = path.file_name().and_then(|n| n.to_str()).and_then(tree_stem) {
            stems.insert(stem.to_string());
        }
    }
    Ok(())
}
