//! Output and temporary directory resolution

use civet_core::config::{Config, Source};
use civet_core::keys;
use civet_core::paths::{TEMPDIR_PREFIX, resolve_outdir, resolve_tempdir};
use civet_test_utils::workspace::TestWorkspace;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

#[test]
fn requested_outdir_is_created_under_cwd() {
    let ws = TestWorkspace::new();
    let config = Config::new().with_source(keys::OUTDIR, "reports/run1", Source::Cli);

    let config = resolve_outdir(config, ws.root()).unwrap();

    assert_eq!(config.get_path(keys::OUTDIR), Some(ws.path("reports/run1")));
    assert_eq!(config.get_str(keys::REL_OUTDIR), Some("reports/run1"));
    assert!(ws.path("reports/run1").is_dir());
}

#[test]
fn existing_outdir_is_reused() {
    let ws = TestWorkspace::new();
    ws.write("out/keep.txt", "kept");
    let config = Config::new().with_source(keys::OUTDIR, "out", Source::File);

    let first = resolve_outdir(config.clone(), ws.root()).unwrap();
    let second = resolve_outdir(config, ws.root()).unwrap();

    assert_eq!(first.get_path(keys::OUTDIR), second.get_path(keys::OUTDIR));
    ws.assert_file_contains("out/keep.txt", "kept");
}

#[test]
fn missing_outdir_gets_a_timestamp_name() {
    let ws = TestWorkspace::new();

    let config = resolve_outdir(Config::new(), ws.root()).unwrap();

    let outdir = config.get_path(keys::OUTDIR).unwrap();
    let name = outdir.file_name().unwrap().to_string_lossy().into_owned();
    assert!(outdir.is_dir());
    assert_eq!(outdir.parent(), Some(ws.root()));
    // YYYY-MM-DD-HHMMSSmmm
    assert_eq!(name.len(), 20);
    assert!(name.chars().all(|c| c.is_ascii_digit() || c == '-'));
    assert_eq!(
        config.get_path(keys::REL_OUTDIR),
        Some(PathBuf::from(".").join(&name))
    );
}

#[test]
fn no_temp_uses_outdir() {
    let ws = TestWorkspace::new();
    let config = Config::new()
        .with(keys::OUTDIR, ws.path("out"))
        .with_source(keys::NO_TEMP, true, Source::Cli);

    let config = resolve_tempdir(config, ws.root()).unwrap();

    assert_eq!(config.get_path(keys::TEMPDIR), Some(ws.path("out")));
}

#[test]
fn requested_tempdir_gets_unique_child() {
    let ws = TestWorkspace::new();
    let config = Config::new()
        .with(keys::OUTDIR, ws.path("out"))
        .with_source(keys::TEMPDIR, "scratch", Source::Cli);

    let first = resolve_tempdir(config.clone(), ws.root()).unwrap();
    let second = resolve_tempdir(config, ws.root()).unwrap();

    let first = first.get_path(keys::TEMPDIR).unwrap();
    let second = second.get_path(keys::TEMPDIR).unwrap();
    assert_ne!(first, second);
    for dir in [&first, &second] {
        assert!(dir.is_dir());
        assert_eq!(dir.parent(), Some(ws.path("scratch").as_path()));
        assert!(
            dir.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with(TEMPDIR_PREFIX)
        );
    }
}

#[test]
fn default_tempdir_is_under_system_temp() {
    let ws = TestWorkspace::new();
    let config = Config::new().with(keys::OUTDIR, ws.path("out"));

    let config = resolve_tempdir(config, ws.root()).unwrap();

    let tempdir = config.get_path(keys::TEMPDIR).unwrap();
    assert!(tempdir.is_dir());
    assert!(tempdir.starts_with(std::env::temp_dir()));
    std::fs::remove_dir(&tempdir).unwrap();
}
