//! End-to-end resolution across the workspace crates
//!
//! Each test lays out a working directory with reference data, runs
//! `Setup::run` and checks the files and settings a report stage would read.

use civet_core::config::ConfigLayer;
use civet_core::query::FILTERED_QUERY_FILE;
use civet_core::{CONFIG_DUMP_FILE, Config, QueryOrigin, RunOutcome, RunRequest, Setup, keys};
use civet_fs::DataFile;
use civet_meta::MetadataFile;
use civet_test_utils::fixtures;
use civet_test_utils::workspace::TestWorkspace;
use pretty_assertions::assert_eq;

fn run(ws: &TestWorkspace, input: Option<&str>, cli: ConfigLayer) -> RunOutcome {
    let request = RunRequest {
        cwd: ws.root().to_path_buf(),
        input: input.map(str::to_string),
        id_string: false,
        cli,
    };
    Setup::default().run(request).unwrap()
}

fn resolved(outcome: RunOutcome) -> Config {
    match outcome {
        RunOutcome::Resolved { config, .. } => config,
        RunOutcome::ConfigWritten(path) => panic!("unexpected config dump at {}", path.display()),
    }
}

fn local_data() -> ConfigLayer {
    ConfigLayer::new()
        .with(keys::DATADIR, "data")
        .with(keys::OUTDIR, "out")
}

#[test]
fn config_file_query_is_relative_to_config() {
    let ws = TestWorkspace::new();
    ws.data_dir();
    ws.write("project/query.csv", fixtures::QUERY);
    ws.write("project/civet.yaml", fixtures::CONFIG);

    let config = resolved(run(&ws, Some("project/civet.yaml"), local_data()));

    assert_eq!(config.get_path(keys::QUERY), Some(ws.path("project/query.csv")));
    assert_eq!(config.get_path(keys::PATH_TO_QUERY), Some(ws.path("project")));
    assert_eq!(config.get_path(keys::OUTDIR), Some(ws.path("out")));
    for file in DataFile::ALL {
        assert_eq!(
            config.get_path(file.config_key()),
            Some(ws.path("data").join(file.as_str()))
        );
    }
}

#[test]
fn command_line_beats_config_file() {
    let ws = TestWorkspace::new();
    ws.data_dir();
    ws.write_query();
    ws.write_config();
    let cli = local_data()
        .with(keys::SEQUENCING_CENTRE, "BIRM")
        .with(keys::DISTANCE, 4_i64);

    let config = resolved(run(&ws, Some("civet.yaml"), cli));

    assert_eq!(config.get_str(keys::SEQUENCING_CENTRE), Some("BIRM"));
    assert_eq!(
        config.get_path(keys::SEQUENCING_CENTRE_DEST),
        Some(ws.path("out").join("figures").join("BIRM.png"))
    );
    // up-distance is set in the file, so only down_distance takes the radius
    assert_eq!(config.get_integer(keys::UP_DISTANCE), Some(3));
    assert_eq!(config.get_integer(keys::DOWN_DISTANCE), Some(4));
}

#[test]
fn metadata_query_file_keeps_matching_rows() {
    let ws = TestWorkspace::new();
    ws.data_dir();
    let cli = local_data().with(
        keys::FROM_METADATA,
        vec!["country=UK".to_string(), "lineage=B.1".to_string()],
    );

    let outcome = run(&ws, None, cli);

    let RunOutcome::Resolved { config, summary } = outcome else {
        panic!("expected a resolved run");
    };
    let QueryOrigin::Metadata(query) = &summary.origin else {
        panic!("expected a metadata query, got {:?}", summary.origin);
    };
    assert_eq!(query.ids, vec!["EDIN-1001", "BIRM-2001", "NIRE-3001"]);
    assert_eq!(query.preview().map(<[String]>::len), Some(3));

    let written = MetadataFile::open(ws.path("out").join(FILTERED_QUERY_FILE)).unwrap();
    let source = MetadataFile::open(ws.path("data/cog_metadata.csv")).unwrap();
    assert_eq!(written.columns(), source.columns());
    let ids: Vec<String> = written
        .rows()
        .unwrap()
        .map(|row| row.unwrap().get("central_sample_id").unwrap().to_string())
        .collect();
    assert_eq!(ids, query.ids);
    assert_eq!(config.get_str(keys::INPUT_COLUMN), Some("central_sample_id"));
}

#[test]
fn config_dump_reloads_to_same_settings() {
    let ws = TestWorkspace::new();
    ws.data_dir();
    ws.write_query();
    let cli = local_data()
        .with(keys::FIELDS, "adm2")
        .with(keys::LABEL_FIELDS, "sample_date")
        .with(keys::GENERATE_CONFIG, true);

    let outcome = run(&ws, Some("query.csv"), cli);
    let RunOutcome::ConfigWritten(dump) = outcome else {
        panic!("expected the config dump");
    };
    assert_eq!(dump, ws.path("out").join(CONFIG_DUMP_FILE));

    let reloaded = resolved(run(&ws, Some("out/civet_config.yaml"), ConfigLayer::new()));

    assert_eq!(reloaded.get_path(keys::QUERY), Some(ws.path("query.csv")));
    assert_eq!(reloaded.get_str(keys::TREE_FIELDS), Some("adm2"));
    assert_eq!(reloaded.get_str(keys::LABEL_FIELDS), Some("sample_date"));
    assert_eq!(reloaded.get_str(keys::DATE_FIELDS), Some("NONE"));
    assert_eq!(reloaded.get_str(keys::NODE_SUMMARY), Some("country"));
    assert_eq!(reloaded.get_path(keys::OUTDIR), Some(ws.path("out")));
    assert!(!reloaded.flag(keys::GENERATE_CONFIG));
}
