//! Field list and display validation

use civet_core::config::{Config, Source};
use civet_core::fields::{
    FieldKind, FieldValidator, QueryTable, parse_display, resolve_display, resolve_fields,
    resolve_node_summary, resolve_summary_field,
};
use civet_core::{Error, keys};
use civet_fs::DataFile;
use civet_meta::PaletteRegistry;
use civet_test_utils::workspace::TestWorkspace;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn query_table(ws: &TestWorkspace) -> QueryTable {
    QueryTable::open(&ws.write_query(), "name").unwrap()
}

#[test]
fn query_table_collects_input_column() {
    let ws = TestWorkspace::new();
    let table = query_table(&ws);

    assert_eq!(table.ids().to_vec(), vec!["EDIN-1001", "BIRM-2002"]);
    assert!(table.has_column("adm2"));
}

#[test]
fn query_table_requires_input_column() {
    let ws = TestWorkspace::new();
    let err = QueryTable::open(&ws.write_query(), "sequence_name").unwrap_err();

    assert!(matches!(err, Error::MissingQueryColumn { ref column, .. } if column == "sequence_name"));
}

#[rstest]
#[case::query_column("travel_history")]
#[case::canonical_only("lineage")]
#[case::both("adm2")]
fn field_in_query_or_canonical_set_is_accepted(#[case] field: &str) {
    let ws = TestWorkspace::new();
    let validator = FieldValidator::for_query(&query_table(&ws));

    assert!(validator.accepts(field));
}

#[test]
fn field_in_neither_set_is_rejected() {
    let ws = TestWorkspace::new();
    let validator = FieldValidator::for_query(&query_table(&ws));
    let config = Config::new().with_source(keys::LABEL_FIELDS, "sample_date,favourite_colour", Source::Cli);

    let err = validator.resolve(config, FieldKind::Label).unwrap_err();

    assert!(matches!(err, Error::UnknownField { ref field, .. } if field == "favourite_colour"));
}

#[test]
fn text_and_list_values_normalise_identically() {
    let ws = TestWorkspace::new();
    let validator = FieldValidator::for_query(&query_table(&ws));

    let from_text = Config::new().with_source(keys::FIELDS, "adm2,lineage", Source::Cli);
    let from_list = Config::new().with_source(
        keys::FIELDS,
        vec!["adm2".to_string(), "lineage".to_string()],
        Source::File,
    );

    let from_text = validator.resolve(from_text, FieldKind::Colour).unwrap();
    let from_list = validator.resolve(from_list, FieldKind::Colour).unwrap();

    assert_eq!(from_text.get_str(keys::TREE_FIELDS), Some("adm2,lineage"));
    assert_eq!(from_list.get_str(keys::TREE_FIELDS), Some("adm2,lineage"));
}

#[rstest]
#[case::colour(FieldKind::Colour, keys::TREE_FIELDS, "adm1")]
#[case::label(FieldKind::Label, keys::LABEL_FIELDS, "NONE")]
#[case::date(FieldKind::Date, keys::DATE_FIELDS, "NONE")]
fn unset_fields_fall_back_to_default(#[case] kind: FieldKind, #[case] key: &str, #[case] expected: &str) {
    let ws = TestWorkspace::new();
    let validator = FieldValidator::for_query(&query_table(&ws));

    let config = validator.resolve(Config::new(), kind).unwrap();

    assert_eq!(config.get_str(key), Some(expected));
}

#[test]
fn display_with_and_without_palette() {
    let ws = TestWorkspace::new();
    let path = ws.write("q.csv", "name,country,adm1\nA,UK,UK-ENG\n");
    let table = QueryTable::open(&path, "name").unwrap();

    let traits = parse_display(&["country=viridis", "adm1"], &table, &PaletteRegistry::with_builtins()).unwrap();

    let rendered: Vec<String> = traits.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["country:viridis", "adm1:default"]);
}

#[test]
fn colon_separates_palette_too() {
    let ws = TestWorkspace::new();
    let table = query_table(&ws);
    let config = Config::new().with_source(keys::DISPLAY, "adm2:plasma", Source::Cli);

    let config = resolve_display(config, &table, &PaletteRegistry::with_builtins()).unwrap();

    assert_eq!(config.get_str(keys::GRAPHIC_DICT), Some("adm2:plasma"));
}

#[test]
fn unknown_palette_lists_valid_palettes() {
    let ws = TestWorkspace::new();
    let path = ws.write("q.csv", "name,country\nA,UK\n");
    let table = QueryTable::open(&path, "name").unwrap();

    let err = parse_display(&["country=not_a_palette"], &table, &PaletteRegistry::with_builtins()).unwrap_err();

    match err {
        Error::UnknownPalette { palette, valid } => {
            assert_eq!(palette, "not_a_palette");
            assert!(valid.contains(&"viridis".to_string()));
        }
        other => panic!("expected UnknownPalette, got {other:?}"),
    }
}

#[test]
fn display_trait_must_be_a_query_column() {
    let ws = TestWorkspace::new();
    let table = query_table(&ws);

    // `lineage` is a canonical header but not a query column
    let err = parse_display(&["lineage=viridis"], &table, &PaletteRegistry::with_builtins()).unwrap_err();

    assert!(matches!(err, Error::UnknownField { .. }));
}

#[test]
fn resolve_fields_fills_every_key() {
    let ws = TestWorkspace::new();
    let table = query_table(&ws);
    let config = Config::new()
        .with_source(keys::FIELDS, "adm2,travel_history", Source::File)
        .with_source(keys::DISPLAY, "adm2=viridis,travel_history", Source::File);

    let config = resolve_fields(config, &table, &PaletteRegistry::with_builtins()).unwrap();

    assert_eq!(config.get_str(keys::TREE_FIELDS), Some("adm2,travel_history"));
    assert_eq!(config.get_str(keys::LABEL_FIELDS), Some("NONE"));
    assert_eq!(config.get_str(keys::DATE_FIELDS), Some("NONE"));
    assert_eq!(
        config.get_str(keys::GRAPHIC_DICT),
        Some("adm2:viridis,travel_history:default")
    );
}

#[test]
fn none_sentinel_reads_as_unset() {
    let ws = TestWorkspace::new();
    let validator = FieldValidator::for_query(&query_table(&ws));
    let config = Config::new().with_source(keys::LABEL_FIELDS, "NONE", Source::File);

    let config = validator.resolve(config, FieldKind::Label).unwrap();

    assert_eq!(config.get_str(keys::LABEL_FIELDS), Some("NONE"));
}

#[test]
fn comma_joined_list_items_are_split() {
    let ws = TestWorkspace::new();
    let table = query_table(&ws);
    let config = Config::new().with_source(
        keys::DISPLAY,
        vec!["adm2=viridis,travel_history".to_string()],
        Source::Cli,
    );

    let config = resolve_display(config, &table, &PaletteRegistry::with_builtins()).unwrap();

    assert_eq!(
        config.get_str(keys::GRAPHIC_DICT),
        Some("adm2:viridis,travel_history:default")
    );
}

fn with_global_metadata(ws: &TestWorkspace) -> Config {
    let data = ws.data_dir();
    let key = DataFile::CogGlobalMetadata.config_key();
    Config::new().with(key, data.join(DataFile::CogGlobalMetadata.as_str()))
}

#[test]
fn summary_field_defaults_to_lineage() {
    let ws = TestWorkspace::new();

    let config = resolve_summary_field(with_global_metadata(&ws)).unwrap();

    assert_eq!(config.get_str(keys::SUMMARY_FIELD), Some("lineage"));
}

#[test]
fn summary_field_is_kept_apart_from_node_summary() {
    let ws = TestWorkspace::new();
    let config = with_global_metadata(&ws).with_source(keys::SUMMARY_FIELD, "country", Source::Cli);

    let config = resolve_node_summary(config).unwrap();
    let config = resolve_summary_field(config).unwrap();

    assert_eq!(config.get_str(keys::SUMMARY_FIELD), Some("country"));
    assert_eq!(config.get_str(keys::NODE_SUMMARY), Some("country"));
}

#[test]
fn summary_field_must_be_a_global_metadata_column() {
    let ws = TestWorkspace::new();
    // adm2 is a canonical header but the global metadata has no such column
    let config = with_global_metadata(&ws).with_source(keys::SUMMARY_FIELD, "adm2", Source::Cli);

    let err = resolve_summary_field(config).unwrap_err();

    assert!(matches!(err, Error::UnknownField { ref field, .. } if field == "adm2"));
}

#[test]
fn summary_field_takes_one_column() {
    let ws = TestWorkspace::new();
    let config =
        with_global_metadata(&ws).with_source(keys::SUMMARY_FIELD, "lineage,country", Source::Cli);

    let err = resolve_summary_field(config).unwrap_err();

    assert!(matches!(err, Error::InvalidSetting { .. }));
}
