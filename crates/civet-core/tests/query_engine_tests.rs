//! Metadata filtering against the fixture metadata table

use civet_core::Error;
use civet_core::query::{parse_filters, select_rows};
use civet_meta::MetadataFile;
use civet_test_utils::fixtures;
use civet_test_utils::workspace::TestWorkspace;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

fn metadata(ws: &TestWorkspace) -> MetadataFile {
    let path = ws.write("cog_metadata.csv", fixtures::COG_METADATA);
    MetadataFile::open(path).unwrap()
}

fn matching_ids(metadata: &MetadataFile, filters: &[&str]) -> Vec<String> {
    let predicates = parse_filters(filters, metadata).unwrap();
    select_rows(metadata, &predicates)
        .unwrap()
        .iter()
        .map(|row| row.get("central_sample_id").unwrap().to_string())
        .collect()
}

#[rstest]
#[case::country(&["country=UK"], 6)]
#[case::date_range(&["sample_date=2020-01-01:2020-03-01"], 5)]
#[case::country_and_dates(&["country=UK", "sample_date=2020-01-01:2020-03-01"], 4)]
#[case::comma_joined(&["country=UK,sample_date=2020-01-01:2020-03-01"], 4)]
#[case::lineage(&["lineage=B.1"], 4)]
#[case::region(&["adm1=UK-SCT"], 2)]
fn filters_select_expected_row_counts(#[case] filters: &[&str], #[case] expected: usize) {
    let ws = TestWorkspace::new();
    let metadata = metadata(&ws);

    assert_eq!(matching_ids(&metadata, filters).len(), expected);
}

#[test]
fn combined_filters_keep_file_order() {
    let ws = TestWorkspace::new();
    let metadata = metadata(&ws);

    assert_eq!(
        matching_ids(&metadata, &["country=UK", "sample_date=2020-01-01:2020-03-01"]),
        vec!["EDIN-1001", "EDIN-1002", "BIRM-2001", "NIRE-3001"]
    );
}

#[rstest]
#[case::inside("2020-02-15", true)]
#[case::start_bound("2020-01-01", true)]
#[case::end_bound("2020-03-01", true)]
#[case::after_end("2020-03-02", false)]
fn date_range_bounds_are_inclusive(#[case] date: &str, #[case] included: bool) {
    let ws = TestWorkspace::new();
    let path = ws.write("meta.csv", &format!("id,sample_date\nA,{date}\n"));
    let metadata = MetadataFile::open(path).unwrap();

    let predicates = parse_filters(&["sample_date=2020-01-01:2020-03-01"], &metadata).unwrap();
    let rows = select_rows(&metadata, &predicates).unwrap();

    assert_eq!(rows.len() == 1, included);
}

#[test]
fn unknown_column_lists_available_columns() {
    let ws = TestWorkspace::new();
    let metadata = metadata(&ws);

    let err = parse_filters(&["foo=bar"], &metadata).unwrap_err();

    match err {
        Error::UnknownColumn {
            column, available, ..
        } => {
            assert_eq!(column, "foo");
            assert_eq!(available, metadata.columns().to_vec());
        }
        other => panic!("expected UnknownColumn, got {other:?}"),
    }
}

#[test]
fn zero_matches_differs_from_no_filters() {
    let ws = TestWorkspace::new();
    let metadata = metadata(&ws);

    let predicates = parse_filters(&["country=Atlantis"], &metadata).unwrap();
    assert!(select_rows(&metadata, &predicates).unwrap().is_empty());

    let no_filters: Vec<&str> = Vec::new();
    let predicates = parse_filters(&no_filters, &metadata).unwrap();
    assert!(matches!(
        select_rows(&metadata, &predicates),
        Err(Error::NoFilters)
    ));
}

#[test]
fn unparseable_row_date_fails_with_row_number() {
    let ws = TestWorkspace::new();
    let path = ws.write(
        "meta.csv",
        "id,sample_date\nA,2020-01-02\nB,2020-01-03\nC,unknown\n",
    );
    let metadata = MetadataFile::open(path).unwrap();

    let predicates = parse_filters(&["sample_date=2020-01-01:2020-03-01"], &metadata).unwrap();
    let err = select_rows(&metadata, &predicates).unwrap_err();

    match err {
        Error::DateParse { column, value, row } => {
            assert_eq!(column, "sample_date");
            assert_eq!(value, "unknown");
            assert_eq!(row, 3);
        }
        other => panic!("expected DateParse, got {other:?}"),
    }
}

const FILTER_POOL: [&str; 6] = [
    "country=UK",
    "sample_date=2020-01-01:2020-03-01",
    "lineage=B.1",
    "adm1=UK-SCT",
    "uk_lineage=UK5",
    "epi_week=7",
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn filter_order_does_not_change_the_result(
        picked in proptest::sample::subsequence(FILTER_POOL.to_vec(), 1..=FILTER_POOL.len()),
        rotation in 0usize..6,
    ) {
        let ws = TestWorkspace::new();
        let metadata = metadata(&ws);

        let mut reordered = picked.clone();
        reordered.reverse();
        let shift = rotation % reordered.len();
        reordered.rotate_left(shift);

        prop_assert_eq!(
            matching_ids(&metadata, &picked),
            matching_ids(&metadata, &reordered)
        );
    }
}
