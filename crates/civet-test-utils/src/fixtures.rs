//! Metadata fixtures shared across the workspace.
//!
//! The tables live in `test-fixtures/metadata/` and are compiled in, so
//! tests can write them anywhere without knowing the workspace root.

/// Background UK metadata: 8 rows, 6 from `UK` and 2 from `Ireland`.
///
/// `sample_date` values in `2020-01-01:2020-03-01` (inclusive) cover 5 rows:
/// `EDIN-1001`, `EDIN-1002`, `BIRM-2001`, `NIRE-3001` and `IRL-4001`.
pub const COG_METADATA: &str = include_str!("../../../test-fixtures/metadata/cog_metadata.csv");

/// Background global metadata; has `lineage` but no `adm2` column.
pub const COG_GLOBAL_METADATA: &str =
    include_str!("../../../test-fixtures/metadata/cog_global_metadata.csv");

/// A user query keyed by `name` with `adm2`, `outer_postcode` and
/// `travel_history` columns.
pub const QUERY: &str = include_str!("../../../test-fixtures/metadata/query.csv");

/// A config file pointing at `query.csv` next to it.
pub const CONFIG: &str = include_str!("../../../test-fixtures/configs/civet.yaml");

/// `central_sample_id` of every row in [`COG_METADATA`], in file order.
pub const COG_METADATA_IDS: [&str; 8] = [
    "EDIN-1001",
    "EDIN-1002",
    "BIRM-2001",
    "BIRM-2002",
    "NIRE-3001",
    "IRL-4001",
    "IRL-4002",
    "LOND-5001",
];
