//! The canonical epidemiological header set.

/// Fields always accepted for display and labelling, whether or not the
/// query file carries them. They are the columns of the background metadata.
pub const CANONICAL_HEADERS: [&str; 21] = [
    "central_sample_id",
    "biosample_source_id",
    "sequence_name",
    "secondary_identifier",
    "sample_date",
    "epi_week",
    "country",
    "adm1",
    "adm2",
    "outer_postcode",
    "is_surveillance",
    "is_community",
    "is_hcw",
    "is_travel_history",
    "travel_history",
    "lineage",
    "lineage_support",
    "uk_lineage",
    "acc_lineage",
    "del_lineage",
    "phylotype",
];

pub fn is_canonical_header(field: &str) -> bool {
    CANONICAL_HEADERS.contains(&field)
}
