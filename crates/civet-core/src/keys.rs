//! Configuration keys.
//!
//! Keys are snake_case. Config files may spell them with hyphens; those are
//! normalised on load. Downstream stages read resolved values under these
//! names.

// Inputs
pub const QUERY: &str = "query";
pub const IDS: &str = "ids";
pub const FROM_METADATA: &str = "from_metadata";
pub const FASTA: &str = "fasta";
pub const PATH_TO_QUERY: &str = "path_to_query";
pub const INPUT_COLUMN: &str = "input_column";
pub const DATA_COLUMN: &str = "data_column";

// Query sequence QC
pub const MIN_LENGTH: &str = "min_length";
pub const MAX_AMBIGUITY: &str = "max_ambiguity";
pub const POST_QC_QUERY: &str = "post_qc_query";
pub const QC_FAIL: &str = "qc_fail";

// Directories
pub const OUTDIR: &str = "outdir";
pub const REL_OUTDIR: &str = "rel_outdir";
pub const TEMPDIR: &str = "tempdir";
pub const NO_TEMP: &str = "no_temp";

// Reference data
pub const DATADIR: &str = "datadir";
pub const CLIMB: &str = "climb";
pub const REMOTE: &str = "remote";
pub const USERNAME: &str = "username";

// Report fields
pub const FIELDS: &str = "fields";
pub const TREE_FIELDS: &str = "tree_fields";
pub const LABEL_FIELDS: &str = "label_fields";
pub const DATE_FIELDS: &str = "date_fields";
pub const NODE_SUMMARY: &str = "node_summary";
pub const SUMMARY_FIELD: &str = "summary_field";
pub const DISPLAY: &str = "display";
pub const GRAPHIC_DICT: &str = "graphic_dict";

// Report options
pub const MAP_SEQUENCES: &str = "map_sequences";
pub const MAP_INPUTS: &str = "map_inputs";
pub const MAP_COLS: &str = "map_cols";
pub const INPUT_CRS: &str = "input_crs";
pub const MAPPING_TRAIT: &str = "mapping_trait";
pub const LOCAL_LINEAGES: &str = "local_lineages";
pub const SEQUENCING_CENTRE: &str = "sequencing_centre";
pub const SEQUENCING_CENTRE_DEST: &str = "sequencing_centre_dest";
pub const SEQUENCING_CENTRE_FILE: &str = "sequencing_centre_file";
pub const DISTANCE: &str = "distance";
pub const UP_DISTANCE: &str = "up_distance";
pub const DOWN_DISTANCE: &str = "down_distance";
pub const TREE_DIR: &str = "tree_dir";
pub const TREE_NAME_STEM: &str = "tree_name_stem";

// Run control
pub const GENERATE_CONFIG: &str = "generate_config";
