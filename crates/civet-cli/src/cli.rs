//! CLI argument parsing using clap derive

use std::path::PathBuf;

use civet_core::{ConfigLayer, RunRequest, keys};
use clap::Parser;

/// civet - Cluster Investigation & Virus Epidemiology Tool
///
/// Resolves a report configuration from a query, a config file and the COG-UK
/// reference data, then hands it to the report pipeline.
///
/// Examples:
///   civet query.csv -d data              # Query csv, local data
///   civet EDIN-1001,BIRM-2002 -d data    # Inline IDs
///   civet civet.yaml                     # Everything from a config file
///   civet --from-metadata country=UK sample_date=2020-03-01:2020-04-01 -d data
#[derive(Parser, Debug)]
#[command(name = "civet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Query csv, config file (.yaml/.yml) or comma-separated IDs
    pub input: Option<String>,

    /// Read the input as IDs even without a comma
    #[arg(long)]
    pub id_string: bool,

    /// Build the query from metadata filters (column=value or column=start:end)
    #[arg(long = "from-metadata", num_args = 1..)]
    pub from_metadata: Vec<String>,

    /// Optional fasta of query sequences
    #[arg(long)]
    pub fasta: Option<PathBuf>,

    /// Shortest query sequence kept by QC [default: 10000]
    #[arg(long)]
    pub min_length: Option<i64>,

    /// Largest proportion of N bases kept by QC [default: 0.5]
    #[arg(long)]
    pub max_ambiguity: Option<f64>,

    /// Query column holding the sequence IDs [default: name]
    #[arg(long)]
    pub input_column: Option<String>,

    /// Metadata column the query IDs are matched against [default: central_sample_id]
    #[arg(long)]
    pub data_column: Option<String>,

    /// Output directory [default: timestamped directory in cwd]
    #[arg(short, long)]
    pub outdir: Option<PathBuf>,

    /// Parent directory for intermediate files
    #[arg(long)]
    pub tempdir: Option<PathBuf>,

    /// Write intermediate files to the output directory
    #[arg(long)]
    pub no_temp: bool,

    /// Local directory holding the COG-UK reference data
    #[arg(short, long)]
    pub datadir: Option<PathBuf>,

    /// Read the reference data from its path on the CLIMB cluster
    #[arg(long = "CLIMB")]
    pub climb: bool,

    /// Sync the reference data from CLIMB before running
    #[arg(short, long = "remote-sync")]
    pub remote_sync: bool,

    /// CLIMB username for remote sync
    #[arg(long = "your-user-name", visible_alias = "uun", env = "CIVET_USERNAME")]
    pub username: Option<String>,

    /// Comma-separated query columns to colour tree tips by [default: adm1]
    #[arg(short, long)]
    pub fields: Option<String>,

    /// Comma-separated query columns to label tree tips with
    #[arg(long)]
    pub label_fields: Option<String>,

    /// Comma-separated query columns holding dates
    #[arg(long)]
    pub date_fields: Option<String>,

    /// Comma-separated colour palettes per field, as field=palette
    #[arg(long)]
    pub display: Option<String>,

    /// Global metadata column summarising collapsed nodes [default: country]
    #[arg(long)]
    pub node_summary: Option<String>,

    /// Global metadata column the report summarises queries by [default: lineage]
    #[arg(long)]
    pub summary_field: Option<String>,

    /// Map the query sequences
    #[arg(long)]
    pub map_sequences: bool,

    /// Query columns holding x,y coordinates or an outer postcode
    #[arg(long)]
    pub map_inputs: Option<String>,

    /// Coordinate reference system of x,y map inputs
    #[arg(long)]
    pub input_crs: Option<String>,

    /// Query column to colour mapped sequences by
    #[arg(long)]
    pub mapping_trait: Option<String>,

    /// Contextualise query lineages in their local area
    #[arg(long)]
    pub local_lineages: bool,

    /// Sequencing centre logo for the report header [default: DEFAULT]
    #[arg(long)]
    pub sequencing_centre: Option<String>,

    /// Extraction radius up and down the tree
    #[arg(long)]
    pub distance: Option<i64>,

    /// Extraction radius up the tree [default: 2]
    #[arg(long)]
    pub up_distance: Option<i64>,

    /// Extraction radius down the tree [default: 2]
    #[arg(long)]
    pub down_distance: Option<i64>,

    /// Directory of <stem>_<n>.tree files to take the tree name stem from
    #[arg(long)]
    pub tree_dir: Option<PathBuf>,

    /// Write the resolved configuration to the output directory and stop
    #[arg(long)]
    pub generate_config: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Options given on the command line as a configuration layer.
    ///
    /// Flags are only recorded when set, so a config file can still turn them on.
    pub fn config_layer(&self) -> ConfigLayer {
        let mut layer = ConfigLayer::new();

        if !self.from_metadata.is_empty() {
            layer.set(keys::FROM_METADATA, self.from_metadata.clone());
        }
        layer.set_opt(keys::FASTA, self.fasta.as_deref());
        layer.set_opt(keys::MIN_LENGTH, self.min_length);
        layer.set_opt(keys::MAX_AMBIGUITY, self.max_ambiguity);
        layer.set_opt(keys::INPUT_COLUMN, self.input_column.as_deref());
        layer.set_opt(keys::DATA_COLUMN, self.data_column.as_deref());
        layer.set_opt(keys::OUTDIR, self.outdir.as_deref());
        layer.set_opt(keys::TEMPDIR, self.tempdir.as_deref());
        layer.set_opt(keys::DATADIR, self.datadir.as_deref());
        layer.set_opt(keys::USERNAME, self.username.as_deref());
        layer.set_opt(keys::FIELDS, self.fields.as_deref());
        layer.set_opt(keys::LABEL_FIELDS, self.label_fields.as_deref());
        layer.set_opt(keys::DATE_FIELDS, self.date_fields.as_deref());
        layer.set_opt(keys::NODE_SUMMARY, self.node_summary.as_deref());
        layer.set_opt(keys::SUMMARY_FIELD, self.summary_field.as_deref());
        layer.set_opt(keys::DISPLAY, self.display.as_deref());
        layer.set_opt(keys::MAP_INPUTS, self.map_inputs.as_deref());
        layer.set_opt(keys::INPUT_CRS, self.input_crs.as_deref());
        layer.set_opt(keys::MAPPING_TRAIT, self.mapping_trait.as_deref());
        layer.set_opt(keys::SEQUENCING_CENTRE, self.sequencing_centre.as_deref());
        layer.set_opt(keys::DISTANCE, self.distance);
        layer.set_opt(keys::UP_DISTANCE, self.up_distance);
        layer.set_opt(keys::DOWN_DISTANCE, self.down_distance);
        layer.set_opt(keys::TREE_DIR, self.tree_dir.as_deref());

        for (key, on) in [
            (keys::NO_TEMP, self.no_temp),
            (keys::CLIMB, self.climb),
            (keys::REMOTE, self.remote_sync),
            (keys::MAP_SEQUENCES, self.map_sequences),
            (keys::LOCAL_LINEAGES, self.local_lineages),
            (keys::GENERATE_CONFIG, self.generate_config),
        ] {
            if on {
                layer.set(key, true);
            }
        }
        layer
    }

    pub fn into_request(self, cwd: PathBuf) -> RunRequest {
        RunRequest {
            cli: self.config_layer(),
            cwd,
            input: self.input,
            id_string: self.id_string,
        }
    }
}
