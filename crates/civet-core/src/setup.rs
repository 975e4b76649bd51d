//! Run orchestration
//!
//! [`Setup::run`] takes parsed arguments and walks every resolution stage in
//! order. Each stage receives the configuration built so far and returns an
//! updated one; the first failure stops the run.

use std::path::{Path, PathBuf};

use civet_meta::{PaletteRegistry, SequencingCentreRegistry};

use crate::config::{Config, ConfigLayer, ConfigResolver, Source};
use crate::data::{DataResolver, DataTransfer, RsyncTransfer};
use crate::dump::write_config_dump;
use crate::fields::{QueryTable, resolve_fields, resolve_node_summary, resolve_summary_field};
use crate::options::{resolve_distance, resolve_local_lineages, resolve_mapping, resolve_sequencing_centre};
use crate::paths::{resolve_outdir, resolve_tempdir};
use crate::qc::{QcFailure, resolve_query_qc};
use crate::query::{QueryInput, QueryOrigin, resolve_fasta, resolve_query};
use crate::trees::resolve_tree_name_stem;
use crate::{Result, keys};

/// Everything the binary parsed from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    /// Directory relative paths are resolved against.
    pub cwd: PathBuf,
    /// Positional input: IDs, a query CSV or a config file.
    pub input: Option<String>,
    /// Read `input` as IDs even without a `,`.
    pub id_string: bool,
    /// Options given on the command line.
    pub cli: ConfigLayer,
}

/// What the resolved query turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub origin: QueryOrigin,
    /// Input column values of the query file.
    pub query_ids: Vec<String>,
    /// Query fasta records set aside by QC.
    pub qc_failures: Vec<QcFailure>,
}

/// How a run ended.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// Only the configuration was requested; it was written here.
    ConfigWritten(PathBuf),
    /// Every stage resolved.
    Resolved { config: Config, summary: RunSummary },
}

/// Resolves a complete run configuration.
pub struct Setup<'a> {
    transfer: &'a dyn DataTransfer,
    climb_root: Option<PathBuf>,
    palettes: PaletteRegistry,
    centres: SequencingCentreRegistry,
}

impl Default for Setup<'static> {
    fn default() -> Self {
        Self::new(&RsyncTransfer)
    }
}

impl<'a> Setup<'a> {
    pub fn new(transfer: &'a dyn DataTransfer) -> Self {
        Self {
            transfer,
            climb_root: None,
            palettes: PaletteRegistry::with_builtins(),
            centres: SequencingCentreRegistry::with_builtins(),
        }
    }

    /// Use `root` in place of the CLIMB cluster data path.
    #[must_use]
    pub fn with_climb_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.climb_root = Some(root.into());
        self
    }

    pub fn run(&self, request: RunRequest) -> Result<RunOutcome> {
        let RunRequest {
            cwd,
            input,
            id_string,
            mut cli,
        } = request;

        let input = input
            .as_deref()
            .map(|input| QueryInput::classify(input, id_string, &cwd))
            .transpose()?;
        tracing::debug!(?input, "Classified input");

        if let Some(QueryInput::QueryFile(path)) = &input {
            cli.set(keys::QUERY, path.as_path());
        }
        let resolver = match &input {
            Some(QueryInput::ConfigFile(path)) => ConfigResolver::new(cli).load_file(path)?,
            _ => ConfigResolver::new(cli),
        };
        let config = resolver.resolve();

        let config = resolve_outdir(config, &cwd)?;
        let config = self.record_query_location(config, input, &cwd);
        let config = resolve_tempdir(config, &cwd)?;
        let config = self.resolve_data(config, &cwd)?;

        let (config, origin) = resolve_query(config, &cwd)?;
        let config = resolve_fasta(config, &cwd)?;
        let (config, qc_failures) = resolve_query_qc(config)?;

        let table = QueryTable::read(&config)?;
        let config = resolve_fields(config, &table, &self.palettes)?;
        let config = resolve_node_summary(config)?;
        let config = resolve_summary_field(config)?;
        let config = resolve_mapping(config, &table)?;
        let config = resolve_local_lineages(config, &table)?;
        let config = resolve_sequencing_centre(config, &self.centres)?;
        let config = resolve_distance(config)?;
        let config = match config.get_path(keys::TREE_DIR) {
            Some(dir) => resolve_tree_name_stem(config, &cwd.join(dir))?,
            None => config,
        };

        if config.flag(keys::GENERATE_CONFIG) {
            let path = write_config_dump(&config)?;
            return Ok(RunOutcome::ConfigWritten(path));
        }

        let summary = RunSummary {
            origin,
            query_ids: table.ids().to_vec(),
            qc_failures,
        };
        Ok(RunOutcome::Resolved { config, summary })
    }

    /// Store `path_to_query` and turn inline IDs into the `ids` setting.
    fn record_query_location(&self, config: Config, input: Option<QueryInput>, cwd: &Path) -> Config {
        let outdir = config.get_path(keys::OUTDIR).unwrap_or_else(|| cwd.to_path_buf());
        match input {
            Some(QueryInput::Ids(ids)) => config
                .with(keys::PATH_TO_QUERY, outdir)
                .with_source(keys::IDS, ids, Source::Cli),
            Some(input) => config.with(keys::PATH_TO_QUERY, input.path_to_query(&outdir)),
            None => config.with(keys::PATH_TO_QUERY, cwd),
        }
    }

    fn resolve_data(&self, config: Config, cwd: &Path) -> Result<Config> {
        let resolver = DataResolver::new(cwd, self.transfer);
        let resolver = match &self.climb_root {
            Some(root) => resolver.with_climb_root(root),
            None => resolver,
        };
        resolver.resolve(config)
    }
}
