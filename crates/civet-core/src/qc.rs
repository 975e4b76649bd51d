//! Query sequence QC
//!
//! When a query fasta is given, sequences shorter than `min_length` or with
//! an N proportion above `max_ambiguity` are set aside before any report
//! stage reads them. Passing records are copied to `post_qc_query` and the
//! failures are listed in `qc_fail`.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use civet_fs::io::write_atomic;
use civet_meta::write_records;
use noodles::fasta;

use crate::config::{Config, ConfigValue};
use crate::{Error, Result, keys};

/// Passing query records, written to the output directory.
pub const POST_QC_FILE: &str = "query.post_qc.fasta";

/// Failed query records and why they failed.
pub const QC_FAIL_FILE: &str = "query.failed_qc.csv";

pub const DEFAULT_MIN_LENGTH: i64 = 10_000;
pub const DEFAULT_MAX_AMBIGUITY: f64 = 0.5;

/// Why a query sequence was set aside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QcReason {
    /// Sequence length in bases.
    TooShort(usize),
    /// Proportion of `N` bases, rounded to two decimals.
    TooAmbiguous(f64),
}

impl fmt::Display for QcReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort(len) => write!(f, "seq_len:{len}"),
            Self::TooAmbiguous(prop) => write!(f, "N_content:{prop}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QcFailure {
    pub name: String,
    pub reason: QcReason,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QcThresholds {
    pub min_length: usize,
    pub max_ambiguity: f64,
}

impl Default for QcThresholds {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH as usize,
            max_ambiguity: DEFAULT_MAX_AMBIGUITY,
        }
    }
}

impl QcThresholds {
    /// Read `min_length` and `max_ambiguity`, falling back to the defaults
    /// when unset.
    pub fn from_config(config: &Config) -> Result<Self> {
        let defaults = Self::default();

        let min_length = match config.get(keys::MIN_LENGTH) {
            None => defaults.min_length,
            Some(value) => value
                .as_integer()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| invalid(keys::MIN_LENGTH, value, "a non-negative whole number"))?,
        };

        let max_ambiguity = match config.get(keys::MAX_AMBIGUITY) {
            None => defaults.max_ambiguity,
            Some(value) => value
                .as_float()
                .filter(|x| (0.0..=1.0).contains(x))
                .ok_or_else(|| invalid(keys::MAX_AMBIGUITY, value, "a proportion between 0 and 1"))?,
        };

        Ok(Self {
            min_length,
            max_ambiguity,
        })
    }

    /// Check one sequence, returning why it fails if it does.
    ///
    /// An empty sequence is always too short.
    pub fn check(&self, sequence: &[u8]) -> Option<QcReason> {
        let len = sequence.len();
        if len == 0 || len < self.min_length {
            return Some(QcReason::TooShort(len));
        }

        let n_count = sequence.iter().filter(|base| base.eq_ignore_ascii_case(&b'N')).count();
        let prop = (n_count as f64 / len as f64 * 100.0).round() / 100.0;
        (prop > self.max_ambiguity).then_some(QcReason::TooAmbiguous(prop))
    }
}

fn invalid(key: &str, value: &ConfigValue, expected: &str) -> Error {
    Error::setting(key, format!("expected {expected}, got `{value}`"))
}

/// Run QC over the resolved `fasta` and store `post_qc_query` and `qc_fail`.
///
/// Without a query fasta both keys are empty strings and nothing is written.
pub fn resolve_query_qc(config: Config) -> Result<(Config, Vec<QcFailure>)> {
    let thresholds = QcThresholds::from_config(&config)?;
    let Some(fasta) = config.get_path(keys::FASTA) else {
        let config = config.with(keys::POST_QC_QUERY, "").with(keys::QC_FAIL, "");
        return Ok((config, Vec::new()));
    };
    let outdir = config
        .get_path(keys::OUTDIR)
        .ok_or_else(|| Error::setting(keys::OUTDIR, "output directory has not been resolved"))?;

    let (passed, failures) = filter_fasta(&fasta, &thresholds)?;

    let post_qc = outdir.join(POST_QC_FILE);
    write_atomic(&post_qc, &passed)?;

    let qc_fail = outdir.join(QC_FAIL_FILE);
    let header = ["name".to_string(), "reason_for_failure".to_string()];
    write_records(
        &qc_fail,
        &header,
        failures
            .iter()
            .map(|failure| [failure.name.clone(), format!("fail={}", failure.reason)]),
    )?;

    tracing::info!(
        fasta = %fasta.display(),
        failed = failures.len(),
        "Checked query sequences"
    );
    let config = config.with(keys::POST_QC_QUERY, post_qc).with(keys::QC_FAIL, qc_fail);
    Ok((config, failures))
}

/// Split `fasta` into the fasta text of passing records and the failures.
fn filter_fasta(fasta: &Path, thresholds: &QcThresholds) -> Result<(Vec<u8>, Vec<QcFailure>)> {
    let read_error = |source| Error::FastaRead {
        path: PathBuf::from(fasta),
        source,
    };
    let file = File::open(fasta).map_err(read_error)?;
    let mut reader = fasta::Reader::new(BufReader::new(file));

    let mut passed = Vec::new();
    let mut failures = Vec::new();
    {
        let mut writer = fasta::Writer::new(&mut passed);
        for record in reader.records() {
            let record = record.map_err(read_error)?;
            let name = String::from_utf8_lossy(record.name().as_ref()).into_owned();

            match thresholds.check(record.sequence().as_ref()) {
                Some(reason) => {
                    tracing::info!(%name, %reason, "Query sequence failed QC");
                    failures.push(QcFailure { name, reason });
                }
                None => writer.write_record(&record).map_err(read_error)?,
            }
        }
    }
    Ok((passed, failures))
}
