//! Report field validation
//!
//! Colour, label, date and summary fields all go through one routine,
//! [`FieldValidator::resolve`], parameterised by [`FieldKind`]. A field is
//! accepted when it is a column of the query file or one of the canonical
//! metadata headers.

use std::fmt;
use std::path::{Path, PathBuf};

use civet_fs::DataFile;
use civet_meta::{DEFAULT_PALETTE, MetadataFile, PaletteRegistry, is_canonical_header};

use crate::config::Config;
use crate::{Error, Result, keys};

/// Fallback for label and date fields when none are requested.
pub const NO_FIELDS: &str = "NONE";

/// The query file as seen by field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTable {
    path: PathBuf,
    columns: Vec<String>,
    ids: Vec<String>,
}

impl QueryTable {
    /// Read the resolved `query` file and check it has `input_column`.
    pub fn read(config: &Config) -> Result<Self> {
        let path = config
            .get_path(keys::QUERY)
            .ok_or_else(|| Error::setting(keys::QUERY, "query file has not been resolved"))?;
        let input_column = config.get_text(keys::INPUT_COLUMN).unwrap_or_default();
        Self::open(&path, &input_column)
    }

    pub fn open(path: &Path, input_column: &str) -> Result<Self> {
        let table = MetadataFile::open(path)?;
        if !table.has_column(input_column) {
            return Err(Error::MissingQueryColumn {
                column: input_column.to_string(),
                path: path.to_path_buf(),
            });
        }

        let mut ids = Vec::new();
        for row in table.rows()? {
            let row = row?;
            ids.push(row.get(input_column).unwrap_or_default().to_string());
        }

        tracing::debug!(path = %path.display(), queries = ids.len(), "Read query file");
        Ok(Self {
            path: path.to_path_buf(),
            columns: table.columns().to_vec(),
            ids,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Values of the input column, in file order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}

/// A field list the report accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Tree colouring, read from `fields` and stored as `tree_fields`.
    Colour,
    Label,
    Date,
    /// A single field collapsed tree nodes are summarised by.
    NodeSummary,
    /// A single global metadata field the report tabulates per query.
    Summary,
}

impl FieldKind {
    /// Key the user sets.
    pub fn source_key(&self) -> &'static str {
        match self {
            Self::Colour => keys::FIELDS,
            Self::Label => keys::LABEL_FIELDS,
            Self::Date => keys::DATE_FIELDS,
            Self::NodeSummary => keys::NODE_SUMMARY,
            Self::Summary => keys::SUMMARY_FIELD,
        }
    }

    /// Key the validated list is stored under.
    pub fn target_key(&self) -> &'static str {
        match self {
            Self::Colour => keys::TREE_FIELDS,
            other => other.source_key(),
        }
    }

    pub fn default_value(&self) -> &'static str {
        match self {
            Self::Colour => "adm1",
            Self::Label | Self::Date => NO_FIELDS,
            Self::NodeSummary => "country",
            Self::Summary => "lineage",
        }
    }

    /// Whether at most one field may be given.
    pub fn is_single(&self) -> bool {
        matches!(self, Self::NodeSummary | Self::Summary)
    }
}

/// Checks field names against a column set.
#[derive(Debug, Clone)]
pub struct FieldValidator {
    columns: Vec<String>,
    canonical: bool,
    searched: String,
}

impl FieldValidator {
    /// Accept the query table's columns and the canonical headers.
    pub fn for_query(table: &QueryTable) -> Self {
        Self {
            columns: table.columns().to_vec(),
            canonical: true,
            searched: format!(
                "query file {} or the canonical metadata headers",
                table.path().display()
            ),
        }
    }

    /// Accept only the columns of `metadata`.
    pub fn for_metadata(metadata: &MetadataFile) -> Self {
        Self {
            columns: metadata.columns().to_vec(),
            canonical: false,
            searched: format!("metadata file {}", metadata.path().display()),
        }
    }

    pub fn accepts(&self, field: &str) -> bool {
        self.columns.iter().any(|c| c == field) || (self.canonical && is_canonical_header(field))
    }

    /// Validate the `kind` fields in `config` and store them comma-joined.
    ///
    /// Text and list values are treated alike. When the field is unset the
    /// default is stored without validation.
    pub fn resolve(&self, config: Config, kind: FieldKind) -> Result<Config> {
        let requested = config
            .get_list(kind.source_key())
            .filter(|fields| fields.iter().any(|field| field != NO_FIELDS));

        let value = match requested {
            None => kind.default_value().to_string(),
            Some(fields) => {
                if kind.is_single() && fields.len() > 1 {
                    return Err(Error::setting(
                        kind.source_key(),
                        "only one summary field can be given",
                    ));
                }
                for field in &fields {
                    if !self.accepts(field) {
                        return Err(Error::UnknownField {
                            field: field.clone(),
                            searched: self.searched.clone(),
                        });
                    }
                }
                fields.join(",")
            }
        };

        tracing::debug!(key = kind.target_key(), %value, "Resolved fields");
        Ok(config.with(kind.target_key(), value))
    }
}

/// A query column and the colour scheme it is displayed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTrait {
    pub field: String,
    pub palette: String,
}

impl fmt::Display for DisplayTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.palette)
    }
}

/// Parse `field[=palette][,field2[=palette2]...]`.
///
/// `:` is accepted in place of `=`. A field without a palette uses the
/// default scheme. Fields must be query columns and palettes must be known.
pub fn parse_display<S: AsRef<str>>(
    items: &[S],
    table: &QueryTable,
    palettes: &PaletteRegistry,
) -> Result<Vec<DisplayTrait>> {
    items
        .iter()
        .flat_map(|item| item.as_ref().split(','))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            let (field, palette) = match item.split_once(['=', ':']) {
                Some((field, palette)) if !palette.trim().is_empty() => (field.trim(), palette.trim()),
                Some((field, _)) => (field.trim(), DEFAULT_PALETTE),
                None => (item, DEFAULT_PALETTE),
            };

            if !table.has_column(field) {
                return Err(Error::UnknownField {
                    field: field.to_string(),
                    searched: format!("query file {}", table.path().display()),
                });
            }
            if !palettes.is_known(palette) {
                return Err(Error::UnknownPalette {
                    palette: palette.to_string(),
                    valid: palettes.list_known().into_iter().map(str::to_string).collect(),
                });
            }

            Ok(DisplayTrait {
                field: field.to_string(),
                palette: palette.to_string(),
            })
        })
        .collect()
}

/// Resolve `display` into `graphic_dict`.
///
/// Without a display setting the tree is coloured by `adm1` with the
/// default scheme.
pub fn resolve_display(config: Config, table: &QueryTable, palettes: &PaletteRegistry) -> Result<Config> {
    let items = config.get_list(keys::DISPLAY).unwrap_or_default();

    let graphic_dict = if items.is_empty() {
        format!("adm1:{DEFAULT_PALETTE}")
    } else {
        parse_display(&items, table, palettes)?
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    };

    tracing::debug!(%graphic_dict, "Resolved display");
    Ok(config.with(keys::GRAPHIC_DICT, graphic_dict))
}

/// Validate colour, label and date fields and the display setting against
/// the query table.
pub fn resolve_fields(config: Config, table: &QueryTable, palettes: &PaletteRegistry) -> Result<Config> {
    let validator = FieldValidator::for_query(table);
    let config = validator.resolve(config, FieldKind::Colour)?;
    let config = validator.resolve(config, FieldKind::Label)?;
    let config = validator.resolve(config, FieldKind::Date)?;
    resolve_display(config, table, palettes)
}

/// Validate `node_summary` against the global reference metadata.
pub fn resolve_node_summary(config: Config) -> Result<Config> {
    resolve_global_field(config, FieldKind::NodeSummary)
}

/// Validate `summary_field` against the global reference metadata.
pub fn resolve_summary_field(config: Config) -> Result<Config> {
    resolve_global_field(config, FieldKind::Summary)
}

fn resolve_global_field(config: Config, kind: FieldKind) -> Result<Config> {
    let key = DataFile::CogGlobalMetadata.config_key();
    let path = config
        .get_path(key)
        .ok_or_else(|| Error::setting(key, "global metadata has not been resolved"))?;
    let metadata = MetadataFile::open(path)?;

    FieldValidator::for_metadata(&metadata).resolve(config, kind)
}
