//! Report options: mapping, local lineages, sequencing centre and
//! extraction distance.

use std::path::Path;

use civet_meta::SequencingCentreRegistry;

use crate::config::{Config, ConfigValue};
use crate::fields::QueryTable;
use crate::{Error, Result, keys};

/// Coordinate system implied by an outer postcode column.
pub const POSTCODE_CRS: &str = "EPSG:4326";

/// Resolve the mapping settings.
///
/// When `map_sequences` is off, `map_cols`, `input_crs` and `mapping_trait`
/// are stored as `false`. When on, `map_inputs` names either two coordinate
/// columns (x,y), which need `input_crs`, or one outer postcode column.
pub fn resolve_mapping(config: Config, table: &QueryTable) -> Result<Config> {
    if !config.flag(keys::MAP_SEQUENCES) {
        return Ok(config
            .with(keys::MAP_SEQUENCES, false)
            .with(keys::MAP_COLS, false)
            .with(keys::INPUT_CRS, false)
            .with(keys::MAPPING_TRAIT, false));
    }

    let map_inputs = config.get_list(keys::MAP_INPUTS).unwrap_or_default();
    let crs = match map_inputs.len() {
        0 => {
            return Err(Error::InvalidMapping {
                message: "coordinates or outer postcode not supplied for mapping sequences. \
                          Provide either x and y columns as a comma separated string, \
                          or the column header containing outer postcode"
                    .to_string(),
            });
        }
        1 => POSTCODE_CRS.to_string(),
        2 => config
            .get_text(keys::INPUT_CRS)
            .filter(|crs| !crs.is_empty() && crs != "false")
            .ok_or_else(|| Error::InvalidMapping {
                message: "input coordinate system not provided for mapping. \
                          Provide --input-crs e.g. EPSG:3395"
                    .to_string(),
            })?,
        n => {
            return Err(Error::InvalidMapping {
                message: format!("expected one postcode column or two coordinate columns, got {n}"),
            });
        }
    };

    let mapping_trait = config
        .get_text(keys::MAPPING_TRAIT)
        .filter(|t| !t.is_empty() && t != "false");

    for column in map_inputs.iter().chain(mapping_trait.iter()) {
        if !table.has_column(column) {
            return Err(Error::UnknownField {
                field: column.clone(),
                searched: format!("query file {}", table.path().display()),
            });
        }
    }

    tracing::debug!(map_cols = %map_inputs.join(","), %crs, "Resolved mapping");
    Ok(config
        .with(keys::MAP_COLS, map_inputs.join(","))
        .with(keys::INPUT_CRS, crs)
        .with(
            keys::MAPPING_TRAIT,
            mapping_trait.map_or(ConfigValue::Bool(false), ConfigValue::Text),
        ))
}

/// Resolve `local_lineages`; the query must carry an `adm2` column.
pub fn resolve_local_lineages(config: Config, table: &QueryTable) -> Result<Config> {
    let enabled = config.flag(keys::LOCAL_LINEAGES);
    if enabled && !table.has_column("adm2") {
        return Err(Error::setting(
            keys::LOCAL_LINEAGES,
            "--local-lineages argument called, but the query file doesn't have an adm2 column. \
             Please provide one to run local lineage analysis",
        ));
    }
    Ok(config.with(keys::LOCAL_LINEAGES, enabled))
}

/// Resolve the sequencing centre whose header image tops the report.
///
/// Stores `sequencing_centre_dest` under the output directory and
/// `sequencing_centre_file` relative to it.
pub fn resolve_sequencing_centre(config: Config, centres: &SequencingCentreRegistry) -> Result<Config> {
    let centre = config
        .get_text(keys::SEQUENCING_CENTRE)
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| SequencingCentreRegistry::DEFAULT.to_string());

    if !centres.is_known(&centre) {
        return Err(Error::UnknownSequencingCentre {
            centre,
            valid: centres.list_known().into_iter().map(str::to_string).collect(),
        });
    }

    let image = format!("{centre}.png");
    let outdir = config.get_path(keys::OUTDIR).unwrap_or_default();
    let dest = outdir.join("figures").join(&image);
    let file = Path::new(".").join("figures").join(&image);

    tracing::debug!(%centre, "Using sequencing centre header");
    Ok(config
        .with(keys::SEQUENCING_CENTRE, centre)
        .with(keys::SEQUENCING_CENTRE_DEST, dest)
        .with(keys::SEQUENCING_CENTRE_FILE, file))
}

/// Resolve the extraction radius.
///
/// `distance` sets both directions. An explicit `up_distance` or
/// `down_distance` overrides it for that direction.
pub fn resolve_distance(config: Config) -> Result<Config> {
    let distance = integer(&config, keys::DISTANCE)?;
    let up = direction(&config, keys::UP_DISTANCE, distance)?;
    let down = direction(&config, keys::DOWN_DISTANCE, distance)?;

    tracing::debug!(up, down, "Extraction radius");
    Ok(config
        .with(keys::UP_DISTANCE, up)
        .with(keys::DOWN_DISTANCE, down))
}

fn direction(config: &Config, key: &str, distance: Option<i64>) -> Result<i64> {
    let explicit = config.source(key).is_some_and(|source| source.is_explicit());
    let value = match (explicit, distance) {
        (false, Some(distance)) => Some(distance),
        _ => integer(config, key)?,
    };
    Ok(value.unwrap_or(2))
}

fn integer(config: &Config, key: &str) -> Result<Option<i64>> {
    let Some(value) = config.get(key) else {
        return Ok(None);
    };
    let n = value
        .as_integer()
        .ok_or_else(|| Error::setting(key, format!("expected a whole number, got `{value}`")))?;
    if n < 0 {
        return Err(Error::setting(key, format!("must not be negative, got {n}")));
    }
    Ok(Some(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Source;

    #[test]
    fn distance_sets_both_directions() {
        let config = Config::new()
            .with_source(keys::DISTANCE, 4_i64, Source::Cli)
            .with_source(keys::UP_DISTANCE, 2_i64, Source::Default)
            .with_source(keys::DOWN_DISTANCE, 2_i64, Source::Default);

        let config = resolve_distance(config).unwrap();
        assert_eq!(config.get_integer(keys::UP_DISTANCE), Some(4));
        assert_eq!(config.get_integer(keys::DOWN_DISTANCE), Some(4));
    }

    #[test]
    fn explicit_direction_beats_distance() {
        let config = Config::new()
            .with_source(keys::DISTANCE, 4_i64, Source::Cli)
            .with_source(keys::UP_DISTANCE, 1_i64, Source::File)
            .with_source(keys::DOWN_DISTANCE, 2_i64, Source::Default);

        let config = resolve_distance(config).unwrap();
        assert_eq!(config.get_integer(keys::UP_DISTANCE), Some(1));
        assert_eq!(config.get_integer(keys::DOWN_DISTANCE), Some(4));
    }

    #[test]
    fn negative_distance_is_rejected() {
        let config = Config::new().with_source(keys::DISTANCE, -1_i64, Source::Cli);
        assert!(matches!(
            resolve_distance(config),
            Err(Error::InvalidSetting { .. })
        ));
    }

    #[test]
    fn unknown_sequencing_centre_lists_valid_codes() {
        let config = Config::new().with_source(keys::SEQUENCING_CENTRE, "MARS", Source::Cli);
        let err = resolve_sequencing_centre(config, &SequencingCentreRegistry::with_builtins())
            .unwrap_err();

        assert!(matches!(err, Error::UnknownSequencingCentre { ref valid, .. } if valid.contains(&"EDIN".to_string())));
    }

    #[test]
    fn sequencing_centre_paths() {
        let config = Config::new()
            .with(keys::OUTDIR, "/runs/out")
            .with_source(keys::SEQUENCING_CENTRE, "EDIN", Source::File);

        let config =
            resolve_sequencing_centre(config, &SequencingCentreRegistry::with_builtins()).unwrap();

        assert_eq!(
            config.get_str(keys::SEQUENCING_CENTRE_DEST),
            Some("/runs/out/figures/EDIN.png")
        );
        assert_eq!(
            config.get_str(keys::SEQUENCING_CENTRE_FILE),
            Some("./figures/EDIN.png")
        );
    }
}
