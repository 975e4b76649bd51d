//! The resolved configuration
//!
//! [`Config`] is an immutable map from key to [`ConfigValue`]. Every change
//! goes through a consuming builder method that returns the updated value,
//! so a resolution step can only affect the configuration it hands back.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::layer::ConfigLayer;

/// A single configuration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl ConfigValue {
    /// Interpret as a list: lists as-is, text split on `,`.
    ///
    /// Blank entries are dropped, so `"a,,b"` and `["a", "b"]` agree.
    pub fn to_list(&self) -> Vec<String> {
        let items: Vec<String> = match self {
            Self::List(items) => items.clone(),
            Self::Text(text) => text.split(',').map(str::to_string).collect(),
            other => vec![other.to_string()],
        };
        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(text) => match text.to_ascii_lowercase().as_str() {
                "true" | "yes" => Some(true),
                "false" | "no" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Text(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    /// Floats, integers and numeric text.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            Self::Integer(n) => Some(*n as f64),
            Self::Text(text) => text.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(text) => f.write_str(text),
            Self::List(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<&Path> for ConfigValue {
    fn from(value: &Path) -> Self {
        Self::Text(value.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for ConfigValue {
    fn from(value: PathBuf) -> Self {
        Self::from(value.as_path())
    }
}

/// Where a configuration value came from.
///
/// Ordered by precedence: a `Cli` value outranks a `File` value, which
/// outranks a `Default`. `Resolved` marks values written by a resolution
/// step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Source {
    Cli,
    File,
    Default,
    Resolved,
}

impl Source {
    /// Whether the user asked for this value, on the command line or in a file.
    pub fn is_explicit(&self) -> bool {
        matches!(self, Self::Cli | Self::File)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    value: ConfigValue,
    source: Source,
}

/// Immutable run configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    entries: BTreeMap<String, Entry>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any previous value. The entry is marked
    /// [`Source::Resolved`].
    #[must_use]
    pub fn with(self, key: &str, value: impl Into<ConfigValue>) -> Self {
        self.with_source(key, value, Source::Resolved)
    }

    #[must_use]
    pub fn with_source(mut self, key: &str, value: impl Into<ConfigValue>, source: Source) -> Self {
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.into(),
                source,
            },
        );
        self
    }

    /// Copy every key of `layer` that is not set yet.
    ///
    /// Keys already present are never overwritten, so merging layers from
    /// highest to lowest precedence yields CLI > file > default.
    #[must_use]
    pub fn merge_absent(mut self, layer: &ConfigLayer, source: Source) -> Self {
        for (key, value) in layer.iter() {
            if !self.entries.contains_key(key) {
                self.entries.insert(
                    key.to_string(),
                    Entry {
                        value: value.clone(),
                        source,
                    },
                );
            }
        }
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key).map(|entry| &entry.value)
    }

    pub fn source(&self, key: &str) -> Option<Source> {
        self.entries.get(key).map(|entry| entry.source)
    }

    /// Text value of `key`; other scalar kinds are not converted.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            ConfigValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Any value of `key` rendered as text.
    pub fn get_text(&self, key: &str) -> Option<String> {
        self.get(key).map(ToString::to_string)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(ConfigValue::as_bool)
    }

    /// `true` only when `key` is set to a truthy value.
    pub fn flag(&self, key: &str) -> bool {
        self.get_bool(key).unwrap_or(false)
    }

    pub fn get_integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(ConfigValue::as_integer)
    }

    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(ConfigValue::as_float)
    }

    /// See [`ConfigValue::to_list`].
    pub fn get_list(&self, key: &str) -> Option<Vec<String>> {
        self.get(key).map(ConfigValue::to_list)
    }

    /// Non-empty text value of `key` as a path.
    pub fn get_path(&self, key: &str) -> Option<PathBuf> {
        self.get_str(key)
            .filter(|text| !text.is_empty())
            .map(PathBuf::from)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries
            .iter()
            .map(|(key, entry)| (key.as_str(), &entry.value))
    }

    /// Plain key/value document, leaving out `exclude`d keys.
    pub fn to_document(&self, exclude: &[&str]) -> BTreeMap<String, ConfigValue> {
        self.iter()
            .filter(|(key, _)| !exclude.contains(key))
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_and_list_normalise_identically() {
        let text = ConfigValue::from("adm1, lineage,");
        let list = ConfigValue::from(vec!["adm1".to_string(), "lineage".to_string()]);
        assert_eq!(text.to_list(), list.to_list());
    }

    #[test]
    fn with_replaces_and_marks_resolved() {
        let config = Config::new()
            .with_source("outdir", "a", Source::Cli)
            .with("outdir", "/abs/a");

        assert_eq!(config.get_str("outdir"), Some("/abs/a"));
        assert_eq!(config.source("outdir"), Some(Source::Resolved));
    }

    #[test]
    fn merge_absent_keeps_existing_values() {
        let mut layer = ConfigLayer::new();
        layer.set("outdir", "/tmp/y");
        layer.set("fields", "adm1");

        let config = Config::new()
            .with_source("outdir", "/tmp/x", Source::Cli)
            .merge_absent(&layer, Source::File);

        assert_eq!(config.get_str("outdir"), Some("/tmp/x"));
        assert_eq!(config.source("outdir"), Some(Source::Cli));
        assert_eq!(config.get_str("fields"), Some("adm1"));
        assert_eq!(config.source("fields"), Some(Source::File));
    }

    #[test]
    fn bool_and_integer_accept_text() {
        let config = Config::new()
            .with("no_temp", "True")
            .with("up_distance", "3");

        assert!(config.flag("no_temp"));
        assert_eq!(config.get_integer("up_distance"), Some(3));
        assert!(!config.flag("absent"));
    }

    #[test]
    fn float_accepts_integer_and_text() {
        let config = Config::new()
            .with("max_ambiguity", 1_i64)
            .with("min_length", "0.25");

        assert_eq!(config.get_float("max_ambiguity"), Some(1.0));
        assert_eq!(config.get_float("min_length"), Some(0.25));
    }

    #[test]
    fn source_precedence_order() {
        assert!(Source::Cli < Source::File);
        assert!(Source::File < Source::Default);
        assert!(Source::Cli.is_explicit());
        assert!(!Source::Default.is_explicit());
    }
}
