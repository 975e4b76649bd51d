//! A single source of configuration values

use std::collections::BTreeMap;
use std::path::Path;

use civet_fs::ConfigStore;
use serde_yaml::Value;

use super::value::ConfigValue;
use crate::{Error, Result};

/// Key/value pairs from one source: parsed CLI arguments, a config file or
/// built-in defaults.
///
/// Keys are stored in snake_case. [`ConfigLayer::from_file`] rewrites the
/// hyphenated spellings config files use.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigLayer {
    values: BTreeMap<String, ConfigValue>,
}

impl ConfigLayer {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<ConfigValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<ConfigValue>) {
        self.values.insert(normalize_key(key), value.into());
    }

    /// Set `key` only when `value` is present.
    pub fn set_opt<V: Into<ConfigValue>>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Load a flat config file (YAML, TOML or JSON by extension).
    ///
    /// Null values are skipped. Nested mappings are rejected; sequences
    /// become lists of their scalar items.
    pub fn from_file(path: &Path) -> Result<Self> {
        let document: Option<BTreeMap<String, Value>> = ConfigStore::new().load(path)?;

        let mut layer = Self::new();
        for (key, value) in document.unwrap_or_default() {
            if let Some(value) = convert(&key, value)? {
                layer.set(&key, value);
            }
        }

        tracing::debug!(path = %path.display(), keys = layer.len(), "Loaded config file");
        Ok(layer)
    }
}

/// `from-metadata` and `from_metadata` name the same key.
pub fn normalize_key(key: &str) -> String {
    key.trim().replace('-', "_")
}

fn convert(key: &str, value: Value) -> Result<Option<ConfigValue>> {
    let converted = match value {
        Value::Null => None,
        Value::Sequence(items) => {
            let items = items
                .into_iter()
                .filter_map(|item| scalar_text(key, item).transpose())
                .collect::<Result<Vec<_>>>()?;
            Some(ConfigValue::List(items))
        }
        Value::Tagged(tagged) => convert(key, tagged.value)?,
        Value::Mapping(_) => {
            return Err(Error::setting(
                normalize_key(key),
                "nested mappings are not supported",
            ));
        }
        scalar => scalar_value(scalar),
    };
    Ok(converted)
}

fn scalar_value(value: Value) -> Option<ConfigValue> {
    match value {
        Value::Bool(b) => Some(ConfigValue::Bool(b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(ConfigValue::Integer(i)),
            None => n.as_f64().map(ConfigValue::Float),
        },
        Value::String(s) => Some(ConfigValue::Text(s)),
        _ => None,
    }
}

fn scalar_text(key: &str, value: Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::Sequence(_) | Value::Mapping(_) => Err(Error::setting(
            normalize_key(key),
            "list items must be plain values",
        )),
        other => Ok(scalar_value(other).map(|v| v.to_string())),
    }
}
