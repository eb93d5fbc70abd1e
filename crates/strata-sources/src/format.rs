//! Document formats understood by [`FileConfig`](crate::FileConfig)

use crate::{Error, Result};
use std::fmt;
use strata_core::{ConfigMap, Value};
use strata_fs::NormalizedPath;

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    Toml,
    Yaml,
}

impl Format {
    /// Detect the format from a file extension.
    ///
    /// - `.toml` -> TOML
    /// - `.yaml`, `.yml` -> YAML
    /// - anything else -> JSON
    pub fn from_path(path: &NormalizedPath) -> Self {
        match path.extension().as_deref() {
            Some("toml") => Format::Toml,
            Some("yaml" | "yml") => Format::Yaml,
            _ => Format::Json,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Format::Json => "JSON",
            Format::Toml => "TOML",
            Format::Yaml => "YAML",
        }
    }

    /// Parse a document into a value tree, preserving its nesting.
    pub fn parse(&self, content: &str, path: &NormalizedPath) -> Result<Value> {
        let parse_error = |message: String| Error::Parse {
            path: path.to_native(),
            format: self.name().into(),
            message,
        };

        match self {
            Format::Json => serde_json::from_str::<serde_json::Value>(content)
                .map(Value::from)
                .map_err(|e| parse_error(e.to_string())),
            Format::Toml => toml::from_str::<toml::Table>(content)
                .map(|table| Value::Mapping(table_to_mapping(table)))
                .map_err(|e| parse_error(e.to_string())),
            Format::Yaml => match serde_yaml::from_str::<serde_yaml::Value>(content) {
                // An empty YAML document is an empty configuration
                Ok(serde_yaml::Value::Null) => Ok(Value::Mapping(ConfigMap::new())),
                Ok(value) => Ok(from_yaml(value)),
                Err(e) => Err(parse_error(e.to_string())),
            },
        }
    }

    /// Serialize a configuration snapshot as a pretty-printed document.
    pub fn serialize(&self, entries: &ConfigMap, path: &NormalizedPath) -> Result<String> {
        let serialized = match self {
            Format::Json => serde_json::to_string_pretty(entries).map_err(|e| e.to_string()),
            Format::Toml => toml::to_string_pretty(entries).map_err(|e| e.to_string()),
            Format::Yaml => serde_yaml::to_string(entries).map_err(|e| e.to_string()),
        };

        serialized.map_err(|message| Error::Serialize {
            path: path.to_native(),
            format: self.name().into(),
            message,
        })
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn table_to_mapping(table: toml::Table) -> ConfigMap {
    table
        .into_iter()
        .map(|(key, value)| (key, from_toml(value)))
        .collect()
}

fn from_toml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Int(i),
        toml::Value::Float(f) => Value::Float(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Sequence(items.into_iter().map(from_toml).collect()),
        toml::Value::Table(table) => Value::Mapping(table_to_mapping(table)),
    }
}

fn from_yaml(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or_default()),
        },
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Sequence(items.into_iter().map(from_yaml).collect())
        }
        serde_yaml::Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(key, value)| (yaml_key(key), from_yaml(value)))
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => from_yaml(tagged.value),
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
