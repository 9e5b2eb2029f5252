//! Config file loading
//!
//! A config file is optional. Anything that prevents it from being used (a
//! missing file, unreadable bytes, bad syntax) leaves the file layer empty
//! and resolution carries on with env, flags and defaults.

use super::defaults::declaration;
use crate::domain::{RawValue, Source, SourceValues};
use anyhow::{bail, Context, Result};
use serde_yaml::Value;
use std::fs;
use std::io;
use std::path::Path;

/// Read the config file at `path` into a file layer.
///
/// Returns `None` when the file does not exist or cannot be used; the reason
/// is logged.
pub fn load_config_file(path: &Path) -> Option<SourceValues> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}", path.display());
            return None;
        }
        Err(e) => {
            tracing::warn!("Failed reading config file {}: {}", path.display(), e);
            return None;
        }
    };

    match parse_config(&content, path) {
        Ok(values) => {
            tracing::warn!("Using config file: {}", path.display());
            Some(values)
        }
        Err(e) => {
            tracing::warn!("Ignoring config file {}: {:#}", path.display(), e);
            None
        }
    }
}

/// Parse config file content. The format is chosen by the file extension;
/// files without one are read as YAML.
pub fn parse_config(content: &str, config_file: &Path) -> Result<SourceValues> {
    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let document: Value = match ext.as_str() {
        "" | "yml" | "yaml" => serde_yaml::from_str(content)
            .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?,
        "toml" => toml::from_str(content)
            .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?,
        "json" => serde_json::from_str(content)
            .with_context(|| format!("Invalid JSON syntax: {}", config_file.display()))?,
        other => bail!("Unsupported config extension '.{}'", other),
    };

    collect_settings(document)
}

fn collect_settings(document: Value) -> Result<SourceValues> {
    let mut values = SourceValues::new(Source::File);

    let mapping = match document {
        // An empty YAML document is a valid, empty config.
        Value::Null => return Ok(values),
        Value::Mapping(mapping) => mapping,
        _ => bail!("Config file must contain a mapping of setting keys to values"),
    };

    for (key, value) in mapping {
        let Some(key) = key.as_str() else {
            tracing::debug!("Skipping non-string config key {:?}", key);
            continue;
        };
        let Some(setting) = declaration(&key.to_ascii_lowercase()) else {
            tracing::debug!("Ignoring unknown config key '{}'", key);
            continue;
        };

        match raw_value(&value) {
            Ok(Some(raw)) => values.insert(setting.key, raw),
            Ok(None) => {}
            Err(reason) => tracing::warn!("Skipping config key '{}': {}", setting.key, reason),
        }
    }

    Ok(values)
}

fn raw_value(value: &Value) -> Result<Option<RawValue>, &'static str> {
    match value {
        Value::Null => Ok(None),
        Value::Sequence(items) => items
            .iter()
            .map(scalar_text)
            .collect::<Option<Vec<_>>>()
            .map(|items| Some(RawValue::List(items)))
            .ok_or("list items must be plain values"),
        Value::Mapping(_) | Value::Tagged(_) => Err("nested values are not supported"),
        scalar => Ok(scalar_text(scalar).map(RawValue::Scalar)),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
