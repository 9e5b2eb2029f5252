//! Precedence merge of the four configuration layers.
//!
//! For every declared key the first present value wins, in this order:
//! flag, env, file, default.

use super::defaults::SETTINGS;
use crate::domain::{RawValue, Source, SourceValues};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A resolved value together with the layer it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: RawValue,
    pub source: Source,
}

/// One untyped value per setting key, chosen by precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedConfig {
    values: BTreeMap<&'static str, Resolved>,
    config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    pub fn get(&self, key: &str) -> Option<&Resolved> {
        self.values.get(key)
    }

    pub fn value(&self, key: &str) -> Option<&RawValue> {
        self.get(key).map(|r| &r.value)
    }

    pub fn source_of(&self, key: &str) -> Option<Source> {
        self.get(key).map(|r| r.source)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Resolved)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    /// Record the config file the file layer was read from.
    pub fn with_config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_file = path;
        self
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }
}

/// Fold the layers into one resolved set.
///
/// Layers are passed lowest precedence first. A key only counts as present in
/// a layer if that layer actually supplied it.
pub fn merge(
    defaults: &SourceValues,
    file: &SourceValues,
    env: &SourceValues,
    flags: &SourceValues,
) -> ResolvedConfig {
    let by_precedence = [flags, env, file, defaults];
    let mut resolved = ResolvedConfig::default();

    for setting in SETTINGS {
        let winner = by_precedence
            .iter()
            .find_map(|layer| layer.get(setting.key).map(|value| (layer.source(), value)));

        match winner {
            Some((source, value)) => {
                tracing::debug!("{} = {} (from {})", setting.key, value, source);
                resolved.values.insert(setting.key, Resolved { value: value.clone(), source });
            }
            None => tracing::debug!("{} has no value in any layer", setting.key),
        }
    }

    resolved
}
