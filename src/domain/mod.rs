//! Core data types shared by the configuration readers and the materializer.

mod config;

pub use config::Config;

use std::collections::BTreeMap;
use std::fmt;

/// Where a raw value came from. Ordered from lowest to highest precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Source {
    Default,
    File,
    Env,
    Flag,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Source::Default => "default",
            Source::File => "file",
            Source::Env => "env",
            Source::Flag => "flag",
        };
        f.write_str(name)
    }
}

/// Declared semantic type of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Int,
    Duration,
    Bool,
    String,
    StringList,
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SettingKind::Int => "int",
            SettingKind::Duration => "duration",
            SettingKind::Bool => "bool",
            SettingKind::String => "string",
            SettingKind::StringList => "string list",
        };
        f.write_str(name)
    }
}

/// One entry of the default table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setting {
    /// Hyphenated key used in config files and, transformed, in env names.
    pub key: &'static str,
    /// Long flag name. Equal to `key` except where the CLI uses a singular form.
    pub flag: &'static str,
    pub short: Option<char>,
    pub kind: SettingKind,
    /// Default in textual form; an empty string is an empty list for list kinds.
    pub default: &'static str,
    pub help: &'static str,
}

/// An untyped value as read from one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Scalar(String),
    List(Vec<String>),
}

impl RawValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        RawValue::Scalar(value.into())
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RawValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Scalar(value) => f.write_str(value),
            RawValue::List(values) => write!(f, "[{}]", values.join(", ")),
        }
    }
}

/// The values one source supplied, keyed by setting key.
///
/// Only keys the source actually provides are present, so an absent key
/// always falls through to the next lower layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceValues {
    source: Source,
    values: BTreeMap<&'static str, RawValue>,
}

impl SourceValues {
    pub fn new(source: Source) -> Self {
        Self { source, values: BTreeMap::new() }
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn insert(&mut self, key: &'static str, value: RawValue) {
        self.values.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
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
}
