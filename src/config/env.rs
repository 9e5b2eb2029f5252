//! Environment variable layer
//!
//! Every setting can be set through `GONZO_<KEY>`, where the key is upper-cased
//! and its hyphens become underscores: `vmlogs-user` is read from
//! `GONZO_VMLOGS_USER`.

use super::defaults::SETTINGS;
use crate::domain::{RawValue, Source, SourceValues};
use std::collections::HashMap;
use std::env::{self, VarError};

/// Reserved prefix for all environment variables read by gonzo.
pub const ENV_PREFIX: &str = "GONZO";

/// Source of environment variables.
pub trait EnvLookup {
    /// Value of `name`, or `None` if it is not set.
    fn lookup(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        match env::var(name) {
            Ok(value) => Some(value),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(_)) => {
                tracing::warn!("Ignoring {}: value is not valid UTF-8", name);
                None
            }
        }
    }
}

impl EnvLookup for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Environment variable name for a setting key.
pub fn env_var_name(key: &str) -> String {
    format!("{}_{}", ENV_PREFIX, key.to_ascii_uppercase().replace('-', "_"))
}

/// Look up one key, treating an empty value as unset.
pub fn lookup_key(env: &dyn EnvLookup, key: &str) -> Option<String> {
    env.lookup(&env_var_name(key)).filter(|value| !value.is_empty())
}

/// Build the env layer from every declared setting.
pub fn read_env(env: &dyn EnvLookup) -> SourceValues {
    let mut values = SourceValues::new(Source::Env);
    for setting in SETTINGS {
        if let Some(value) = lookup_key(env, setting.key) {
            tracing::debug!("{} set from {}", setting.key, env_var_name(setting.key));
            values.insert(setting.key, RawValue::Scalar(value));
        }
    }
    values
}
