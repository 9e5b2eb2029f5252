//! Configuration loading and merging
//!
//! Resolves the effective [`Config`] from four layers with fixed precedence
//! (Flags > Env > File > Defaults). Env variables use the `GONZO_` prefix; the
//! file is `--config`, `GONZO_CONFIG`, or `~/.config/gonzo/config.yml`.

pub mod defaults;
pub mod env;
pub mod error;
pub mod flags;
pub mod loader;
pub mod locator;
pub mod materialize;
pub mod merge;

pub use defaults::{declaration, default_for, default_values, SETTINGS};
pub use env::{env_var_name, read_env, EnvLookup, ProcessEnv, ENV_PREFIX};
pub use error::{ConfigError, LocateError};
pub use flags::{read_flags, FlagArgs};
pub use loader::load_config_file;
pub use locator::locate_with_home;
pub use materialize::materialize;
pub use merge::{merge, Resolved, ResolvedConfig};

use crate::domain::{Config, Source, SourceValues};
use std::path::PathBuf;

/// Env key consulted for the config file path when `--config` is absent.
const CONFIG_KEY: &str = "config";

/// Resolves the configuration once at startup.
///
/// Defaults to the process environment and the user's home directory; tests
/// swap both out.
pub struct Resolver<'a> {
    flags: &'a FlagArgs,
    env: &'a dyn EnvLookup,
    home_dir: Option<PathBuf>,
}

impl<'a> Resolver<'a> {
    pub fn new(flags: &'a FlagArgs) -> Self {
        Self { flags, env: &ProcessEnv, home_dir: dirs::home_dir() }
    }

    /// Read environment variables from `env` instead of the process.
    pub fn env(mut self, env: &'a dyn EnvLookup) -> Self {
        self.env = env;
        self
    }

    /// Use `home` as the home directory (`None` = unknown).
    pub fn home_dir(mut self, home: Option<PathBuf>) -> Self {
        self.home_dir = home;
        self
    }

    /// Resolve and type-check the configuration.
    pub fn resolve(&self) -> Result<Config, ConfigError> {
        materialize(&self.resolve_untyped())
    }

    /// Resolve without type-checking; every key carries its winning layer.
    pub fn resolve_untyped(&self) -> ResolvedConfig {
        let explicit = self
            .flags
            .config
            .clone()
            .or_else(|| env::lookup_key(self.env, CONFIG_KEY).map(PathBuf::from));

        let file = match locate_with_home(explicit.as_deref(), self.home_dir.as_deref()) {
            Ok(path) => load_config_file(&path).map(|values| (path, values)),
            Err(e) => {
                tracing::warn!("{}; continuing without a config file", e);
                None
            }
        };
        let (config_file, file_values) = match file {
            Some((path, values)) => (Some(path), values),
            None => (None, SourceValues::new(Source::File)),
        };

        merge(&default_values(), &file_values, &read_env(self.env), &read_flags(self.flags))
            .with_config_file(config_file)
    }
}

/// Resolve from the process environment and the user's home directory.
pub fn resolve(flags: &FlagArgs) -> Result<Config, ConfigError> {
    Resolver::new(flags).resolve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use std::path::Path;
    use std::time::Duration;
    use tempfile::TempDir;

    fn flags(args: &[&str]) -> FlagArgs {
        let mut argv = vec!["gonzo"];
        argv.extend_from_slice(args);
        FlagArgs::try_parse_from(argv).expect("valid flags")
    }

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn write_home_config(home: &Path, content: &str) -> PathBuf {
        let dir = home.join(".config/gonzo");
        fs::create_dir_all(&dir).expect("mkdir");
        let path = dir.join("config.yml");
        fs::write(&path, content).expect("write");
        path
    }

    #[test]
    fn test_flag_env_file_precedence_example() {
        let home = TempDir::new().expect("tmp");
        write_home_config(home.path(), "memory-size: 2000\n");
        let env = env_of(&[("GONZO_MEMORY_SIZE", "8000")]);
        let flags = flags(&["--memory-size=5000"]);

        let config = Resolver::new(&flags)
            .env(&env)
            .home_dir(Some(home.path().to_path_buf()))
            .resolve()
            .expect("config");
        assert_eq!(config.memory_size, 5000);
    }

    #[test]
    fn test_each_layer_contributes() {
        let home = TempDir::new().expect("tmp");
        let path = write_home_config(
            home.path(),
            "update-interval: \"3s\"\nskin: monokai\nlog-buffer: 50\nfiles: [a.log, b.log]\n",
        );
        let env = env_of(&[("GONZO_SKIN", "dracula"), ("GONZO_LOG_BUFFER", "60")]);
        let flags = flags(&["-b", "70"]);

        let resolver = Resolver::new(&flags).env(&env).home_dir(Some(home.path().to_path_buf()));
        let resolved = resolver.resolve_untyped();
        assert_eq!(resolved.source_of("update-interval"), Some(Source::File));
        assert_eq!(resolved.source_of("skin"), Some(Source::Env));
        assert_eq!(resolved.source_of("log-buffer"), Some(Source::Flag));
        assert_eq!(resolved.source_of("vmlogs-query"), Some(Source::Default));

        let config = resolver.resolve().expect("config");
        assert_eq!(config.update_interval, Duration::from_secs(3));
        assert_eq!(config.skin, "dracula");
        assert_eq!(config.log_buffer, 70);
        assert_eq!(config.files, vec!["a.log", "b.log"]);
        assert_eq!(config.vmlogs_query, "*");
        assert_eq!(config.config_file, Some(path));
    }

    #[test]
    fn test_file_list_items_keep_commas() {
        let home = TempDir::new().expect("tmp");
        write_home_config(home.path(), "files:\n  - \"/var/log/{app,err}.log\"\n  - other.log\n");
        let env = HashMap::new();
        let flags = FlagArgs::default();

        let config = Resolver::new(&flags)
            .env(&env)
            .home_dir(Some(home.path().to_path_buf()))
            .resolve()
            .expect("config");
        assert_eq!(config.files, vec!["/var/log/{app,err}.log", "other.log"]);
    }

    #[test]
    fn test_empty_config_flag_still_discovers_home_file() {
        let home = TempDir::new().expect("tmp");
        let path = write_home_config(home.path(), "skin: monokai\n");
        let env = HashMap::new();
        let flags = flags(&["--config="]);

        let config = Resolver::new(&flags)
            .env(&env)
            .home_dir(Some(home.path().to_path_buf()))
            .resolve()
            .expect("config");
        assert_eq!(config.skin, "monokai");
        assert_eq!(config.config_file, Some(path));
    }

    #[test]
    fn test_no_sources_gives_defaults() {
        let home = TempDir::new().expect("tmp");
        let env = HashMap::new();
        let flags = FlagArgs::default();

        let config = Resolver::new(&flags)
            .env(&env)
            .home_dir(Some(home.path().to_path_buf()))
            .resolve()
            .expect("config");
        let defaults = materialize(&merge(
            &default_values(),
            &SourceValues::new(Source::File),
            &SourceValues::new(Source::Env),
            &SourceValues::new(Source::Flag),
        ))
        .expect("defaults");
        similar_asserts::assert_eq!(config, defaults);
        assert_eq!(config.vmlogs_query, "*");
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_missing_home_falls_back_to_env_and_flags() {
        let env = env_of(&[("GONZO_FORMAT", "json")]);
        let flags = flags(&["--follow"]);

        let config = Resolver::new(&flags).env(&env).home_dir(None).resolve().expect("config");
        assert_eq!(config.format, "json");
        assert!(config.follow);
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_invalid_yaml_is_ignored() {
        let home = TempDir::new().expect("tmp");
        write_home_config(home.path(), "memory-size: [2000\nskin: {\n");
        let env = HashMap::new();
        let flags = FlagArgs::default();

        let config = Resolver::new(&flags)
            .env(&env)
            .home_dir(Some(home.path().to_path_buf()))
            .resolve()
            .expect("config");
        assert_eq!(config.memory_size, 10_000);
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_explicit_config_flag_overrides_discovery() {
        let home = TempDir::new().expect("tmp");
        write_home_config(home.path(), "skin: monokai\n");
        let custom = home.path().join("custom.yaml");
        fs::write(&custom, "skin: solarized\n").expect("write");
        let env = HashMap::new();
        let flags = flags(&["--config", custom.to_str().expect("utf8 path")]);

        let config = Resolver::new(&flags)
            .env(&env)
            .home_dir(Some(home.path().to_path_buf()))
            .resolve()
            .expect("config");
        assert_eq!(config.skin, "solarized");
        assert_eq!(config.config_file, Some(custom));
    }

    #[test]
    fn test_config_path_from_env() {
        let home = TempDir::new().expect("tmp");
        let custom = home.path().join("from-env.yml");
        fs::write(&custom, "ai-model: gpt-4\n").expect("write");
        let env = env_of(&[("GONZO_CONFIG", custom.to_str().expect("utf8 path"))]);
        let flags = FlagArgs::default();

        let config = Resolver::new(&flags).env(&env).home_dir(None).resolve().expect("config");
        assert_eq!(config.ai_model, "gpt-4");
    }

    #[test]
    fn test_missing_explicit_file_is_not_fatal() {
        let home = TempDir::new().expect("tmp");
        let env = HashMap::new();
        let missing = home.path().join("nope.yml");
        let flags = flags(&["--config", missing.to_str().expect("utf8 path")]);

        let config = Resolver::new(&flags)
            .env(&env)
            .home_dir(Some(home.path().to_path_buf()))
            .resolve()
            .expect("config");
        assert_eq!(config.skin, "default");
    }

    #[test]
    fn test_malformed_env_value_is_fatal() {
        let env = env_of(&[("GONZO_OTLP_GRPC_PORT", "notanumber")]);
        let flags = FlagArgs::default();

        let err = Resolver::new(&flags).env(&env).home_dir(None).resolve().unwrap_err();
        assert_eq!(err.key(), Some("otlp-grpc-port"));
    }

    #[test]
    fn test_unsupplied_flag_does_not_shadow_file() {
        let home = TempDir::new().expect("tmp");
        write_home_config(home.path(), "vmlogs-query: 'level:error'\n");
        let env = HashMap::new();
        let flags = flags(&["--vmlogs-url", "http://localhost:9428"]);

        let config = Resolver::new(&flags)
            .env(&env)
            .home_dir(Some(home.path().to_path_buf()))
            .resolve()
            .expect("config");
        assert_eq!(config.vmlogs_query, "level:error");
        assert_eq!(config.vmlogs_url, "http://localhost:9428");
    }
}
