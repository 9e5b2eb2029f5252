//! Conversion of the resolved, untyped values into [`Config`].

use super::defaults::declaration;
use super::error::ConfigError;
use super::merge::ResolvedConfig;
use crate::domain::{Config, RawValue, SettingKind};
use crate::utils::{parse_bool, parse_duration, split_csv};
use std::str::FromStr;
use std::time::Duration;

/// Build the typed record. The first value that does not fit its declared
/// type aborts the whole conversion.
pub fn materialize(resolved: &ResolvedConfig) -> Result<Config, ConfigError> {
    let fields = Fields { resolved };

    Ok(Config {
        memory_size: fields.int("memory-size")?,
        update_interval: fields.duration("update-interval")?,
        log_buffer: fields.int("log-buffer")?,
        test_mode: fields.boolean("test-mode")?,
        config_file: resolved.config_file().map(|p| p.to_path_buf()),
        ai_model: fields.string("ai-model")?,
        files: fields.list("files")?,
        follow: fields.boolean("follow")?,
        otlp_enabled: fields.boolean("otlp-enabled")?,
        otlp_grpc_port: fields.int("otlp-grpc-port")?,
        otlp_http_port: fields.int("otlp-http-port")?,
        vmlogs_url: fields.string("vmlogs-url")?,
        vmlogs_user: fields.string("vmlogs-user")?,
        vmlogs_password: fields.string("vmlogs-password")?,
        vmlogs_query: fields.string("vmlogs-query")?,
        skin: fields.string("skin")?,
        stop_words: fields.list("stop-words")?,
        format: fields.string("format")?,
        disable_version_check: fields.boolean("disable-version-check")?,
        reverse_scroll_wheel: fields.boolean("reverse-scroll-wheel")?,
    })
}

struct Fields<'a> {
    resolved: &'a ResolvedConfig,
}

impl<'a> Fields<'a> {
    fn raw(&self, key: &'static str, kind: SettingKind) -> Result<&'a RawValue, ConfigError> {
        match declaration(key) {
            Some(setting) if setting.kind == kind => {}
            Some(setting) => {
                return Err(ConfigError::Decode(format!(
                    "`{key}` is declared as {} but read as {kind}",
                    setting.kind
                )))
            }
            None => return Err(ConfigError::Decode(format!("`{key}` is not a declared setting"))),
        }

        self.resolved
            .value(key)
            .ok_or_else(|| ConfigError::Decode(format!("no value resolved for `{key}`")))
    }

    /// The single text of a scalar setting.
    fn scalar(&self, key: &'static str, kind: SettingKind) -> Result<&'a str, ConfigError> {
        match self.raw(key, kind)? {
            RawValue::Scalar(value) => Ok(value),
            RawValue::List(values) if values.len() == 1 => Ok(&values[0]),
            list @ RawValue::List(_) => {
                Err(invalid(key, &list.to_string(), format!("expected a single {kind}, got a list")))
            }
        }
    }

    fn int<T>(&self, key: &'static str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let text = self.scalar(key, SettingKind::Int)?;
        text.trim().parse::<T>().map_err(|e| invalid(key, text, format!("not a valid integer ({e})")))
    }

    fn duration(&self, key: &'static str) -> Result<Duration, ConfigError> {
        let text = self.scalar(key, SettingKind::Duration)?;
        parse_duration(text).map_err(|e| invalid(key, text, e.to_string()))
    }

    fn boolean(&self, key: &'static str) -> Result<bool, ConfigError> {
        let text = self.scalar(key, SettingKind::Bool)?;
        parse_bool(text).ok_or_else(|| invalid(key, text, "expected true or false".to_string()))
    }

    fn string(&self, key: &'static str) -> Result<String, ConfigError> {
        self.scalar(key, SettingKind::String).map(str::to_string)
    }

    fn list(&self, key: &'static str) -> Result<Vec<String>, ConfigError> {
        Ok(match self.raw(key, SettingKind::StringList)? {
            RawValue::Scalar(value) => split_csv(value),
            // Items that already arrive as a list (YAML sequences, split flags) are kept whole.
            RawValue::List(values) => values.clone(),
        })
    }
}

fn invalid(key: &'static str, input: &str, reason: String) -> ConfigError {
    ConfigError::InvalidValue { key, input: input.to_string(), reason }
}
