//! Default table: every setting the resolver knows about.

use crate::domain::{RawValue, Setting, SettingKind, Source, SourceValues};
use once_cell::sync::Lazy;
use std::collections::HashMap;

const fn setting(
    key: &'static str,
    flag: &'static str,
    short: Option<char>,
    kind: SettingKind,
    default: &'static str,
    help: &'static str,
) -> Setting {
    Setting { key, flag, short, kind, default, help }
}

/// All declared settings, in the order they appear in `--help`.
pub static SETTINGS: &[Setting] = &[
    setting(
        "memory-size",
        "memory-size",
        Some('m'),
        SettingKind::Int,
        "10000",
        "Maximum number of entries to keep in memory",
    ),
    setting(
        "update-interval",
        "update-interval",
        Some('u'),
        SettingKind::Duration,
        "1s",
        "Dashboard update interval",
    ),
    setting(
        "log-buffer",
        "log-buffer",
        Some('b'),
        SettingKind::Int,
        "1000",
        "Maximum log buffer size",
    ),
    setting(
        "test-mode",
        "test-mode",
        Some('t'),
        SettingKind::Bool,
        "false",
        "Run in test mode (works without TTY)",
    ),
    setting(
        "ai-model",
        "ai-model",
        None,
        SettingKind::String,
        "",
        "AI model to use for log analysis (auto-selects best available if not specified)",
    ),
    setting(
        "files",
        "file",
        Some('f'),
        SettingKind::StringList,
        "",
        "Files or file globs to read logs from (can specify multiple)",
    ),
    setting(
        "follow",
        "follow",
        None,
        SettingKind::Bool,
        "false",
        "Follow log files like 'tail -f' (watch for new lines in real-time)",
    ),
    setting(
        "otlp-enabled",
        "otlp-enabled",
        None,
        SettingKind::Bool,
        "false",
        "Enable OTLP listener to receive logs via OpenTelemetry protocol (gRPC and HTTP)",
    ),
    setting(
        "otlp-grpc-port",
        "otlp-grpc-port",
        None,
        SettingKind::Int,
        "4317",
        "Port for OTLP gRPC listener",
    ),
    setting(
        "otlp-http-port",
        "otlp-http-port",
        None,
        SettingKind::Int,
        "4318",
        "Port for OTLP HTTP listener",
    ),
    setting(
        "vmlogs-url",
        "vmlogs-url",
        None,
        SettingKind::String,
        "",
        "Victoria Logs URL endpoint for streaming logs (e.g., http://localhost:9428)",
    ),
    setting(
        "vmlogs-user",
        "vmlogs-user",
        None,
        SettingKind::String,
        "",
        "Victoria Logs basic auth username (can also use GONZO_VMLOGS_USER env var)",
    ),
    setting(
        "vmlogs-password",
        "vmlogs-password",
        None,
        SettingKind::String,
        "",
        "Victoria Logs basic auth password (can also use GONZO_VMLOGS_PASSWORD env var)",
    ),
    setting(
        "vmlogs-query",
        "vmlogs-query",
        None,
        SettingKind::String,
        "*",
        "Victoria Logs query (LogsQL) to use for streaming ('*' for all logs)",
    ),
    setting(
        "skin",
        "skin",
        Some('s'),
        SettingKind::String,
        "default",
        "Color scheme/skin to use (default, or name of a skin file in ~/.config/gonzo/skins/)",
    ),
    setting(
        "stop-words",
        "stop-words",
        None,
        SettingKind::StringList,
        "",
        "Additional stop words to filter out from analysis (adds to built-in list)",
    ),
    setting(
        "format",
        "format",
        None,
        SettingKind::String,
        "",
        "Log format to use (auto-detect if not specified): otlp, json, text, or a custom format name",
    ),
    setting(
        "disable-version-check",
        "disable-version-check",
        None,
        SettingKind::Bool,
        "false",
        "Disable automatic version checking on startup",
    ),
    setting(
        "reverse-scroll-wheel",
        "reverse-scroll-wheel",
        None,
        SettingKind::Bool,
        "false",
        "Reverse scroll wheel direction (natural scrolling)",
    ),
];

static BY_KEY: Lazy<HashMap<&'static str, &'static Setting>> =
    Lazy::new(|| SETTINGS.iter().map(|s| (s.key, s)).collect());

/// Look up a declaration by key. Lookup is exact; keys are lower-case.
pub fn declaration(key: &str) -> Option<&'static Setting> {
    BY_KEY.get(key).copied()
}

/// Default raw value for a declared key.
///
/// # Panics
///
/// Panics if `key` is not declared in [`SETTINGS`]; asking for an unknown
/// key is a programming error.
pub fn default_for(key: &str) -> RawValue {
    match declaration(key) {
        Some(setting) => RawValue::scalar(setting.default),
        None => panic!("no default declared for setting key `{key}`"),
    }
}

/// The default layer: one value for every declared key.
pub fn default_values() -> SourceValues {
    let mut values = SourceValues::new(Source::Default);
    for setting in SETTINGS {
        values.insert(setting.key, RawValue::scalar(setting.default));
    }
    values
}
