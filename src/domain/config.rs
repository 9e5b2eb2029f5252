//! The typed, effective configuration handed to the rest of the application.

use serde::{Serialize, Serializer};
use std::path::PathBuf;
use std::time::Duration;

/// Effective runtime configuration.
///
/// Built once at startup by [`crate::config::Resolver`] and never mutated
/// afterwards; share it by reference or wrap it in an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Maximum number of entries kept in memory.
    pub memory_size: usize,
    /// Dashboard refresh interval.
    #[serde(serialize_with = "crate::utils::duration::serialize")]
    pub update_interval: Duration,
    /// Maximum log buffer size.
    pub log_buffer: usize,
    /// Run without a TTY.
    pub test_mode: bool,
    /// Configuration file that was actually read, if any.
    #[serde(rename = "config", skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    /// AI model for log analysis; empty selects automatically.
    pub ai_model: String,
    /// Files or globs to read logs from.
    pub files: Vec<String>,
    pub follow: bool,
    pub otlp_enabled: bool,
    pub otlp_grpc_port: u16,
    pub otlp_http_port: u16,
    pub vmlogs_url: String,
    pub vmlogs_user: String,
    #[serde(serialize_with = "redact")]
    pub vmlogs_password: String,
    /// LogsQL query for Victoria Logs streaming.
    pub vmlogs_query: String,
    pub skin: String,
    /// Extra stop words, in the order given.
    pub stop_words: Vec<String>,
    /// Log format; empty means auto-detect.
    pub format: String,
    pub disable_version_check: bool,
    pub reverse_scroll_wheel: bool,
}

impl Config {
    /// Whether basic-auth credentials were supplied for Victoria Logs.
    pub fn has_vmlogs_credentials(&self) -> bool {
        !self.vmlogs_user.is_empty() || !self.vmlogs_password.is_empty()
    }
}

fn redact<S: Serializer>(secret: &str, serializer: S) -> Result<S::Ok, S::Error> {
    if secret.is_empty() {
        serializer.serialize_str("")
    } else {
        serializer.serialize_str("********")
    }
}
