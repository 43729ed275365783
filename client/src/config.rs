//! Client configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{ClientError, LogFormat};

/// Configuration for a login kiosk.
///
/// Can be loaded from a TOML file via [`ClientConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the recognition service.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Path of the login endpoint, relative to `server_url`.
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Identifier whose successful verification opens the admin view.
    #[serde(default = "default_admin_identifier")]
    pub admin_identifier: String,

    /// Where the session flags are persisted.
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,

    /// Request timeout in seconds. Absent means wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_server_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_login_path() -> String {
    facegate_verification::client::DEFAULT_LOGIN_PATH.to_string()
}

fn default_admin_identifier() -> String {
    "23BD1A056D".to_string()
}

fn default_session_file() -> PathBuf {
    PathBuf::from("./facegate_session.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ClientError> {
        toml::from_str(s).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ClientError> {
        toml::to_string_pretty(self).map_err(|e| ClientError::Config(e.to_string()))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            login_path: default_login_path(),
            admin_identifier: default_admin_identifier(),
            session_file: default_session_file(),
            request_timeout_secs: None,
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
