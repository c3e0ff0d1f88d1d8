//! Client configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 2000;
pub const DEFAULT_SESSION_KEY: &str = "learn-platform.auth";

const SESSION_DIR: &str = "learn-platform";
const SESSION_FILE: &str = "session.json";

/// Errors produced while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request: Duration,
    pub connect: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            request: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            connect: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base address without a trailing slash.
    pub base_url: String,
    pub timeouts: Timeouts,
    /// File backing durable client storage.
    pub session_file: PathBuf,
    /// Namespaced key under which the session is persisted.
    pub session_key: String,
}

impl ClientConfig {
    /// Build a config pointing at `base_url` with default timeouts and storage.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            timeouts: Timeouts::default(),
            session_file: default_session_file(),
            session_key: DEFAULT_SESSION_KEY.to_owned(),
        }
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `LEARN_API_BASE_URL`: default `http://localhost:8080`
    /// - `LEARN_API_TIMEOUT_MS`: default 5000
    /// - `LEARN_API_CONNECT_TIMEOUT_MS`: default 2000
    /// - `LEARN_SESSION_FILE`: default `<data dir>/learn-platform/session.json`
    /// - `LEARN_SESSION_KEY`: default `learn-platform.auth`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when a timeout is not a non-negative integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("LEARN_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let timeouts = Timeouts {
            request: Duration::from_millis(env_parse_u64("LEARN_API_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS)?),
            connect: Duration::from_millis(env_parse_u64("LEARN_API_CONNECT_TIMEOUT_MS", DEFAULT_CONNECT_TIMEOUT_MS)?),
        };
        let session_file = std::env::var("LEARN_SESSION_FILE").map_or_else(|_| default_session_file(), PathBuf::from);
        let session_key = std::env::var("LEARN_SESSION_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_KEY.to_owned());

        Ok(Self { base_url: normalize_base_url(&base_url), timeouts, session_file, session_key })
    }

    #[must_use]
    pub fn with_base_url(self, base_url: &str) -> Self {
        Self { base_url: normalize_base_url(base_url), ..self }
    }

    #[must_use]
    pub fn with_session_file(self, session_file: impl Into<PathBuf>) -> Self {
        Self { session_file: session_file.into(), ..self }
    }

    #[must_use]
    pub fn with_request_timeout(self, request: Duration) -> Self {
        Self { timeouts: Timeouts { request, ..self.timeouts }, ..self }
    }
}

fn env_parse_u64(key: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::Parse(format!("{key} must be an integer, got '{raw}'"))),
        Err(_) => Ok(default),
    }
}

pub(crate) fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn default_session_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SESSION_DIR)
        .join(SESSION_FILE)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
