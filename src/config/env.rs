//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "VIDEOGEN_TESTER";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvConfig {
    /// Base URL from VIDEOGEN_TESTER_BASE_URL
    pub base_url: Option<String>,
    /// API key from VIDEOGEN_TESTER_API_KEY
    pub api_key: Option<String>,
    /// Timeout from VIDEOGEN_TESTER_TIMEOUT
    pub timeout: Option<u64>,
    /// Results file from VIDEOGEN_TESTER_OUTPUT
    pub output: Option<String>,
    /// Config file from VIDEOGEN_TESTER_CONFIG
    pub config_file: Option<String>,
    /// Log level from VIDEOGEN_TESTER_LOG
    pub log: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| {
            lookup(format!("{ENV_PREFIX}_{name}").as_str()).filter(|v| !v.trim().is_empty())
        };

        Self {
            base_url: get("BASE_URL"),
            api_key: get("API_KEY"),
            timeout: get("TIMEOUT").and_then(|v| v.trim().parse().ok()),
            output: get("OUTPUT"),
            config_file: get("CONFIG"),
            log: get("LOG"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.base_url.is_some()
            || self.api_key.is_some()
            || self.timeout.is_some()
            || self.output.is_some()
            || self.config_file.is_some()
            || self.log.is_some()
    }
}
