//! Configuration module
//!
//! Resolves the tester configuration from built-in defaults, an optional
//! YAML/JSON file, `VIDEOGEN_TESTER_*` environment variables and CLI flags,
//! in that order of precedence.

mod env;

pub use env::{EnvConfig, ENV_PREFIX};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default API deployment
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/public";

/// Default API key for local deployments
pub const DEFAULT_API_KEY: &str = "sk-test-1234567890abcdef";

/// Default results file
pub const DEFAULT_OUTPUT: &str = "api_test_results.json";

/// Upper bound on rate limiting requests per run
pub const MAX_RATE_LIMIT_REQUESTS: u32 = 10;

/// Configuration for one run against one deployment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TesterConfig {
    /// Root address of the API, without trailing slash
    pub base_url: String,

    /// Credential sent as `Authorization: Bearer <api_key>`
    pub api_key: String,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Results file path
    pub output: String,

    /// Number of probes sent by the rate limiting check
    pub rate_limit_requests: u32,

    /// Pause between rate limiting probes
    pub rate_limit_delay_ms: u64,
}

impl Default for TesterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            timeout_secs: 30,
            output: DEFAULT_OUTPUT.to_string(),
            rate_limit_requests: MAX_RATE_LIMIT_REQUESTS,
            rate_limit_delay_ms: 100,
        }
    }
}

impl TesterConfig {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = expand_path(path.as_ref());
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Self = if is_yaml_file(&path) {
            serde_yaml::from_str(&content).context("Failed to parse YAML config")?
        } else {
            serde_json::from_str(&content).context("Failed to parse JSON config")?
        };

        config.validate()?;
        Ok(config.normalized())
    }

    /// Reject settings the checks cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.rate_limit_requests > MAX_RATE_LIMIT_REQUESTS {
            bail!(
                "rate_limit_requests must be at most {}, got {}",
                MAX_RATE_LIMIT_REQUESTS,
                self.rate_limit_requests
            );
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = if is_yaml_file(path.as_ref()) {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Overlay values taken from the environment
    pub fn apply_env(mut self, env: &EnvConfig) -> Self {
        if let Some(url) = &env.base_url {
            self.base_url = url.clone();
        }
        if let Some(key) = &env.api_key {
            self.api_key = key.clone();
        }
        if let Some(timeout) = env.timeout {
            self.timeout_secs = timeout;
        }
        if let Some(output) = &env.output {
            self.output = output.clone();
        }
        self.normalized()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&url.into());
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    /// Results file with `~/` expanded
    pub fn output_path(&self) -> PathBuf {
        expand_path(Path::new(&self.output))
    }

    fn normalized(mut self) -> Self {
        self.base_url = normalize_base_url(&self.base_url);
        self
    }
}

#[cfg(test)]
impl TesterConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_rate_limit(mut self, requests: u32, delay_ms: u64) -> Self {
        self.rate_limit_requests = requests.min(MAX_RATE_LIMIT_REQUESTS);
        self.rate_limit_delay_ms = delay_ms;
        self
    }
}

/// Strip trailing slashes from a base URL
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Expand ~ to home directory
fn expand_path(path: &Path) -> PathBuf {
    if let Some(stripped) = path.to_str().and_then(|p| p.strip_prefix("~/")) {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

/// Check if file is YAML based on extension
fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = TesterConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000/api/public");
        assert_eq!(config.api_key, "sk-test-1234567890abcdef");
        assert_eq!(config.output, "api_test_results.json");
        assert_eq!(config.rate_limit_requests, 10);
        assert_eq!(config.rate_limit_delay_ms, 100);
    }

    #[test]
    fn test_trailing_slashes_stripped() {
        let config = TesterConfig::new("https://api.example.com/public///", "k");
        assert_eq!(config.base_url, "https://api.example.com/public");

        let config = TesterConfig::default().with_base_url("http://localhost:8080/");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_load_partial_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tester.yaml");
        std::fs::write(
            &path,
            "base_url: https://staging.example.com/api/public/\ntimeout_secs: 5\n",
        )
        .unwrap();

        let config = TesterConfig::load(&path).unwrap();
        assert_eq!(config.base_url, "https://staging.example.com/api/public");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.api_key, DEFAULT_API_KEY);
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tester.json");
        let config = TesterConfig::new("http://10.0.0.5/api", "sk-abc").with_rate_limit(3, 0);

        config.save(&path).unwrap();
        assert_eq!(TesterConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_rejects_too_many_rate_limit_requests() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tester.yaml");
        std::fs::write(&path, "rate_limit_requests: 50\n").unwrap();

        let err = TesterConfig::load(&path).unwrap_err();
        assert!(err
            .to_string()
            .contains("rate_limit_requests must be at most 10, got 50"));

        std::fs::write(&path, "rate_limit_requests: 10\n").unwrap();
        assert_eq!(TesterConfig::load(&path).unwrap().rate_limit_requests, 10);
    }

    #[test]
    fn test_with_rate_limit_caps_request_count() {
        let config = TesterConfig::default().with_rate_limit(50, 0);
        assert_eq!(config.rate_limit_requests, MAX_RATE_LIMIT_REQUESTS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = TesterConfig::load("/nonexistent/tester.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_precedence_env_over_file_defaults() {
        let env = EnvConfig {
            base_url: Some("http://env.example.com/".to_string()),
            timeout: Some(12),
            ..Default::default()
        };

        let config = TesterConfig::default()
            .with_api_key("sk-from-file")
            .apply_env(&env)
            .with_timeout(3);

        assert_eq!(config.base_url, "http://env.example.com");
        assert_eq!(config.api_key, "sk-from-file");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn test_output_path_expands_home() {
        let config = TesterConfig::default().with_output("~/results.json");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.output_path(), home.join("results.json"));
        }
        let config = TesterConfig::default();
        assert_eq!(config.output_path(), PathBuf::from("api_test_results.json"));
    }
}
