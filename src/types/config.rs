//! Configuration structures.
//!
//! Configuration is loaded from environment variables and may be overridden
//! from the command line.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::errors::{Error, Result};

pub const ENV_BASE_URL: &str = "MEALIE_BASE_URL";
pub const ENV_API_KEY: &str = "MEALIE_API_KEY";
pub const ENV_REQUEST_TIMEOUT: &str = "MEALIE_REQUEST_TIMEOUT";
pub const ENV_LOG_FORMAT: &str = "MEALIE_MCP_LOG_FORMAT";
pub const ENV_LOG_FILE: &str = "MEALIE_MCP_LOG_FILE";

/// Global server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Mealie backend connection.
    #[serde(default)]
    pub mealie: MealieConfig,

    /// MCP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset or empty variables keep their defaults. An unparsable timeout is
    /// ignored with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(url) = get(ENV_BASE_URL) {
            config.mealie.base_url = url;
        }
        if let Some(key) = get(ENV_API_KEY) {
            config.mealie.api_key = key;
        }
        if let Some(raw) = get(ENV_REQUEST_TIMEOUT) {
            match humantime_serde::re::humantime::parse_duration(raw.trim()) {
                Ok(timeout) => config.mealie.request_timeout = timeout,
                Err(e) => tracing::warn!("Ignoring {}={:?}: {}", ENV_REQUEST_TIMEOUT, raw, e),
            }
        }
        if let Some(format) = get(ENV_LOG_FORMAT) {
            config.observability.json_logs = format.eq_ignore_ascii_case("json");
        }
        if let Some(path) = get(ENV_LOG_FILE) {
            config.observability.log_file = Some(PathBuf::from(path));
        }

        config
    }

    /// Reject configurations the server cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.mealie.base_url.trim().is_empty() {
            return Err(Error::validation(format!("{} must be set", ENV_BASE_URL)));
        }
        if self.mealie.api_key.trim().is_empty() {
            return Err(Error::validation(format!("{} must be set", ENV_API_KEY)));
        }
        if self.mealie.request_timeout.is_zero() {
            return Err(Error::validation("request timeout must be positive"));
        }
        Ok(())
    }
}

/// Mealie backend configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct MealieConfig {
    /// Base URL of the Mealie instance, e.g. `https://mealie.example.org`.
    pub base_url: String,

    /// Mealie API token, sent as a bearer token.
    #[serde(skip_serializing, default)]
    pub api_key: String,

    /// Per-request timeout.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for MealieConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

// The API key never reaches the logs.
impl std::fmt::Debug for MealieConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MealieConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// MCP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server name reported in `initialize`.
    pub name: String,

    /// MCP protocol revision reported in `initialize`.
    pub protocol_version: String,

    /// Maximum accepted size of one JSON-RPC message line.
    pub max_message_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "mealie".to_string(),
            protocol_version: "2025-06-18".to_string(),
            max_message_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,

    /// Optional file receiving a copy of every log line.
    pub log_file: Option<PathBuf>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            log_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.mealie.request_timeout, Duration::from_secs(30));
        assert_eq!(config.server.name, "mealie");
        assert_eq!(config.server.protocol_version, "2025-06-18");
        assert_eq!(config.observability.log_level, "info");
        assert!(!config.observability.json_logs);
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let config = Config::from_lookup(lookup(&[
            (ENV_BASE_URL, "http://mealie.local:9000"),
            (ENV_API_KEY, "secret-token"),
            (ENV_REQUEST_TIMEOUT, "45s"),
            (ENV_LOG_FORMAT, "JSON"),
            (ENV_LOG_FILE, "/tmp/mealie_mcp_server.log"),
        ]));

        assert_eq!(config.mealie.base_url, "http://mealie.local:9000");
        assert_eq!(config.mealie.api_key, "secret-token");
        assert_eq!(config.mealie.request_timeout, Duration::from_secs(45));
        assert!(config.observability.json_logs);
        assert_eq!(
            config.observability.log_file,
            Some(PathBuf::from("/tmp/mealie_mcp_server.log"))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_timeout_keeps_default() {
        let config = Config::from_lookup(lookup(&[(ENV_REQUEST_TIMEOUT, "soon")]));
        assert_eq!(config.mealie.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_validate_requires_credentials() {
        let config = Config::from_lookup(lookup(&[(ENV_BASE_URL, "http://mealie.local")]));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains(ENV_API_KEY));

        let config = Config::from_lookup(lookup(&[(ENV_API_KEY, "k"), (ENV_BASE_URL, "  ")]));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains(ENV_BASE_URL));
    }

    #[test]
    fn test_api_key_redacted() {
        let config = Config::from_lookup(lookup(&[(ENV_API_KEY, "secret-token")]));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-token"));
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret-token"));
    }
}
