//! Configuration data structures for cdnbridge.
//!
//! These types map directly to TOML (also JSON / YAML) configuration files and to
//! `CDNBRIDGE__*` environment variables. Every section has defaults so that a
//! minimal deployment only has to provide the upstream API key.
use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

use crate::models::Mapping;

pub const DEFAULT_API_URL: &str = "https://api.gocache.com.br/v1";
pub const DEFAULT_PORT: u16 = 8081;

/// Connection settings for the upstream CDN API.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL every API path is appended to
    pub base_url: String,
    /// API key sent in the `GoCache-Token` header
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Per-request timeout, humantime format (e.g. "30s")
    pub timeout: String,
    /// Retries after a transport failure
    pub retry_count: usize,
    /// Delay before the first retry
    pub retry_wait: String,
    /// Upper bound for any single retry delay
    pub retry_max_wait: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            timeout: "30s".to_string(),
            retry_count: 3,
            retry_wait: "5s".to_string(),
            retry_max_wait: "20s".to_string(),
        }
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &api_key)
            .field("timeout", &self.timeout)
            .field("retry_count", &self.retry_count)
            .field("retry_wait", &self.retry_wait)
            .field("retry_max_wait", &self.retry_max_wait)
            .finish()
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Result<Duration, humantime::DurationError> {
        humantime::parse_duration(&self.timeout)
    }

    pub fn retry_wait(&self) -> Result<Duration, humantime::DurationError> {
        humantime::parse_duration(&self.retry_wait)
    }

    pub fn retry_max_wait(&self) -> Result<Duration, humantime::DurationError> {
        humantime::parse_duration(&self.retry_max_wait)
    }
}

/// Host redirect middleware settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RedirectConfig {
    /// Request paths starting with any of these prefixes are never redirected
    pub bypass_prefixes: Vec<String>,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            bypass_prefixes: vec![
                "/api/".to_string(),
                "/swagger/".to_string(),
                "/health".to_string(),
            ],
        }
    }
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g. "info", "cdnbridge=debug")
    pub level: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
    /// Include span context in JSON output
    pub include_spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
            include_spans: true,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Listening port
    pub port: u16,
    pub upstream: UpstreamConfig,
    pub redirect: RedirectConfig,
    /// Host mappings loaded into the store at startup
    pub mappings: Vec<Mapping>,
    pub logging: LoggingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            upstream: UpstreamConfig::default(),
            redirect: RedirectConfig::default(),
            mappings: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ServerConfig {
    /// `host:port` suitable for binding.
    pub fn listen_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.listen_addr(), "0.0.0.0:8081");
        assert_eq!(config.upstream.base_url, DEFAULT_API_URL);
        assert_eq!(config.upstream.timeout().unwrap(), Duration::from_secs(30));
        assert_eq!(config.upstream.retry_wait().unwrap(), Duration::from_secs(5));
        assert_eq!(config.upstream.retry_max_wait().unwrap(), Duration::from_secs(20));
        assert_eq!(config.upstream.retry_count, 3);
        assert_eq!(
            config.redirect.bypass_prefixes,
            vec!["/api/", "/swagger/", "/health"]
        );
    }

    #[test]
    fn test_ipv6_listen_addr() {
        let config = ServerConfig {
            host: "::".into(),
            ..Default::default()
        };
        assert_eq!(config.listen_addr(), "[::]:8081");
    }

    #[test]
    fn test_api_key_is_not_leaked() {
        let upstream = UpstreamConfig {
            api_key: "super-secret".into(),
            ..Default::default()
        };
        assert!(!format!("{upstream:?}").contains("super-secret"));
        assert!(!serde_json::to_string(&upstream).unwrap().contains("super-secret"));
    }
}
