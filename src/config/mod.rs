//! Configuration module for the relay
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`N8N_WEBHOOK_URL`, `RELAY_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use relay::config::RelayConfig;
//!
//! let config = RelayConfig::default();
//! assert_eq!(config.server.port, 3000);
//!
//! let toml = r#"
//! [upstream]
//! base_url = "http://n8n.internal/webhook"
//! "#;
//! let config: RelayConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.upstream.base_url, "http://n8n.internal/webhook");
//! assert_eq!(config.proxy.prefix, "/api/proxy/n8n");
//! ```

pub mod client;
pub mod error;
pub mod logging;
pub mod proxy;
pub mod server;
pub mod upstream;

pub use client::ClientConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use proxy::ProxyConfig;
pub use server::ServerConfig;
pub use upstream::{UpstreamConfig, DEFAULT_WEBHOOK_URL, WEBHOOK_URL_ENV};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the relay server and the dashboard client.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener settings
    pub server: ServerConfig,
    /// Webhook host requests are forwarded to
    pub upstream: UpstreamConfig,
    /// Proxy route settings
    pub proxy: ProxyConfig,
    /// Dashboard client settings
    pub client: ClientConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl RelayConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup`.
    ///
    /// Invalid values are ignored and the current value is kept.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(WEBHOOK_URL_ENV).filter(|u| !u.is_empty()) {
            self.upstream.base_url = url;
        }

        if let Some(port) = lookup("RELAY_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Some(host) = lookup("RELAY_HOST") {
            self.server.host = host;
        }

        if let Some(level) = lookup("RELAY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("RELAY_LOG_FORMAT").and_then(|f| f.parse().ok()) {
            self.logging.format = format;
        }

        if let Some(url) = lookup("RELAY_CLIENT_URL").filter(|u| !u.is_empty()) {
            self.client.base_url = url;
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }

        validate_http_url("upstream.base_url", &self.upstream.base_url)?;
        validate_http_url("client.base_url", &self.client.base_url)?;

        let prefix = &self.proxy.prefix;
        if !prefix.starts_with('/') || prefix.len() < 2 || prefix.ends_with('/') {
            return Err(ConfigError::Validation {
                field: "proxy.prefix".to_string(),
                message: format!(
                    "prefix must start with '/' and not end with '/', got '{}'",
                    prefix
                ),
            });
        }

        if self.proxy.max_body_bytes == 0 {
            return Err(ConfigError::Validation {
                field: "proxy.max_body_bytes".to_string(),
                message: "limit must be non-zero".to_string(),
            });
        }

        Ok(())
    }
}

fn validate_http_url(field: &str, url: &str) -> Result<(), ConfigError> {
    if url.is_empty() {
        return Err(ConfigError::Validation {
            field: field.to_string(),
            message: "URL cannot be empty".to_string(),
        });
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::Validation {
            field: field.to_string(),
            message: format!("URL must use http or https, got '{}'", url),
        });
    }
    Ok(())
}
