//! Proxy route configuration

use serde::{Deserialize, Serialize};

/// Path prefix the proxy is mounted under.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub prefix: String,
    /// Largest inbound body read before giving up on it.
    pub max_body_bytes: usize,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            prefix: "/api/proxy/n8n".to_string(),
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}
