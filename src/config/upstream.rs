//! Upstream webhook configuration

use serde::{Deserialize, Serialize};

/// Base URL used when neither the config file nor `N8N_WEBHOOK_URL` set one.
pub const DEFAULT_WEBHOOK_URL: &str = "https://n8n.aldazosa-n8n.xyz/webhook";

/// Environment variable selecting the upstream webhook base URL.
pub const WEBHOOK_URL_ENV: &str = "N8N_WEBHOOK_URL";

/// Where proxied requests are sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    /// Overall timeout for one upstream call. Unset means the HTTP client
    /// default (no timeout).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WEBHOOK_URL.to_string(),
            timeout_seconds: None,
        }
    }
}
