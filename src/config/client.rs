//! Dashboard client configuration

use serde::{Deserialize, Serialize};

/// Settings used by the `dashboard` and `insights` commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Proxy mount (or webhook base) the client posts to.
    pub base_url: String,
    /// Number of best performers requested when none is given.
    pub default_limit: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api/proxy/n8n".to_string(),
            default_limit: 10,
        }
    }
}
