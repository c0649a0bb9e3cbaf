//! Webhook client errors.

use thiserror::Error;

/// Why a webhook call failed.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected payload from '{endpoint}': {source}")]
    Schema {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Coarse category of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Transport,
    Status,
    Schema,
}

/// Error kept in dashboard/insights state after a failed refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FetchErrorKind,
    /// Full cause, for logs and `--json` output.
    pub detail: String,
}

impl FetchError {
    /// Single user-facing message. The dashboard does not distinguish
    /// upstream-reported errors from transport failures.
    pub fn message(&self) -> &'static str {
        "Failed to fetch data from n8n webhooks"
    }
}

impl From<&ClientError> for FetchError {
    fn from(err: &ClientError) -> Self {
        let kind = match err {
            ClientError::Transport(_) => FetchErrorKind::Transport,
            ClientError::Status { .. } => FetchErrorKind::Status,
            ClientError::Schema { .. } => FetchErrorKind::Schema,
        };
        Self {
            kind,
            detail: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_maps_to_status_kind() {
        let err = ClientError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        let fetch = FetchError::from(&err);
        assert_eq!(fetch.kind, FetchErrorKind::Status);
        assert_eq!(fetch.detail, "upstream returned 502: bad gateway");
        assert_eq!(fetch.message(), "Failed to fetch data from n8n webhooks");
    }

    #[test]
    fn test_schema_error_maps_to_schema_kind() {
        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = ClientError::Schema {
            endpoint: "tiktok/analytics".to_string(),
            source,
        };
        let fetch = FetchError::from(&err);
        assert_eq!(fetch.kind, FetchErrorKind::Schema);
        assert!(fetch.detail.contains("tiktok/analytics"));
    }
}
