//! Proxy error types.
//!
//! Upstream application errors (non-2xx) are relayed as-is and never become
//! a [`RelayError`]. Everything else that goes wrong while forwarding ends in
//! the fixed-shape [`ProxyFailure`] body with status 500.

use crate::metrics::ErrorKind;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures while forwarding a request.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to read upstream error body: {0}")]
    UpstreamBody(#[source] reqwest::Error),

    #[error("failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl RelayError {
    /// Metrics category for this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RelayError::Transport(_) | RelayError::UpstreamBody(_) => ErrorKind::Transport,
            RelayError::Serialize(_) => ErrorKind::Internal,
        }
    }
}

/// Body of the proxy's own 500 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyFailure {
    pub error: String,
    pub message: String,
    pub path: String,
}

impl ProxyFailure {
    pub const LABEL: &'static str = "Internal Server Error in Proxy";

    pub fn new(message: impl Into<String>, path: &str) -> Self {
        Self {
            error: Self::LABEL.to_string(),
            message: message.into(),
            path: path.to_string(),
        }
    }
}

impl From<(&RelayError, &str)> for ProxyFailure {
    fn from((err, path): (&RelayError, &str)) -> Self {
        Self::new(err.to_string(), path)
    }
}

impl IntoResponse for ProxyFailure {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_failure_shape() {
        let failure = ProxyFailure::new("connection refused", "tiktok/analytics");
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["error"], "Internal Server Error in Proxy");
        assert_eq!(json["message"], "connection refused");
        assert_eq!(json["path"], "tiktok/analytics");
    }

    #[test]
    fn test_proxy_failure_is_500() {
        let response = ProxyFailure::new("boom", "").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_serialize_error_kind() {
        let err: RelayError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.to_string().starts_with("failed to serialize"));
    }
}
