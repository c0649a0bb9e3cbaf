//! Webhook forwarding proxy handler.
//!
//! Forwards any request under the proxy prefix to the configured webhook
//! base URL and relays the answer:
//!
//! - 2xx: status and content type preserved, body streamed through
//! - non-2xx: body read fully, returned as JSON if it parses, else as text
//! - transport/internal failure: 500 with a [`ProxyFailure`] body
//!
//! Only `Content-Type: application/json` is sent upstream. Inbound headers,
//! `Authorization` included, are not forwarded.

use crate::api::{AppState, ProxyFailure, ProxyTarget, RelayError};
use crate::logging::generate_request_id;
use crate::metrics::ErrorKind;
use axum::{
    body::Body,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Content type sent upstream and assumed when upstream omits one.
const JSON_CONTENT_TYPE: &str = "application/json";

/// Handler registered for every supported method under the proxy prefix.
///
/// Never fails: every outcome is a well-formed response.
pub async fn forward(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    body: Body,
) -> Response {
    let start_time = Instant::now();
    let target = ProxyTarget::resolve(&state.config.upstream.base_url, &uri);
    let span = info_span!(
        "proxy",
        request_id = %generate_request_id(),
        method = %method,
        path = %target.sub_path,
    );

    async move {
        info!(url = %target.url, "Forwarding request");

        let response = match relay(&state, &method, &target, body).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Proxy request failed");
                state.metrics.record_error(e.kind());
                ProxyFailure::from((&e, target.sub_path.as_str())).into_response()
            }
        };

        state.metrics.record_request(
            method.as_str(),
            response.status().as_u16(),
            start_time.elapsed(),
        );
        response
    }
    .instrument(span)
    .await
}

/// Whether the inbound body is read for this method.
pub fn carries_body(method: &Method) -> bool {
    method != Method::GET && method != Method::HEAD
}

async fn relay(
    state: &AppState,
    method: &Method,
    target: &ProxyTarget,
    body: Body,
) -> Result<Response, RelayError> {
    let payload = if carries_body(method) {
        read_json_body(state, body).await
    } else {
        None
    };

    let mut request = state
        .http_client
        .request(method.clone(), &target.url)
        .header(CONTENT_TYPE, JSON_CONTENT_TYPE);
    if let Some(payload) = payload {
        request = request.body(serde_json::to_vec(&payload)?);
    }

    let upstream = request.send().await.map_err(RelayError::Transport)?;
    let status = upstream.status();
    info!(status = status.as_u16(), "Upstream responded");

    if !status.is_success() {
        let text = upstream.text().await.map_err(RelayError::UpstreamBody)?;
        state.metrics.record_error(ErrorKind::UpstreamStatus);
        error!(status = status.as_u16(), body = %text, "Upstream error response");
        return Ok(error_passthrough(status, text));
    }

    let content_type = upstream
        .headers()
        .get(CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(JSON_CONTENT_TYPE));

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    response.headers_mut().insert(CONTENT_TYPE, content_type);
    Ok(response)
}

/// Read and parse the inbound body. Empty, oversized or non-JSON bodies
/// yield `None` and the request continues without one.
async fn read_json_body(state: &AppState, body: Body) -> Option<Value> {
    let bytes = match axum::body::to_bytes(body, state.config.proxy.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "Could not read request body, forwarding without body");
            state.metrics.record_error(ErrorKind::BodyParse);
            return None;
        }
    };

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(payload) => {
            if state.config.logging.log_payloads {
                info!(payload = %payload, "Request body payload");
            } else {
                debug!(payload = %payload, "Request body payload");
            }
            Some(payload)
        }
        Err(_) => {
            warn!("Could not parse request body as JSON or body is empty, forwarding without body");
            state.metrics.record_error(ErrorKind::BodyParse);
            None
        }
    }
}

/// Relay an upstream error body with its original status.
fn error_passthrough(status: StatusCode, text: String) -> Response {
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => (status, Json(json)).into_response(),
        Err(_) => (status, [(CONTENT_TYPE, "text/plain")], text).into_response(),
    }
}
