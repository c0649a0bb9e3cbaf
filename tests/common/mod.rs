//! Shared test utilities for relay integration tests.
//!
//! Builds routers pointed at a wiremock server standing in for the n8n
//! webhook host, and helpers for driving them with `tower::Service::call`.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use relay::api::{create_router, AppState};
use relay::config::RelayConfig;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tower::Service;
use wiremock::MockServer;

/// Path the mock webhook host serves under.
pub const WEBHOOK_PATH: &str = "/webhook";

/// Proxy prefix used by the default config.
pub const PREFIX: &str = "/api/proxy/n8n";

/// UUID v4 string length: "xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx"
pub const UUID_V4_STRING_LEN: usize = 36;

/// Base URL of the mock webhook host.
pub fn webhook_base(mock_server: &MockServer) -> String {
    format!("{}{}", mock_server.uri(), WEBHOOK_PATH)
}

/// Create a router whose upstream is `base_url`.
pub fn make_app(base_url: &str) -> (axum::Router, Arc<AppState>) {
    let mut config = RelayConfig::default();
    config.upstream.base_url = base_url.to_string();
    let state = Arc::new(AppState::new(Arc::new(config)).unwrap());
    let router = create_router(Arc::clone(&state));
    (router, state)
}

/// Create a router forwarding to the mock server's `/webhook`.
pub fn make_app_with_mock(mock_server: &MockServer) -> (axum::Router, Arc<AppState>) {
    make_app(&webhook_base(mock_server))
}

/// Send one request through the router.
pub async fn send(app: &mut axum::Router, request: Request<Body>) -> Response<Body> {
    app.call(request).await.unwrap()
}

/// Build a request under the proxy prefix.
pub fn proxy_request(method: &str, path: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(format!("{}{}", PREFIX, path))
        .body(body)
        .unwrap()
}

/// Read a response body to a string.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

/// Read until the end of the request head. Bodies are ignored.
async fn read_request_head(socket: &mut TcpStream) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            return;
        }
        head.extend_from_slice(&buf[..n]);
    }
}

/// Upstream that answers 200 with a chunked body: `first` is sent right
/// away, `rest` only after the returned sender fires.
///
/// Returns the webhook base URL and the release handle.
pub async fn spawn_held_chunked_upstream(
    first: &'static str,
    rest: &'static str,
) -> (String, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (release, released) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request_head(&mut socket).await;

        let head = "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ntransfer-encoding: chunked\r\n\r\n";
        socket.write_all(head.as_bytes()).await.unwrap();
        socket
            .write_all(format!("{:x}\r\n{}\r\n", first.len(), first).as_bytes())
            .await
            .unwrap();
        socket.flush().await.unwrap();

        let _ = released.await;
        socket
            .write_all(format!("{:x}\r\n{}\r\n0\r\n\r\n", rest.len(), rest).as_bytes())
            .await
            .unwrap();
        socket.flush().await.unwrap();
    });

    (format!("http://{}{}", addr, WEBHOOK_PATH), release)
}

/// Upstream that answers 502 announcing a longer body than it sends, then
/// closes the connection, so reading the error body fails.
pub async fn spawn_truncated_error_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            read_request_head(&mut socket).await;
            let response = "HTTP/1.1 502 Bad Gateway\r\ncontent-type: text/plain\r\ncontent-length: 64\r\nconnection: close\r\n\r\nshort";
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}{}", addr, WEBHOOK_PATH)
}
