//! Metrics exposition test.
//!
//! Kept in its own binary: only the first `AppState` in a process owns the
//! global recorder.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_string, make_app_with_mock, proxy_request, send};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_metrics_endpoint_counts_proxied_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
        .mount(&mock_server)
        .await;

    let (mut app, _) = make_app_with_mock(&mock_server);
    send(&mut app, proxy_request("POST", "/x", Body::from("not-json"))).await;

    let request = Request::builder()
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();
    let response = send(&mut app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = body_string(response).await;
    assert!(text.contains("relay_requests_total"));
    assert!(text.contains(r#"status="404""#));
    assert!(text.contains(r#"kind="upstream_status""#));
    assert!(text.contains(r#"kind="body_parse""#));
    assert!(text.contains("relay_request_duration_seconds"));
}
