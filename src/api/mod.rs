//! # HTTP API
//!
//! The relay's HTTP surface.
//!
//! ## Endpoints
//!
//! - `GET|POST|PUT|PATCH|DELETE <prefix>/<...path>` - Forward to the webhook host
//!   (HEAD is served by the GET registration)
//! - `GET /health` - Liveness and configured upstream
//! - `GET /metrics` - Prometheus metrics
//!
//! ## Example
//!
//! ```no_run
//! use relay::api::{create_router, AppState};
//! use relay::config::RelayConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(RelayConfig::default());
//! let state = Arc::new(AppState::new(config)?);
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Request flow
//!
//! 1. The nested proxy service receives the path relative to the prefix
//! 2. [`ProxyTarget`] joins base URL, segments and query string
//! 3. Body (non-GET/HEAD only) is parsed leniently as JSON
//! 4. One upstream call, no retries
//! 5. Success streams through; upstream errors are relayed; anything else
//!    becomes a 500 [`ProxyFailure`]

pub mod error;
mod health;
pub mod proxy;
pub mod target;

pub use error::{ProxyFailure, RelayError};
pub use health::HealthResponse;
pub use target::ProxyTarget;

use crate::config::RelayConfig;
use crate::metrics::MetricsCollector;
use axum::{
    routing::{get, MethodRouter},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::trace::TraceLayer;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub http_client: reqwest::Client,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
    pub metrics: Arc<MetricsCollector>,
}

impl AppState {
    /// Create application state, building the pooled upstream client.
    pub fn new(config: Arc<RelayConfig>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().pool_max_idle_per_host(10);
        if let Some(secs) = config.upstream.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build()?;

        let start_time = Instant::now();
        let metrics = Arc::new(MetricsCollector::new(
            start_time,
            crate::metrics::setup_or_detached(),
        ));

        Ok(Self {
            config,
            http_client,
            start_time,
            metrics,
        })
    }
}

/// Create the main router with the proxy mounted under the configured prefix.
pub fn create_router(state: Arc<AppState>) -> Router {
    let prefix = state.config.proxy.prefix.clone();

    let proxy: MethodRouter = get(proxy::forward)
        .post(proxy::forward)
        .put(proxy::forward)
        .patch(proxy::forward)
        .delete(proxy::forward)
        .with_state(Arc::clone(&state));

    Router::new()
        .route("/health", get(health::handle))
        .route("/metrics", get(crate::metrics::handler::metrics_handler))
        .nest_service(&prefix, proxy)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
