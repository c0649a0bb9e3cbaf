//! Dashboard Relay - n8n webhook forwarding proxy and analytics client
//!
//! This library provides the HTTP relay that fronts the n8n webhook host for
//! the marketing analytics dashboard, and the typed client the dashboard
//! uses to read KPIs, best performers and daily chart data through it.

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod logging;
pub mod metrics;
