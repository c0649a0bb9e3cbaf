//! # Webhook Client
//!
//! Typed client for the analytics webhooks, plus the state objects the
//! dashboard keeps between refreshes.
//!
//! The client can point at the relay's proxy mount
//! (`http://localhost:3000/api/proxy/n8n`) or straight at the webhook base.
//! Every payload is decoded into an explicit schema; a mismatch is reported
//! as [`ClientError::Schema`] rather than surfacing missing fields later.

pub mod dashboard;
pub mod error;
pub mod insights;
pub mod types;

pub use dashboard::{DashboardData, DashboardState, KpiByPlatform, KpiView};
pub use error::{ClientError, FetchError, FetchErrorKind};
pub use insights::{aggregate_daily, InsightsState};
pub use types::{
    ChartPoint, DailyData, DateFilter, DateRange, Influencer, Kpi, PerformerFilter, Platform,
};

use crate::api::target::build_target_url;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use types::InfluencerRecord;

/// Client for the webhook endpoints the dashboard reads.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: reqwest::Client,
    base_url: String,
}

impl WebhookClient {
    /// Create a client with its own connection pool.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client sharing an existing connection pool.
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an endpoint below the base.
    pub fn endpoint(&self, path: &str) -> String {
        build_target_url(&self.base_url, path.trim_start_matches('/'), None)
    }

    /// POST `<platform>/analytics`.
    ///
    /// n8n answers either with the KPI object or with a one-item array
    /// holding it; both are accepted.
    pub async fn analytics(
        &self,
        platform: Platform,
        filter: &DateFilter,
    ) -> Result<Kpi, ClientError> {
        let path = format!("{}/analytics", platform);
        let value = match self.post(&path, filter).await? {
            Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
            other => other,
        };
        decode(&path, value)
    }

    /// POST `<platform>/best-performers`.
    ///
    /// A response that is not an array yields an empty list. Each record is
    /// tagged with `platform`.
    pub async fn best_performers(
        &self,
        platform: Platform,
        filter: &PerformerFilter,
    ) -> Result<Vec<Influencer>, ClientError> {
        let path = format!("{}/best-performers", platform);
        match self.post(&path, filter).await? {
            value @ Value::Array(_) => {
                let records: Vec<InfluencerRecord> = decode(&path, value)?;
                Ok(records.into_iter().map(|r| r.on(platform)).collect())
            }
            _ => {
                warn!(endpoint = %path, "Best performers response is not an array");
                Ok(Vec::new())
            }
        }
    }

    /// POST `chart-data` with an empty filter object.
    ///
    /// Accepts a bare array or an object with a `data` array.
    pub async fn chart_data(&self) -> Result<Vec<DailyData>, ClientError> {
        let path = "chart-data";
        match self.post(path, &serde_json::json!({})).await? {
            value @ Value::Array(_) => decode(path, value),
            Value::Object(mut map) => match map.remove("data") {
                Some(data @ Value::Array(_)) => decode(path, data),
                _ => Ok(Vec::new()),
            },
            _ => Ok(Vec::new()),
        }
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ClientError> {
        let url = self.endpoint(path);
        debug!(url = %url, "Posting to webhook");

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(url = %url, status = status.as_u16(), "Webhook returned error status");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| ClientError::Schema {
            endpoint: path.to_string(),
            source,
        })
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|source| ClientError::Schema {
        endpoint: endpoint.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base() {
        let client = WebhookClient::new("http://localhost:3000/api/proxy/n8n/").unwrap();
        assert_eq!(
            client.endpoint("tiktok/analytics"),
            "http://localhost:3000/api/proxy/n8n/tiktok/analytics"
        );
        assert_eq!(
            client.endpoint("/chart-data"),
            "http://localhost:3000/api/proxy/n8n/chart-data"
        );
    }

    #[test]
    fn test_decode_schema_error_names_endpoint() {
        let err = decode::<Kpi>("tiktok/analytics", serde_json::json!({"oops": 1})).unwrap_err();
        match err {
            ClientError::Schema { endpoint, .. } => assert_eq!(endpoint, "tiktok/analytics"),
            other => panic!("expected schema error, got {:?}", other),
        }
    }
}
