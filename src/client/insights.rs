//! Insights state: daily revenue vs. ad spend.

use super::types::parse_graph_date;
use super::{ChartPoint, ClientError, DailyData, FetchError, WebhookClient};
use std::collections::HashMap;
use tracing::error;

/// Insights view state, passed into and returned from [`InsightsState::refresh`].
#[derive(Debug, Clone, Default)]
pub struct InsightsState {
    pub daily_data: Vec<DailyData>,
    pub is_loading: bool,
    pub error: Option<FetchError>,
}

impl InsightsState {
    pub fn begin(mut self) -> Self {
        self.is_loading = true;
        self.error = None;
        self
    }

    /// Apply a fetch outcome. On failure the previous rows are kept.
    pub fn complete(mut self, result: Result<Vec<DailyData>, ClientError>) -> Self {
        match result {
            Ok(rows) => self.daily_data = rows,
            Err(e) => {
                error!(error = %e, "Insights fetch failed");
                self.error = Some(FetchError::from(&e));
            }
        }
        self.is_loading = false;
        self
    }

    pub async fn refresh(self, client: &WebhookClient) -> Self {
        let state = self.begin();
        let result = client.chart_data().await;
        state.complete(result)
    }

    /// Chart series for the current rows.
    pub fn chart(&self) -> Vec<ChartPoint> {
        aggregate_daily(&self.daily_data)
    }
}

/// Sum revenue and spend per `graph_date`, ordered by date.
///
/// Dates that do not parse sort after all parsable ones, by their text.
pub fn aggregate_daily(rows: &[DailyData]) -> Vec<ChartPoint> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut points: Vec<ChartPoint> = Vec::new();

    for row in rows {
        match index.get(row.graph_date.as_str()) {
            Some(&i) => {
                points[i].revenue += row.daily_revenue;
                points[i].spend += row.daily_ad_spend;
            }
            None => {
                index.insert(row.graph_date.as_str(), points.len());
                points.push(ChartPoint {
                    graph_date: row.graph_date.clone(),
                    revenue: row.daily_revenue,
                    spend: row.daily_ad_spend,
                });
            }
        }
    }

    points.sort_by(|a, b| {
        let da = parse_graph_date(&a.graph_date);
        let db = parse_graph_date(&b.graph_date);
        (da.is_none(), da, &a.graph_date).cmp(&(db.is_none(), db, &b.graph_date))
    });
    points
}
