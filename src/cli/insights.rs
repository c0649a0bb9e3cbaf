//! Insights command implementation

use crate::cli::output::{format_chart_json, format_chart_table};
use crate::cli::{load_client_config, InsightsArgs};
use crate::client::{InsightsState, WebhookClient};

/// Handle `relay insights`: fetch chart data and render the daily aggregate.
pub async fn handle_insights(args: &InsightsArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = load_client_config(&args.config)?;
    let base_url = args
        .base_url
        .clone()
        .unwrap_or_else(|| config.client.base_url.clone());

    let client = WebhookClient::new(base_url)?;
    let state = InsightsState::default().refresh(&client).await;

    if let Some(err) = state.error {
        return Err(format!("{} ({})", err.message(), err.detail).into());
    }

    let points = state.chart();
    if args.json {
        Ok(format_chart_json(&points)?)
    } else {
        Ok(format_chart_table(&points))
    }
}
