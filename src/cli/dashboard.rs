//! Dashboard command implementation

use crate::cli::output::{format_dashboard_json, format_influencers_table, format_kpi_table};
use crate::cli::{load_client_config, DashboardArgs};
use crate::client::{DashboardState, DateRange, WebhookClient};

/// Handle `relay dashboard`: one refresh, rendered as tables or JSON.
pub async fn handle_dashboard(args: &DashboardArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = load_client_config(&args.config)?;
    let base_url = args
        .base_url
        .clone()
        .unwrap_or_else(|| config.client.base_url.clone());
    let limit = args.limit.unwrap_or(config.client.default_limit);

    let range = args.from.map(|from| DateRange { from, to: args.to });

    let client = WebhookClient::new(base_url)?;
    let state = DashboardState::default()
        .refresh(&client, range.as_ref(), limit)
        .await;

    if let Some(err) = state.error {
        return Err(format!("{} ({})", err.message(), err.detail).into());
    }

    render(&state, args.json)
}

fn render(state: &DashboardState, json: bool) -> Result<String, Box<dyn std::error::Error>> {
    if json {
        return Ok(format_dashboard_json(&state.kpi, &state.influencers)?);
    }
    Ok(format!(
        "{}\n\nBest performers\n{}",
        format_kpi_table(&state.kpi),
        format_influencers_table(&state.influencers)
    ))
}
