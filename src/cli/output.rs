//! Output formatting helpers for CLI commands

use crate::client::{ChartPoint, Influencer, Kpi, KpiByPlatform};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use serde_json::json;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

fn numeric(value: String) -> Cell {
    Cell::new(value).set_alignment(CellAlignment::Right)
}

/// Colour a ratio green when it is profitable, red otherwise.
fn ratio(value: f64, break_even: f64) -> String {
    let text = format!("{:.2}", value);
    if value >= break_even {
        text.green().to_string()
    } else {
        text.red().to_string()
    }
}

/// Format the KPI cards as a table, one row per view.
pub fn format_kpi_table(kpi: &KpiByPlatform) -> String {
    let mut table = new_table(vec!["View", "Revenue", "Cost", "ROI", "ROAS"]);

    let rows: [(&str, Option<&Kpi>); 3] = [
        ("All", kpi.all.as_ref()),
        ("TikTok", kpi.tiktok.as_ref()),
        ("YouTube", kpi.youtube.as_ref()),
    ];

    for (label, value) in rows {
        match value {
            Some(k) => table.add_row(vec![
                Cell::new(label),
                numeric(money(k.total_gross_revenue)),
                numeric(money(k.total_cost)),
                numeric(ratio(k.global_roi_decimal, 0.0)),
                numeric(ratio(k.global_roas, 1.0)),
            ]),
            None => table.add_row(vec![
                Cell::new(label),
                Cell::new("-".dimmed()),
                Cell::new("-".dimmed()),
                Cell::new("-".dimmed()),
                Cell::new("-".dimmed()),
            ]),
        };
    }

    table.to_string()
}

/// Format influencers as a ranked table
pub fn format_influencers_table(influencers: &[Influencer]) -> String {
    let mut table = new_table(vec!["#", "Account", "Platform", "Revenue", "Cost", "ROI", "ROAS"]);

    for (i, inf) in influencers.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&inf.account),
            Cell::new(inf.platform),
            numeric(money(inf.total_revenue)),
            numeric(money(inf.total_cost)),
            numeric(ratio(inf.avg_roi, 0.0)),
            numeric(ratio(inf.roas, 1.0)),
        ]);
    }

    table.to_string()
}

/// Format the dashboard as JSON
pub fn format_dashboard_json(
    kpi: &KpiByPlatform,
    influencers: &[Influencer],
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "kpi": {
            "all": kpi.all,
            "tiktok": kpi.tiktok,
            "youtube": kpi.youtube,
        },
        "influencers": influencers,
    }))
}

/// Format aggregated chart points as a table with a totals row
pub fn format_chart_table(points: &[ChartPoint]) -> String {
    let mut table = new_table(vec!["Date", "Revenue", "Ad Spend", "Net"]);

    let mut revenue = 0.0;
    let mut spend = 0.0;
    for p in points {
        revenue += p.revenue;
        spend += p.spend;
        table.add_row(vec![
            Cell::new(&p.graph_date),
            numeric(money(p.revenue)),
            numeric(money(p.spend)),
            numeric(net(p.revenue - p.spend)),
        ]);
    }

    if !points.is_empty() {
        table.add_row(vec![
            Cell::new("Total".bold()),
            numeric(money(revenue)),
            numeric(money(spend)),
            numeric(net(revenue - spend)),
        ]);
    }

    table.to_string()
}

fn net(value: f64) -> String {
    if value < 0.0 {
        money(value).red().to_string()
    } else {
        money(value).green().to_string()
    }
}

/// Format aggregated chart points as JSON
pub fn format_chart_json(points: &[ChartPoint]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({ "data": points }))
}
