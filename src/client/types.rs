//! Payload schemas exchanged with the webhook backend.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ad platform an analytics endpoint is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Tiktok,
    Youtube,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Tiktok, Platform::Youtube];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Tiktok => "tiktok",
            Platform::Youtube => "youtube",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tiktok" => Ok(Platform::Tiktok),
            "youtube" => Ok(Platform::Youtube),
            _ => Err(format!("Unknown platform: {}", s)),
        }
    }
}

/// Date range picked by the user. A missing end means a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: Option<DateTime<Utc>>,
}

/// `from`/`to` bounds sent to analytics endpoints. Both `null` means all time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DateFilter {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateFilter {
    pub fn all_time() -> Self {
        Self::default()
    }

    pub fn from_range(range: Option<&DateRange>) -> Self {
        match range {
            Some(r) => Self {
                from: Some(r.from),
                to: Some(r.to.unwrap_or(r.from)),
            },
            None => Self::all_time(),
        }
    }
}

/// Filter for best-performer endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformerFilter {
    #[serde(flatten)]
    pub dates: DateFilter,
    pub limit: u32,
}

/// Aggregate revenue/cost figures for one platform and time window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    #[serde(deserialize_with = "lenient_f64")]
    pub total_gross_revenue: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub total_cost: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub global_roi_decimal: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub global_roas: f64,
}

impl Kpi {
    /// Build a KPI from totals; ratios are 0 when there is no cost.
    pub fn from_totals(revenue: f64, cost: f64) -> Self {
        let (roi, roas) = if cost == 0.0 {
            (0.0, 0.0)
        } else {
            ((revenue - cost) / cost, revenue / cost)
        };
        Self {
            total_gross_revenue: revenue,
            total_cost: cost,
            global_roi_decimal: roi,
            global_roas: roas,
        }
    }

    /// Sum several KPIs, recomputing the ratios. `None` for an empty input.
    pub fn combine<'a, I>(kpis: I) -> Option<Kpi>
    where
        I: IntoIterator<Item = &'a Kpi>,
    {
        let mut iter = kpis.into_iter().peekable();
        iter.peek()?;
        let (revenue, cost) = iter.fold((0.0, 0.0), |(r, c), k| {
            (r + k.total_gross_revenue, c + k.total_cost)
        });
        Some(Kpi::from_totals(revenue, cost))
    }
}

/// Influencer record as sent by the best-performers endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct InfluencerRecord {
    pub account: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub total_revenue: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub total_cost: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub avg_roi: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub roas: f64,
}

impl InfluencerRecord {
    pub(crate) fn on(self, platform: Platform) -> Influencer {
        Influencer {
            account: self.account,
            total_revenue: self.total_revenue,
            total_cost: self.total_cost,
            avg_roi: self.avg_roi,
            roas: self.roas,
            platform,
        }
    }
}

/// Influencer performance, tagged with the platform it was fetched for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Influencer {
    pub account: String,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub avg_roi: f64,
    pub roas: f64,
    pub platform: Platform,
}

/// One row of the chart-data endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyData {
    pub graph_date: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub daily_revenue: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub daily_ad_spend: f64,
}

/// Revenue and spend summed for one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub graph_date: String,
    pub revenue: f64,
    pub spend: f64,
}

/// Parse a chart date given as `YYYY-MM-DD` or RFC 3339.
pub fn parse_graph_date(s: &str) -> Option<NaiveDateTime> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.naive_utc())
}

/// Accept numbers or numeric strings; SQL aggregates often arrive as text.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid number: {:?}", s))),
    }
}
