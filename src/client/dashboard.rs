//! Dashboard state: KPIs per platform and top influencers.

use super::{
    ClientError, DateFilter, DateRange, FetchError, Influencer, Kpi, PerformerFilter, Platform,
    WebhookClient,
};
use tracing::{error, info};

/// Which KPI the dashboard is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpiView {
    All,
    Platform(Platform),
}

/// KPIs keyed by platform, plus the cross-platform aggregate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KpiByPlatform {
    pub tiktok: Option<Kpi>,
    pub youtube: Option<Kpi>,
    pub all: Option<Kpi>,
}

impl KpiByPlatform {
    pub fn get(&self, view: KpiView) -> Option<&Kpi> {
        match view {
            KpiView::All => self.all.as_ref(),
            KpiView::Platform(Platform::Tiktok) => self.tiktok.as_ref(),
            KpiView::Platform(Platform::Youtube) => self.youtube.as_ref(),
        }
    }

    /// Store one platform's KPI and refresh `all`.
    ///
    /// With a single platform loaded, `all` is that platform's KPI as sent
    /// upstream. Ratios are only recomputed once both platforms are present.
    pub fn set(&mut self, platform: Platform, kpi: Kpi) {
        match platform {
            Platform::Tiktok => self.tiktok = Some(kpi),
            Platform::Youtube => self.youtube = Some(kpi),
        }
        self.all = match (&self.tiktok, &self.youtube) {
            (Some(tiktok), Some(youtube)) => Kpi::combine([tiktok, youtube]),
            (Some(only), None) | (None, Some(only)) => Some(*only),
            (None, None) => None,
        };
    }
}

/// Result of one successful dashboard fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub platform: Platform,
    pub kpi: Kpi,
    pub influencers: Vec<Influencer>,
}

/// Dashboard view state, passed into and returned from [`DashboardState::refresh`].
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub influencers: Vec<Influencer>,
    pub kpi: KpiByPlatform,
    pub is_loading: bool,
    pub error: Option<FetchError>,
}

impl DashboardState {
    /// Mark a fetch as started and clear the previous error.
    pub fn begin(mut self) -> Self {
        self.is_loading = true;
        self.error = None;
        self
    }

    /// Apply a fetch outcome. On failure the previous data is kept.
    pub fn complete(mut self, result: Result<DashboardData, ClientError>) -> Self {
        match result {
            Ok(data) => {
                self.kpi.set(data.platform, data.kpi);
                self.influencers = data.influencers;
            }
            Err(e) => {
                error!(error = %e, "Dashboard fetch failed");
                self.error = Some(FetchError::from(&e));
            }
        }
        self.is_loading = false;
        self
    }

    /// Fetch KPIs and best performers for `range` (all time when `None`).
    pub async fn refresh(
        self,
        client: &WebhookClient,
        range: Option<&DateRange>,
        limit: u32,
    ) -> Self {
        let state = self.begin();
        let result = fetch_dashboard(client, Platform::Tiktok, range, limit).await;
        state.complete(result)
    }
}

/// Fetch analytics and best performers for one platform concurrently.
pub async fn fetch_dashboard(
    client: &WebhookClient,
    platform: Platform,
    range: Option<&DateRange>,
    limit: u32,
) -> Result<DashboardData, ClientError> {
    let dates = DateFilter::from_range(range);
    let performers = PerformerFilter { dates, limit };

    let (kpi, influencers) = tokio::try_join!(
        client.analytics(platform, &dates),
        client.best_performers(platform, &performers),
    )?;

    info!(
        platform = %platform,
        influencers = influencers.len(),
        "Dashboard data fetched"
    );

    Ok(DashboardData {
        platform,
        kpi,
        influencers,
    })
}
