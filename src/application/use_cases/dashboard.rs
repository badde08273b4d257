// ============================================================
// DASHBOARD SERVICE
// ============================================================
// One full filter -> aggregate -> present run per user interaction

use tracing::debug;

use crate::application::use_cases::aggregator::Aggregator;
use crate::application::use_cases::export::export_csv;
use crate::application::use_cases::filter_engine::{FilterCriteria, FilterEngine};
use crate::application::use_cases::presentation::PresentationAdapter;
use crate::domain::dashboard::{ControlSurface, DashboardView};
use crate::domain::dashboard_config::DashboardConfig;
use crate::domain::dataset::{Dataset, FilterParams, Session};
use crate::domain::error::Result;

pub struct DashboardService {
    presentation: PresentationAdapter,
    preview_rows: usize,
}

impl DashboardService {
    pub fn new(histogram_bins: usize, preview_rows: usize) -> Self {
        Self {
            presentation: PresentationAdapter::new(histogram_bins),
            preview_rows,
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.histogram_bins, config.preview_rows)
    }

    pub fn controls(&self, session: &Session) -> ControlSurface {
        self.presentation.control_surface(session)
    }

    /// Filtered view for `params`, in source order
    pub fn filtered_view(&self, session: &Session, params: &FilterParams) -> Result<Dataset> {
        params.check()?;
        let criteria = FilterCriteria::resolve(params, &session.bounds);
        Ok(FilterEngine::new(session.roles.clone()).apply(&session.dataset, &criteria))
    }

    pub fn render(&self, session: &Session, params: &FilterParams) -> Result<DashboardView> {
        let roles = &session.roles;
        let view = self.filtered_view(session, params)?;
        let aggregator = Aggregator::new(roles.clone());

        let summary = aggregator.summarize(&view, params.top_n);
        let top = aggregator.top_by_valuation(&view, params.top_n);

        let rank_metric = params
            .rank_metric
            .clone()
            .unwrap_or_else(|| roles.val_col.clone());
        let ranked = aggregator.rank(&view, &rank_metric, params.ascending, params.top_n)?;

        debug!(
            keyword = ?params.active_keyword(),
            top_n = params.top_n,
            filtered = view.row_count(),
            total = session.dataset.row_count(),
            "Rendered dashboard"
        );

        Ok(DashboardView {
            status: self
                .presentation
                .filter_status(view.row_count(), session.dataset.row_count()),
            metrics: self.presentation.metric_cards(&summary, roles),
            top_table: top.project(&roles.projection()).to_table(),
            top_chart: self
                .presentation
                .top_chart(&top, roles, params.top_n, params.palette),
            histograms: self.presentation.histograms(&view, roles, params.palette),
            rank_table: ranked.to_table(),
            rank_metric,
            ascending: params.ascending,
            preview: view.head(self.preview_rows).to_table(),
            info: self.presentation.session_info(session),
            summary,
        })
    }

    /// CSV download of exactly the current filtered view
    pub fn export(&self, session: &Session, params: &FilterParams) -> Result<Vec<u8>> {
        let view = self.filtered_view(session, params)?;
        export_csv(&view)
    }
}
