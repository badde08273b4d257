// ============================================================
// PRESENTATION ADAPTER
// ============================================================
// Map computed views and metrics to chart specs, tables and cards

use std::collections::HashMap;

use crate::domain::chart::{BarChart, Histogram, Palette};
use crate::domain::dashboard::{ControlSurface, FilterStatus, MetricCard, SessionInfo};
use crate::domain::dataset::{
    ColumnRoles, Dataset, Session, Summary, TOP_N_DEFAULT, TOP_N_MAX, TOP_N_MIN,
};

pub struct PresentationAdapter {
    histogram_bins: usize,
}

impl PresentationAdapter {
    pub fn new(histogram_bins: usize) -> Self {
        Self { histogram_bins }
    }

    pub fn filter_status(&self, filtered_rows: usize, total_rows: usize) -> FilterStatus {
        FilterStatus {
            filtered_rows,
            total_rows,
            message: format!(
                "Current filter result: {} / {} rows",
                format_thousands(filtered_rows as f64, 0),
                format_thousands(total_rows as f64, 0)
            ),
        }
    }

    /// Headline cards: rows, total valuation, Top-N share
    pub fn metric_cards(&self, summary: &Summary, roles: &ColumnRoles) -> Vec<MetricCard> {
        vec![
            MetricCard {
                label: "Rows".to_string(),
                value: format_thousands(summary.row_count as f64, 0),
            },
            MetricCard {
                label: format!("Total {}", roles.val_col),
                value: format_thousands(summary.total_valuation, 0),
            },
            MetricCard {
                label: format!("Top {} share (sum)", summary.top_n),
                value: summary.top_n_share.display(),
            },
        ]
    }

    /// Bar chart of the Top-N view, one color per distinct name
    pub fn top_chart(
        &self,
        top: &Dataset,
        roles: &ColumnRoles,
        top_n: usize,
        palette: Palette,
    ) -> BarChart {
        let x: Vec<String> = top
            .column(&roles.name_col)
            .map(|c| {
                (0..top.row_count())
                    .map(|row| c.display_at(row).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default();

        let y: Vec<Option<f64>> = top
            .column(&roles.val_col)
            .map(|c| (0..top.row_count()).map(|row| c.numeric_at(row)).collect())
            .unwrap_or_default();

        BarChart {
            title: format!("Top {} {} (by {})", top_n, roles.name_col, roles.val_col),
            colors: color_by_category(&x, palette),
            x,
            y,
            x_title: String::new(),
            y_title: roles.val_col.clone(),
        }
    }

    /// Ownership then weight histograms, for the ones that exist and are numeric
    pub fn histograms(&self, view: &Dataset, roles: &ColumnRoles, palette: Palette) -> Vec<Histogram> {
        [roles.own_col.as_deref(), roles.wgt_col.as_deref()]
            .into_iter()
            .flatten()
            .filter_map(|name| view.column(name))
            .filter(|column| column.is_numeric())
            .map(|column| Histogram {
                title: format!("{} distribution", column.name),
                column: column.name.clone(),
                values: column.numeric_values(),
                nbins: self.histogram_bins,
                colors: palette.colors().iter().map(|c| c.to_string()).collect(),
            })
            .collect()
    }

    pub fn session_info(&self, session: &Session) -> SessionInfo {
        SessionInfo {
            file_name: session.file_name.clone(),
            encoding: session.encoding.label().to_string(),
            roles: session.roles.clone(),
        }
    }

    /// Bounds and options for the dashboard controls
    pub fn control_surface(&self, session: &Session) -> ControlSurface {
        ControlSurface {
            info: self.session_info(session),
            total_rows: session.dataset.row_count(),
            columns: session.dataset.headers(),
            top_n_min: TOP_N_MIN,
            top_n_max: TOP_N_MAX,
            top_n_default: TOP_N_DEFAULT,
            ranges: session.bounds,
            rank_metrics: session
                .roles
                .rank_metrics()
                .into_iter()
                .map(str::to_string)
                .collect(),
            palettes: Palette::ALL.to_vec(),
        }
    }
}

/// Assign palette colors to categories in order of first appearance
fn color_by_category(categories: &[String], palette: Palette) -> Vec<String> {
    let colors = palette.colors();
    let mut assigned: HashMap<&str, usize> = HashMap::new();

    categories
        .iter()
        .map(|category| {
            let next = assigned.len();
            let idx = *assigned.entry(category.as_str()).or_insert(next);
            colors[idx % colors.len()].to_string()
        })
        .collect()
}

/// Format with `,` thousands separators and a fixed number of decimals
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}
