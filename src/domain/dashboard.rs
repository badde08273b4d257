//! Dashboard view types
//! Everything a front end needs to draw one state of the dashboard

use serde::{Deserialize, Serialize};

use crate::domain::chart::{BarChart, Histogram, Palette};
use crate::domain::dataset::{ColumnRoles, RangeBounds, Summary, TableView};

/// A labelled headline number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricCard {
    pub label: String,
    pub value: String,
}

/// `filtered / total rows` status line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterStatus {
    pub filtered_rows: usize,
    pub total_rows: usize,
    pub message: String,
}

/// Which file and columns the session is using
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub file_name: String,
    pub encoding: String,
    pub roles: ColumnRoles,
}

/// Full rendered state for one set of filter parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub status: FilterStatus,
    pub summary: Summary,
    pub metrics: Vec<MetricCard>,
    /// Top-N by valuation, projected to the role columns
    pub top_table: TableView,
    pub top_chart: BarChart,
    pub histograms: Vec<Histogram>,
    /// Top-N by the chosen metric and direction
    pub rank_table: TableView,
    pub rank_metric: String,
    pub ascending: bool,
    pub preview: TableView,
    pub info: SessionInfo,
}

/// Bounds and options for the dashboard controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlSurface {
    pub info: SessionInfo,
    pub total_rows: usize,
    pub columns: Vec<String>,
    pub top_n_min: usize,
    pub top_n_max: usize,
    pub top_n_default: usize,
    pub ranges: RangeBounds,
    pub rank_metrics: Vec<String>,
    pub palettes: Vec<Palette>,
}
