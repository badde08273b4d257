// ============================================================
// SUMMARY METRICS
// ============================================================
// Aggregates computed over a filtered view

use serde::{Deserialize, Serialize};

/// Cumulative weight of the Top-N rows by valuation.
///
/// `Unavailable` means the dataset has no weight column; it is not the same
/// as a share of zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "camelCase")]
pub enum TopNShare {
    Available(f64),
    Unavailable,
}

impl TopNShare {
    /// `12.34%`, or `-` when there is no weight column
    pub fn display(&self) -> String {
        match self {
            TopNShare::Available(v) => format!("{:.2}%", v),
            TopNShare::Unavailable => "-".to_string(),
        }
    }
}

/// Summary statistics of a filtered view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub row_count: usize,
    pub column_count: usize,
    /// Sum of valuation; non-numeric cells contribute nothing
    pub total_valuation: f64,
    pub top_n: usize,
    pub top_n_share: TopNShare,
}
