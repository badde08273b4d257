// ============================================================
// COLUMN ROLES
// ============================================================
// Which dataset column plays which part in the dashboard

use serde::{Deserialize, Serialize};

/// Column roles, resolved once per load and never re-decided
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRoles {
    /// Display identifier of each row (stock name)
    pub name_col: String,

    /// Primary numeric ranking measure (valuation)
    pub val_col: String,

    /// Weight within the asset class, if present
    pub wgt_col: Option<String>,

    /// Ownership percentage, if present
    pub own_col: Option<String>,
}

impl ColumnRoles {
    /// Columns shown in ranked tables: name, valuation, then the optional
    /// measures that exist
    pub fn projection(&self) -> Vec<&str> {
        let mut cols = vec![self.name_col.as_str(), self.val_col.as_str()];
        cols.extend(self.wgt_col.as_deref());
        cols.extend(self.own_col.as_deref());
        cols
    }

    /// Metrics a ranking may sort by
    pub fn rank_metrics(&self) -> Vec<&str> {
        let mut metrics = vec![self.val_col.as_str()];
        metrics.extend(self.wgt_col.as_deref());
        metrics.extend(self.own_col.as_deref());
        metrics
    }

    pub fn is_rank_metric(&self, metric: &str) -> bool {
        self.rank_metrics().contains(&metric)
    }
}
