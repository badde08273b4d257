// ============================================================
// AGGREGATOR & RANKER
// ============================================================
// Summary statistics and stable Top-N views over a filtered dataset

use std::cmp::Ordering;

use crate::domain::dataset::{ColumnRoles, Dataset, Summary, TopNShare};
use crate::domain::error::{AppError, Result};

pub struct Aggregator {
    roles: ColumnRoles,
}

impl Aggregator {
    pub fn new(roles: ColumnRoles) -> Self {
        Self { roles }
    }

    /// Row/column counts, total valuation and Top-N weight share
    pub fn summarize(&self, view: &Dataset, top_n: usize) -> Summary {
        Summary {
            row_count: view.row_count(),
            column_count: view.column_count(),
            total_valuation: self.total_valuation(view),
            top_n,
            top_n_share: self.top_n_share(view, top_n),
        }
    }

    /// Sum of the valuation column; non-numeric and null cells add nothing
    pub fn total_valuation(&self, view: &Dataset) -> f64 {
        view.column(&self.roles.val_col)
            .map(|c| c.numeric_values().into_iter().sum::<f64>())
            .unwrap_or(0.0)
    }

    /// Summed weight of the Top-N rows by valuation, or `Unavailable` when
    /// the dataset has no weight column
    pub fn top_n_share(&self, view: &Dataset, top_n: usize) -> TopNShare {
        let Some(wgt) = self.roles.wgt_col.as_deref().and_then(|w| view.column(w)) else {
            return TopNShare::Unavailable;
        };

        let share: f64 = self
            .sorted_rows(view, &self.roles.val_col, false)
            .into_iter()
            .take(top_n)
            .filter_map(|row| wgt.numeric_at(row))
            .sum();

        TopNShare::Available(share)
    }

    /// Top-N rows by valuation, descending, with every column kept
    pub fn top_by_valuation(&self, view: &Dataset, top_n: usize) -> Dataset {
        let rows: Vec<usize> = self
            .sorted_rows(view, &self.roles.val_col, false)
            .into_iter()
            .take(top_n)
            .collect();
        view.select_rows(&rows)
    }

    /// Top-N rows by `metric` in the requested direction, projected to the
    /// role columns
    pub fn rank(&self, view: &Dataset, metric: &str, ascending: bool, top_n: usize) -> Result<Dataset> {
        if !self.roles.is_rank_metric(metric) {
            return Err(AppError::ValidationError(format!(
                "Unknown rank metric '{}', expected one of {:?}",
                metric,
                self.roles.rank_metrics()
            )));
        }

        let rows: Vec<usize> = self
            .sorted_rows(view, metric, ascending)
            .into_iter()
            .take(top_n)
            .collect();

        Ok(view.select_rows(&rows).project(&self.roles.projection()))
    }

    /// Row indices stably sorted by `column`. Ties keep their incoming order
    /// and nulls go last in either direction.
    pub fn sorted_rows(&self, view: &Dataset, column: &str, ascending: bool) -> Vec<usize> {
        let mut rows: Vec<usize> = (0..view.row_count()).collect();
        let Some(col) = view.column(column) else {
            return rows;
        };

        rows.sort_by(|&a, &b| match col.compare_rows(a, b) {
            Some(order) if ascending => order,
            Some(order) => order.reverse(),
            None => match (col.is_null_at(a), col.is_null_at(b)) {
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                _ => Ordering::Equal,
            },
        });
        rows
    }
}
