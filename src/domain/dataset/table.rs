// ============================================================
// DATASET TABLE
// ============================================================
// Immutable, column-oriented table plus the raw table it is built from

use serde::{Deserialize, Serialize};

use super::Column;
use crate::domain::error::{AppError, Result};

/// Table as decoded from a delimited file, before any typing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    /// Header names, de-duplicated
    pub headers: Vec<String>,

    /// Records, each padded to the header width. `None` marks an empty cell.
    pub records: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Cells of one column, top to bottom
    pub fn column_cells(&self, index: usize) -> Vec<Option<String>> {
        self.records
            .iter()
            .map(|record| record.get(index).cloned().flatten())
            .collect()
    }
}

/// Typed dataset. Row order is the source order and never changes; filtered
/// and sorted views are new datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
}

/// Rows of a dataset laid out for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl Dataset {
    /// Build a dataset from columns of equal length
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(|c| c.len()).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.len() != row_count) {
            return Err(AppError::Internal(format!(
                "Column '{}' has {} rows, expected {}",
                bad.name,
                bad.len(),
                row_count
            )));
        }
        Ok(Self { columns, row_count })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// New dataset with the given rows, in the given order
    pub fn select_rows(&self, rows: &[usize]) -> Dataset {
        Dataset {
            columns: self.columns.iter().map(|c| c.take(rows)).collect(),
            row_count: rows.len(),
        }
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> Dataset {
        let rows: Vec<usize> = (0..self.row_count.min(n)).collect();
        self.select_rows(&rows)
    }

    /// New dataset with only the named columns, in the given order.
    /// Unknown names are skipped.
    pub fn project(&self, names: &[&str]) -> Dataset {
        Dataset {
            columns: names
                .iter()
                .filter_map(|name| self.column(name).cloned())
                .collect(),
            row_count: self.row_count,
        }
    }

    /// Row-major string cells, for export
    pub fn records(&self) -> impl Iterator<Item = Vec<Option<String>>> + '_ {
        (0..self.row_count).map(move |row| {
            self.columns
                .iter()
                .map(|c| c.display_at(row))
                .collect::<Vec<_>>()
        })
    }

    pub fn to_table(&self) -> TableView {
        TableView {
            columns: self.headers(),
            rows: (0..self.row_count)
                .map(|row| self.columns.iter().map(|c| c.json_at(row)).collect())
                .collect(),
        }
    }
}
