// ============================================================
// COLUMN TYPES
// ============================================================
// Typed column storage for a normalized dataset

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Values of a single column, stored column-wise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ColumnValues {
    /// Numeric column. `integral` is set when every value was read as a
    /// whole number with no nulls, so it is written back without a fraction.
    Number {
        values: Vec<Option<f64>>,
        integral: bool,
    },

    /// Text column, kept as read
    Text { values: Vec<Option<String>> },
}

/// A named column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Header name
    pub name: String,

    /// Column data
    pub values: ColumnValues,
}

impl Column {
    pub fn number(name: impl Into<String>, values: Vec<Option<f64>>, integral: bool) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Number { values, integral },
        }
    }

    pub fn text(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Text { values },
        }
    }

    pub fn len(&self) -> usize {
        match &self.values {
            ColumnValues::Number { values, .. } => values.len(),
            ColumnValues::Text { values } => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the column holds a numeric type after normalization
    pub fn is_numeric(&self) -> bool {
        matches!(self.values, ColumnValues::Number { .. })
    }

    /// Element-wise numeric reading of a cell.
    ///
    /// Number cells yield their value. Text cells are parsed as-is (trimmed,
    /// no separator stripping); anything unparseable reads as null.
    pub fn numeric_at(&self, row: usize) -> Option<f64> {
        match &self.values {
            ColumnValues::Number { values, .. } => values.get(row).copied().flatten(),
            ColumnValues::Text { values } => values
                .get(row)
                .and_then(|v| v.as_deref())
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|v| !v.is_nan()),
        }
    }

    /// String form of a cell, `None` for nulls
    pub fn display_at(&self, row: usize) -> Option<String> {
        match &self.values {
            ColumnValues::Number { values, integral } => values
                .get(row)
                .copied()
                .flatten()
                .map(|v| format_number(v, *integral)),
            ColumnValues::Text { values } => values.get(row).cloned().flatten(),
        }
    }

    /// JSON form of a cell for table output
    pub fn json_at(&self, row: usize) -> serde_json::Value {
        match &self.values {
            ColumnValues::Number { values, .. } => values
                .get(row)
                .copied()
                .flatten()
                .and_then(serde_json::Number::from_f64)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            ColumnValues::Text { values } => values
                .get(row)
                .cloned()
                .flatten()
                .map(serde_json::Value::String)
                .unwrap_or(serde_json::Value::Null),
        }
    }

    /// Non-null numeric values in row order
    pub fn numeric_values(&self) -> Vec<f64> {
        (0..self.len()).filter_map(|row| self.numeric_at(row)).collect()
    }

    /// Observed (min, max) over the element-wise numeric reading
    pub fn numeric_bounds(&self) -> Option<(f64, f64)> {
        self.numeric_values().into_iter().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Build a new column holding the given rows, in the given order
    pub fn take(&self, rows: &[usize]) -> Column {
        let values = match &self.values {
            ColumnValues::Number { values, integral } => ColumnValues::Number {
                values: rows.iter().map(|&r| values[r]).collect(),
                integral: *integral,
            },
            ColumnValues::Text { values } => ColumnValues::Text {
                values: rows.iter().map(|&r| values[r].clone()).collect(),
            },
        };
        Column {
            name: self.name.clone(),
            values,
        }
    }

    /// Compare two rows of this column for sorting. Nulls are reported as
    /// `None` so callers can place them independently of direction.
    pub fn compare_rows(&self, a: usize, b: usize) -> Option<Ordering> {
        match &self.values {
            ColumnValues::Number { values, .. } => match (values[a], values[b]) {
                (Some(x), Some(y)) => x.partial_cmp(&y),
                _ => None,
            },
            ColumnValues::Text { values } => match (&values[a], &values[b]) {
                (Some(x), Some(y)) => Some(x.cmp(y)),
                _ => None,
            },
        }
    }

    pub fn is_null_at(&self, row: usize) -> bool {
        match &self.values {
            ColumnValues::Number { values, .. } => values[row].is_none(),
            ColumnValues::Text { values } => values[row].is_none(),
        }
    }
}

/// Render a number the way it was read: whole numbers of an integral column
/// without a fraction, other whole numbers with a single trailing `.0`.
///
/// Cells are held as `f64`, so integers beyond 2^53 have already lost their
/// low digits by the time they are rendered here.
pub fn format_number(value: f64, integral: bool) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        match (integral, value.abs() < 9.0e15) {
            (true, true) => format!("{}", value as i64),
            (true, false) => format!("{:.0}", value),
            (false, _) => format!("{:.1}", value),
        }
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_at_text_column_is_elementwise() {
        let col = Column::text(
            "v",
            vec![Some("12".into()), Some("1,000".into()), None, Some(" 3.5 ".into())],
        );
        assert_eq!(col.numeric_at(0), Some(12.0));
        assert_eq!(col.numeric_at(1), None);
        assert_eq!(col.numeric_at(2), None);
        assert_eq!(col.numeric_at(3), Some(3.5));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1000.0, true), "1000");
        assert_eq!(format_number(1000.0, false), "1000.0");
        assert_eq!(format_number(12.25, false), "12.25");
    }

    #[test]
    fn test_format_large_integral_has_no_fraction() {
        assert_eq!(format_number(1.0e16, true), "10000000000000000");
        assert_eq!(format_number(-2.5e17, true), "-250000000000000000");
        assert_eq!(format_number(1.0e16, false), "10000000000000000.0");
    }

    #[test]
    fn test_numeric_bounds_skip_nulls() {
        let col = Column::number("v", vec![Some(3.0), None, Some(-1.0), Some(7.5)], false);
        assert_eq!(col.numeric_bounds(), Some((-1.0, 7.5)));

        let empty = Column::number("v", vec![None, None], false);
        assert_eq!(empty.numeric_bounds(), None);
    }

    #[test]
    fn test_take_preserves_requested_order() {
        let col = Column::text("n", vec![Some("a".into()), Some("b".into()), Some("c".into())]);
        let taken = col.take(&[2, 0]);
        assert_eq!(taken.display_at(0).as_deref(), Some("c"));
        assert_eq!(taken.display_at(1).as_deref(), Some("a"));
        assert_eq!(taken.len(), 2);
    }
}
