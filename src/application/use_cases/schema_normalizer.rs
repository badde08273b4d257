// ============================================================
// SCHEMA NORMALIZER
// ============================================================
// Type the raw table and resolve which column plays which role

use tracing::debug;

use crate::domain::dashboard_config::CanonicalHeaders;
use crate::domain::dataset::{Column, ColumnRoles, Dataset, RawTable};
use crate::domain::error::{AppError, Result};

/// Outcome of numeric coercion for one column
#[derive(Debug, Clone, PartialEq)]
pub enum Coercion {
    /// Every non-null cell parsed as a number
    Coerced {
        values: Vec<Option<f64>>,
        integral: bool,
    },

    /// At least one cell did not parse; the column stays text
    AsText,
}

/// Coerce a text column to numbers, stripping thousands separators.
///
/// Null and blank cells stay null and do not block coercion. A single
/// unparseable cell leaves the whole column as text.
pub fn coerce(cells: &[Option<String>]) -> Coercion {
    let mut values = Vec::with_capacity(cells.len());
    let mut integral = true;

    for cell in cells {
        let text = match cell.as_deref().map(str::trim) {
            None | Some("") => {
                values.push(None);
                integral = false;
                continue;
            }
            Some(text) => text.replace(',', ""),
        };

        match text.parse::<f64>() {
            Ok(v) if v.is_nan() => {
                values.push(None);
                integral = false;
            }
            Ok(v) => {
                if text.parse::<i64>().is_err() {
                    integral = false;
                }
                values.push(Some(v));
            }
            Err(_) => return Coercion::AsText,
        }
    }

    Coercion::Coerced { values, integral }
}

/// Normalized dataset with its resolved column roles
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDataset {
    pub dataset: Dataset,
    pub roles: ColumnRoles,
}

/// Turns a `RawTable` into a typed `Dataset` and resolves column roles
pub struct SchemaNormalizer {
    headers: CanonicalHeaders,
}

impl SchemaNormalizer {
    pub fn new(headers: CanonicalHeaders) -> Self {
        Self { headers }
    }

    pub fn normalize(&self, table: RawTable) -> Result<NormalizedDataset> {
        if table.column_count() < 2 {
            return Err(AppError::InsufficientColumns(format!(
                "expected at least 2 columns, found {}",
                table.column_count()
            )));
        }

        let columns = table
            .headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let cells = table.column_cells(idx);
                match coerce(&cells) {
                    Coercion::Coerced { values, integral } => Column::number(name, values, integral),
                    Coercion::AsText => {
                        debug!(column = %name, "Column kept as text");
                        Column::text(name, cells)
                    }
                }
            })
            .collect();

        let dataset = Dataset::new(columns)?;
        let roles = self.resolve_roles(&dataset)?;

        debug!(
            name_col = %roles.name_col,
            val_col = %roles.val_col,
            wgt_col = ?roles.wgt_col,
            own_col = ?roles.own_col,
            "Resolved column roles"
        );

        Ok(NormalizedDataset { dataset, roles })
    }

    /// Canonical header when present, otherwise the positional and type
    /// fallbacks for the mandatory roles
    pub fn resolve_roles(&self, dataset: &Dataset) -> Result<ColumnRoles> {
        let canonical = |name: &str| dataset.has_column(name).then(|| name.to_string());

        let name_col = match canonical(&self.headers.name) {
            Some(col) => col,
            None => dataset
                .column_at(1)
                .map(|c| c.name.clone())
                .ok_or_else(|| {
                    AppError::InsufficientColumns(
                        "no second column to use as the name column".to_string(),
                    )
                })?,
        };

        let val_col = match canonical(&self.headers.valuation) {
            Some(col) => col,
            None => dataset
                .columns()
                .iter()
                .find(|c| c.is_numeric())
                .map(|c| c.name.clone())
                .ok_or_else(|| {
                    AppError::NoNumericColumn(format!(
                        "no '{}' column and no numeric column to fall back to",
                        self.headers.valuation
                    ))
                })?,
        };

        Ok(ColumnRoles {
            name_col,
            val_col,
            wgt_col: canonical(&self.headers.weight),
            own_col: canonical(&self.headers.ownership),
        })
    }
}

impl Default for SchemaNormalizer {
    fn default() -> Self {
        Self::new(CanonicalHeaders::default())
    }
}
