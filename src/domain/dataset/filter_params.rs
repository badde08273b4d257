// ============================================================
// FILTER PARAMETERS
// ============================================================
// Mutable per-session state: every change triggers a full re-run

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::chart::Palette;
use crate::domain::error::{AppError, Result};

pub const TOP_N_MIN: usize = 5;
pub const TOP_N_MAX: usize = 50;
pub const TOP_N_DEFAULT: usize = 20;

/// Inclusive numeric range `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range that admits every non-null value
    pub fn unbounded() -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Null values never match
    pub fn admits(&self, value: Option<f64>) -> bool {
        value.map(|v| self.contains(v)).unwrap_or(false)
    }

    fn check(&self, label: &str) -> Result<()> {
        if self.min.is_nan() || self.max.is_nan() {
            return Err(AppError::ValidationError(format!(
                "{} range bounds must be numbers",
                label
            )));
        }
        if self.min > self.max {
            return Err(AppError::ValidationError(format!(
                "{} range min {} is greater than max {}",
                label, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Dashboard parameters as sent by the controls.
/// Omitted ranges default to the observed bounds of their column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterParams {
    /// Name search, matched case-insensitively after trimming
    pub keyword: String,

    #[validate(range(min = 5, max = 50))]
    pub top_n: usize,

    pub val_range: Option<NumericRange>,
    pub wgt_range: Option<NumericRange>,
    pub own_range: Option<NumericRange>,

    pub palette: Palette,

    /// Ranking metric; the valuation column when omitted
    pub rank_metric: Option<String>,

    /// Ranking direction toggle
    pub ascending: bool,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            top_n: TOP_N_DEFAULT,
            val_range: None,
            wgt_range: None,
            own_range: None,
            palette: Palette::default(),
            rank_metric: None,
            ascending: false,
        }
    }
}

impl FilterParams {
    /// Trimmed keyword, `None` when the search box is effectively empty
    pub fn active_keyword(&self) -> Option<&str> {
        let trimmed = self.keyword.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }

    /// Validate Top-N bounds and range ordering
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        for (label, range) in [
            ("valuation", &self.val_range),
            ("weight", &self.wgt_range),
            ("ownership", &self.own_range),
        ] {
            if let Some(range) = range {
                range.check(label)?;
            }
        }
        Ok(())
    }
}
