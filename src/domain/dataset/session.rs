// ============================================================
// SESSION
// ============================================================
// Product of one successful load, held for the process lifetime

use serde::{Deserialize, Serialize};

use super::{ColumnRoles, Dataset, NumericRange};

/// Text encoding a data file was decoded with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceEncoding {
    Utf8,
    Utf8Sig,
    Cp949,
    EucKr,
}

impl SourceEncoding {
    /// Attempt order when decoding a file
    pub const ATTEMPT_ORDER: [SourceEncoding; 4] = [
        SourceEncoding::Utf8,
        SourceEncoding::Utf8Sig,
        SourceEncoding::Cp949,
        SourceEncoding::EucKr,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SourceEncoding::Utf8 => "utf-8",
            SourceEncoding::Utf8Sig => "utf-8-sig",
            SourceEncoding::Cp949 => "cp949",
            SourceEncoding::EucKr => "euc-kr",
        }
    }
}

impl std::fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Slider bounds derived from the data's observed min/max.
/// Weight and ownership bounds exist only for numeric columns.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeBounds {
    pub val: Option<NumericRange>,
    pub wgt: Option<NumericRange>,
    pub own: Option<NumericRange>,
}

/// Loaded, normalized dataset with its resolved roles
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub file_name: String,
    pub encoding: SourceEncoding,
    pub dataset: Dataset,
    pub roles: ColumnRoles,
    pub bounds: RangeBounds,
}

impl Session {
    pub fn new(
        file_name: String,
        encoding: SourceEncoding,
        dataset: Dataset,
        roles: ColumnRoles,
    ) -> Self {
        let bounds = RangeBounds::observe(&dataset, &roles);
        Self {
            file_name,
            encoding,
            dataset,
            roles,
            bounds,
        }
    }
}

impl RangeBounds {
    pub fn observe(dataset: &Dataset, roles: &ColumnRoles) -> Self {
        let observed = |name: &str| {
            dataset
                .column(name)
                .and_then(|c| c.numeric_bounds())
                .map(|(lo, hi)| NumericRange::new(lo, hi))
        };
        let numeric_only = |name: Option<&str>| {
            name.filter(|n| dataset.column(n).map(|c| c.is_numeric()).unwrap_or(false))
                .and_then(observed)
        };

        Self {
            val: observed(&roles.val_col),
            wgt: numeric_only(roles.wgt_col.as_deref()),
            own: numeric_only(roles.own_col.as_deref()),
        }
    }
}
