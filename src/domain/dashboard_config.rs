//! Dashboard configuration
//! Where to find the data file, how to recognise its columns, and how to serve it

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Canonical header names for each column role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalHeaders {
    /// Display name column (stock name)
    pub name: String,

    /// Valuation column (100M KRW)
    pub valuation: String,

    /// Weight within the asset class (percent)
    pub weight: String,

    /// Ownership of the company's equity (percent)
    pub ownership: String,
}

impl Default for CanonicalHeaders {
    fn default() -> Self {
        Self {
            name: "종목명".to_string(),
            valuation: "평가액(억 원)".to_string(),
            weight: "자산군 내 비중(퍼센트)".to_string(),
            ownership: "지분율(퍼센트)".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Directory searched for the data file
    pub data_dir: PathBuf,

    /// Token preferred in the data file name
    pub file_hint: String,

    /// HTTP bind address
    pub host: String,
    pub port: u16,

    /// `tracing` filter directive
    pub log_filter: String,

    /// Rows shown in the data preview table
    pub preview_rows: usize,

    /// Bins per histogram
    pub histogram_bins: usize,

    /// Download name for the filtered CSV
    pub export_file_name: String,

    pub headers: CanonicalHeaders,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            file_hint: "국민연금".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3001,
            log_filter: "info".to_string(),
            preview_rows: 200,
            histogram_bins: 30,
            export_file_name: "filtered_result.csv".to_string(),
            headers: CanonicalHeaders::default(),
        }
    }
}

impl DashboardConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("port must be > 0".to_string());
        }
        if self.histogram_bins == 0 {
            return Err("histogram_bins must be > 0".to_string());
        }
        if self.export_file_name.trim().is_empty() {
            return Err("export_file_name must not be empty".to_string());
        }
        Ok(())
    }
}
