use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppError {
    Internal(String),
    NoFileFound(String),
    NoDecodableEncoding(String),
    InsufficientColumns(String),
    NoNumericColumn(String),
    ValidationError(String),
    ParseError(String),
    ConfigError(String),
    IoError(String),
}

impl AppError {
    /// Errors that leave the session without a dataset. They are cached by the
    /// session loader and never retried.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AppError::NoFileFound(_)
                | AppError::NoDecodableEncoding(_)
                | AppError::InsufficientColumns(_)
                | AppError::NoNumericColumn(_)
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::NoFileFound(msg) => write!(f, "No data file found: {}", msg),
            AppError::NoDecodableEncoding(msg) => write!(f, "No decodable encoding: {}", msg),
            AppError::InsufficientColumns(msg) => write!(f, "Insufficient columns: {}", msg),
            AppError::NoNumericColumn(msg) => write!(f, "No numeric column: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
