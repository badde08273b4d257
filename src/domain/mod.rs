pub mod chart;
pub mod dashboard;
pub mod dashboard_config;
pub mod error;

// Holdings dataset module
pub mod dataset;
