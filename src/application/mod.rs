pub mod use_cases;

pub use use_cases::dashboard::DashboardService;
pub use use_cases::dataset_loader::{DatasetCache, DatasetLoader};
