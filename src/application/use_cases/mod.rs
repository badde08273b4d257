pub mod aggregator;
pub mod dashboard;
pub mod dataset_loader;
pub mod export;
pub mod filter_engine;
pub mod presentation;
pub mod schema_normalizer;
