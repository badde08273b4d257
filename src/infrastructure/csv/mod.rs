// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// File discovery, encoding fallback, and CSV parsing

mod csv_parser;
mod decoder;
mod discovery;

pub use csv_parser::{CsvParser, NULL_TOKENS};
pub use decoder::decode;
pub use discovery::FileDiscovery;
