// ============================================================
// DATASET DOMAIN LAYER
// ============================================================
// Core types for the holdings dataset and its filtered views
// No I/O, no async

mod column;
mod filter_params;
mod roles;
mod session;
mod summary;
mod table;

pub use column::{format_number, Column, ColumnValues};
pub use filter_params::{FilterParams, NumericRange, TOP_N_DEFAULT, TOP_N_MAX, TOP_N_MIN};
pub use roles::ColumnRoles;
pub use session::{RangeBounds, Session, SourceEncoding};
pub use summary::{Summary, TopNShare};
pub use table::{Dataset, RawTable, TableView};
