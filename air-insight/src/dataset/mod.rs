//! Dataset loading and the in-memory store the API reads from.

pub mod loader;
pub mod store;
pub mod workbook;

pub use loader::{load_from_path, parse_dataset, parse_workbook};
pub use store::DatasetStore;
