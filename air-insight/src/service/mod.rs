//! Query operations over the loaded dataset.

pub mod query;

pub use query::{QueryService, RegionHistory};
