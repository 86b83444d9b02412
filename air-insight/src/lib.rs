//! air-insight library crate.
//!
//! Read-only query API over regional air-quality measurements: a summary
//! table keyed by region and a dated history table with trend analysis.

pub mod api;
pub mod config;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod logging;
pub mod panic_hook;
pub mod service;

pub use error::{Error, Result};
