//! REST API server module.
//!
//! Serves region listings, summary lookups and history with trends as JSON.

pub mod error;
pub mod models;
pub mod routes;
pub mod server;

pub use server::{ApiServer, ApiServerConfig, AppState};
