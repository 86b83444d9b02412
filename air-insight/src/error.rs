//! Application-wide error types.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Which dataset table a lookup ran against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Summary,
    History,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Table::Summary => write!(f, "Summary"),
            Table::History => write!(f, "HistoryData"),
        }
    }
}

/// Application-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing required parameter: {name}")]
    MissingParameter { name: String },

    #[error("No {table} record found for region '{region}'")]
    NotFound { table: Table, region: String },

    #[error("Insufficient data for trend analysis: {points} point(s)")]
    InsufficientData { points: usize },

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Failed to read dataset {path}: {source}")]
    DatasetIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error("{0}")]
    Unexpected(String),
}

impl Error {
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    pub fn not_found(table: Table, region: impl Into<String>) -> Self {
        Self::NotFound {
            table,
            region: region.into(),
        }
    }

    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
