//! Process configuration read from the environment.

use std::path::PathBuf;

use crate::api::ApiServerConfig;

/// Dataset file used when `DATASET_PATH` is unset.
pub const DEFAULT_DATASET_PATH: &str = "Insight.xlsx";

/// Top-level configuration for the service binary.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub server: ApiServerConfig,
    /// Dataset source file, read once at startup
    pub dataset_path: PathBuf,
    /// Directory for rolling log files; console only when unset
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ApiServerConfig::default(),
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            server: ApiServerConfig::from_lookup(&lookup),
            dataset_path: non_empty("DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH)),
            log_dir: non_empty("LOG_DIR").map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.dataset_path, PathBuf::from("Insight.xlsx"));
    }

    #[test]
    fn test_reads_paths() {
        let config = AppConfig::from_lookup(|key| match key {
            "DATASET_PATH" => Some("/srv/data/insight.json".to_string()),
            "LOG_DIR" => Some("logs".to_string()),
            "API_PORT" => Some("7000".to_string()),
            _ => None,
        });
        assert_eq!(config.dataset_path, PathBuf::from("/srv/data/insight.json"));
        assert_eq!(config.log_dir, Some(PathBuf::from("logs")));
        assert_eq!(config.server.port, 7000);
    }

    #[test]
    fn test_blank_values_ignored() {
        let config = AppConfig::from_lookup(|key| match key {
            "DATASET_PATH" | "LOG_DIR" => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.dataset_path, PathBuf::from(DEFAULT_DATASET_PATH));
        assert!(config.log_dir.is_none());
    }
}
