//! Application Configuration Module
//! Defaults for the dashboard and report, optionally overridden from a JSON file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an optional JSON settings file.
pub const CONFIG_ENV: &str = "LIFE_EXPECTANCY_CONFIG";
/// Environment variable overriding the dataset path.
pub const DATASET_ENV: &str = "LIFE_EXPECTANCY_DATASET";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Tunables shared by the dashboard and the report binary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub dataset_path: PathBuf,
    /// Last year present in the source data; rankings past it are predicted.
    pub latest_observed_year: i32,
    /// A country needs at least this many yearly samples to get a regression.
    pub min_regression_samples: usize,
    pub polynomial_degree: usize,
    pub rolling_window: usize,
    pub report_country: String,
    pub report_years: Vec<i32>,
    pub report_plot_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("dataset.csv"),
            latest_observed_year: 2019,
            min_regression_samples: 6,
            polynomial_degree: 2,
            rolling_window: 3,
            report_country: "India".to_string(),
            report_years: vec![2030, 2040, 2050],
            report_plot_path: PathBuf::from("life_expectancy_prediction.png"),
        }
    }
}

impl AppConfig {
    /// Parse a JSON settings file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve configuration from the environment.
    ///
    /// `LIFE_EXPECTANCY_CONFIG` points at an optional JSON file; a path that
    /// does not exist falls back to defaults. `LIFE_EXPECTANCY_DATASET` wins
    /// over whatever dataset path the file set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
            Some(path) if path.exists() => {
                log::info!("Loading configuration from {}", path.display());
                Self::from_file(&path)?
            }
            Some(path) => {
                log::warn!("Config file {} not found, using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };

        if let Some(dataset) = std::env::var_os(DATASET_ENV) {
            config.dataset_path = PathBuf::from(dataset);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "report_country": "Japan", "rolling_window": 5 }}"#).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.report_country, "Japan");
        assert_eq!(config.rolling_window, 5);
        assert_eq!(config.latest_observed_year, 2019);
        assert_eq!(config.min_regression_samples, 6);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = AppConfig::from_file(Path::new("/nonexistent/settings.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
