//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local use.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::db::keys;
use crate::services::DEFAULT_MAP_ZOOM;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event
    #[default]
    Json,
    /// Human-readable lines
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(ConfigError::Invalid {
                name: "LOG_FORMAT",
                value: other.to_string(),
            }),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the file-backed key-value store
    pub data_dir: PathBuf,
    /// Name of the slot holding the workout collection
    pub storage_key: String,
    /// Zoom level used when focusing the map on a workout
    pub map_zoom_level: u8,
    pub log_format: LogFormat,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            storage_key: keys::WORKOUTS.to_string(),
            map_zoom_level: DEFAULT_MAP_ZOOM,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            data_dir: env::var("WORKOUTS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            storage_key: env::var("WORKOUTS_STORAGE_KEY")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|_| keys::WORKOUTS.to_string()),
            map_zoom_level: match env::var("MAP_ZOOM_LEVEL") {
                Ok(value) => parse_zoom(&value)?,
                Err(_) => DEFAULT_MAP_ZOOM,
            },
            log_format: match env::var("LOG_FORMAT") {
                Ok(value) => value.parse()?,
                Err(_) => LogFormat::default(),
            },
        })
    }
}

/// Zoom levels beyond 20 exceed what tile providers serve.
fn parse_zoom(value: &str) -> Result<u8, ConfigError> {
    value
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|zoom| *zoom <= 20)
        .ok_or_else(|| ConfigError::Invalid {
            name: "MAP_ZOOM_LEVEL",
            value: value.to_string(),
        })
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set env vars for test
        env::set_var("WORKOUTS_DATA_DIR", "/tmp/workouts-test");
        env::set_var("WORKOUTS_STORAGE_KEY", " my-workouts ");
        env::set_var("MAP_ZOOM_LEVEL", "15");
        env::set_var("LOG_FORMAT", "Pretty");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.data_dir, PathBuf::from("/tmp/workouts-test"));
        assert_eq!(config.storage_key, "my-workouts");
        assert_eq!(config.map_zoom_level, 15);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_parse_zoom_bounds() {
        assert_eq!(parse_zoom("13").unwrap(), 13);
        assert!(parse_zoom("21").is_err());
        assert!(parse_zoom("close").is_err());
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
