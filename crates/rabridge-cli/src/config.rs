//! Configuration for the rabridge CLI
//!
//! Loads configuration from:
//! 1. rabridge.yaml - logging settings and default hints
//! 2. .env file / process environment - overrides
//!
//! Environment variables always override rabridge.yaml values.

use rabridge_ir::{BackendTarget, BridgeOptions, RouteHint, TimeBlockHint};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// File picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "rabridge.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value for environment variable {name}: {reason}")]
    InvalidEnvVar { name: &'static str, reason: String },
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive (trace, debug, info, warn, error) or module-specific
    pub level: String,

    /// Output format: pretty, json, compact
    pub format: String,

    /// Output destination: stderr, file, both
    pub output: String,

    /// Directory for log files
    pub directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
            output: "stderr".to_string(),
            directory: "./logs".to_string(),
        }
    }
}

/// Hints applied when neither the command line nor the request sets them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_block: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteHint>,
}

impl DefaultsConfig {
    pub fn to_bridge_options(&self) -> BridgeOptions {
        BridgeOptions {
            time_block: self.time_block.as_ref().map(TimeBlockHint::new),
            route: self.route.clone(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub defaults: DefaultsConfig,
}

impl Config {
    /// Load configuration from YAML file with environment variable overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::load_with(path, |name| std::env::var(name).ok())
    }

    /// Load from YAML, taking overrides from `lookup` instead of the process environment
    pub fn load_with<P, F>(path: P, lookup: F) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&contents)?;
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    /// Defaults plus environment overrides, no file
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Explicit path if given, else `rabridge.yaml` when present, else environment only
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::load(DEFAULT_CONFIG_FILE),
            None => Self::from_env(),
        }
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("RUST_LOG") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Some(output) = lookup("LOG_OUTPUT") {
            self.logging.output = output;
        }
        if let Some(dir) = lookup("LOG_DIR") {
            self.logging.directory = dir;
        }

        if let Some(time_block) = lookup("RABRIDGE_DEFAULT_TIME_BLOCK") {
            self.defaults.time_block = Some(time_block);
        }
        if let Some(target) = lookup("RABRIDGE_DEFAULT_ROUTE") {
            let target: BackendTarget =
                target.parse().map_err(|e: rabridge_ir::ParseTargetError| {
                    ConfigError::InvalidEnvVar {
                        name: "RABRIDGE_DEFAULT_ROUTE",
                        reason: e.to_string(),
                    }
                })?;
            let lane = self.defaults.route.take().and_then(|route| route.lane);
            self.defaults.route = Some(RouteHint { target, lane });
        }
        if let Some(lane) = lookup("RABRIDGE_DEFAULT_LANE") {
            match self.defaults.route.as_mut() {
                Some(route) => route.lane = Some(lane),
                None => {
                    return Err(ConfigError::InvalidEnvVar {
                        name: "RABRIDGE_DEFAULT_LANE",
                        reason: "no default route target is configured".to_string(),
                    })
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "compact");
        assert_eq!(config.logging.output, "stderr");
        assert_eq!(config.logging.directory, "./logs");
        assert!(config.defaults.to_bridge_options().is_empty());
    }

    #[test]
    fn test_load_yaml_file() {
        let config_yaml = r#"
logging:
  level: "debug"
  format: "json"
defaults:
  time_block: LAST_7_DAYS
  route:
    target: bigquery
    lane: timeline
"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rabridge.yaml");
        std::fs::write(&path, config_yaml).unwrap();

        let config =
            Config::load_with(&path, lookup_from(&[("LOG_DIR", "/var/log/rabridge")])).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.directory, "/var/log/rabridge");
        // Unset keys keep their defaults
        assert_eq!(config.logging.output, "stderr");

        let options = config.defaults.to_bridge_options();
        assert_eq!(options.time_block, Some(TimeBlockHint::new("LAST_7_DAYS")));
        assert_eq!(
            options.route,
            Some(RouteHint::new(BackendTarget::BigQuery).with_lane("timeline"))
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_with(dir.path().join("absent.yaml"), lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_env_var_override() {
        let mut config = Config::default();
        config
            .apply_overrides(lookup_from(&[
                ("RUST_LOG", "rabridge_sql=trace"),
                ("LOG_OUTPUT", "both"),
                ("RABRIDGE_DEFAULT_ROUTE", "firestore"),
                ("RABRIDGE_DEFAULT_LANE", "hot"),
            ]))
            .unwrap();

        assert_eq!(config.logging.level, "rabridge_sql=trace");
        assert_eq!(config.logging.output, "both");
        assert_eq!(
            config.defaults.route,
            Some(RouteHint::new(BackendTarget::Firestore).with_lane("hot"))
        );
    }

    #[test]
    fn test_route_override_keeps_file_lane() {
        let mut config = Config::default();
        config.defaults.route = Some(RouteHint::new(BackendTarget::BigQuery).with_lane("timeline"));

        config
            .apply_overrides(lookup_from(&[("RABRIDGE_DEFAULT_ROUTE", "gcs")]))
            .unwrap();

        assert_eq!(
            config.defaults.route,
            Some(RouteHint::new(BackendTarget::Gcs).with_lane("timeline"))
        );
    }

    #[test]
    fn test_invalid_route_override() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(lookup_from(&[("RABRIDGE_DEFAULT_ROUTE", "mainframe")]))
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidEnvVar { name: "RABRIDGE_DEFAULT_ROUTE", .. }
        ));
    }

    #[test]
    fn test_lane_without_route_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(lookup_from(&[("RABRIDGE_DEFAULT_LANE", "billing")]))
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidEnvVar { name: "RABRIDGE_DEFAULT_LANE", .. }
        ));
    }
}
