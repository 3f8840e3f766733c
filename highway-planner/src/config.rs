//! Highway configuration.
//!
//! Settings come from built-in defaults, optionally overridden by a JSON
//! file and then by environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::cars::DEFAULT_MAX_CARS;
use crate::planner::PlannerConfig;

/// Environment variable naming a JSON configuration file.
pub const CONFIG_PATH_ENV: &str = "HIGHWAY_CONFIG";

/// Environment variable overriding [`HighwayConfig::max_cars`].
pub const MAX_CARS_ENV: &str = "HIGHWAY_MAX_CARS";

/// Environment variable overriding [`HighwayConfig::scan_deadline_ms`].
pub const SCAN_DEADLINE_ENV: &str = "HIGHWAY_SCAN_DEADLINE_MS";

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for this schema
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An environment override is not a number
    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },

    /// A setting is out of range
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Configuration for a highway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HighwayConfig {
    /// Maximum number of cars parked at one station.
    pub max_cars: usize,

    /// Abort route queries that scan for longer than this many milliseconds.
    pub scan_deadline_ms: Option<u64>,

    /// Stations scanned between two deadline checks.
    pub deadline_check_interval: usize,
}

impl HighwayConfig {
    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let body = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&body).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration the binary runs with.
    ///
    /// Reads the file named by `HIGHWAY_CONFIG` if set, then applies any
    /// environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_json_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_env()
    }

    /// Apply `HIGHWAY_MAX_CARS` and `HIGHWAY_SCAN_DEADLINE_MS` if set.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.with_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides looked up by variable name.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(MAX_CARS_ENV) {
            self.max_cars = parse_env(MAX_CARS_ENV, &value)?;
        }
        if let Some(value) = lookup(SCAN_DEADLINE_ENV) {
            self.scan_deadline_ms = Some(parse_env(SCAN_DEADLINE_ENV, &value)?);
        }
        self.validate()?;
        Ok(self)
    }

    /// Check every setting is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_cars == 0 {
            return Err(ConfigError::Invalid("max_cars must be at least 1"));
        }
        if self.deadline_check_interval == 0 {
            return Err(ConfigError::Invalid("deadline_check_interval must be at least 1"));
        }
        Ok(())
    }

    /// Returns the scan deadline as a Duration.
    pub fn scan_deadline(&self) -> Option<Duration> {
        self.scan_deadline_ms.map(Duration::from_millis)
    }

    /// The route planner settings derived from this configuration.
    pub fn planner(&self) -> PlannerConfig {
        PlannerConfig::new(self.scan_deadline(), self.deadline_check_interval)
    }
}

impl Default for HighwayConfig {
    fn default() -> Self {
        Self {
            max_cars: DEFAULT_MAX_CARS,
            scan_deadline_ms: None,
            deadline_check_interval: 1024,
        }
    }
}

fn parse_env<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var,
        value: value.to_string(),
    })
}
