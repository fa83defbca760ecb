//! Configuration management for the disaster monitor
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.disaster-monitor/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{MonitorError, Result};
use crate::model::{ForestConfig, MaxFeatures};
use crate::monitor::seeding::MAX_SEED;
use crate::types::SensorRange;

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub monitor: MonitorSettings,
    pub sensors: SensorsConfig,
    pub model: ModelConfig,
    pub store: StoreConfig,
    pub telemetry: TelemetryConfig,
}

/// Monitor loop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    pub iterations: usize,
    pub delay_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub disaster_type: String,
    pub locations: Vec<String>,
}

/// Simulated sensor bounds (inclusive)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorsConfig {
    pub temperature: SensorRange,
    pub humidity: SensorRange,
    pub wind_speed: SensorRange,
}

/// Classifier training configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub n_trees: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub bootstrap: bool,
    /// Candidate features per split: "sqrt", "all" or `{ fixed = k }`
    pub max_features: MaxFeatures,
    pub test_fraction: f64,
}

/// Alert store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: String,
}

/// Console output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub default_verbosity: String,
    pub show_progress_bars: bool,
    pub color_output: bool,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            iterations: 5,
            delay_ms: 1000,
            seed: None,
            disaster_type: "Generic Disaster".to_string(),
            locations: ["Mumbai", "Chennai", "Delhi", "Kolkata"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Default for SensorsConfig {
    fn default() -> Self {
        Self {
            temperature: SensorRange::new(20, 50),
            humidity: SensorRange::new(10, 100),
            wind_speed: SensorRange::new(10, 80),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        let forest = ForestConfig::default();
        Self {
            n_trees: forest.n_trees,
            max_depth: forest.max_depth,
            min_samples_split: forest.min_samples_split,
            bootstrap: forest.bootstrap,
            max_features: forest.max_features,
            test_fraction: 0.2,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: "disaster_alerts.db".to_string(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            default_verbosity: "normal".to_string(),
            show_progress_bars: true,
            color_output: true,
        }
    }
}

impl ModelConfig {
    /// Forest hyperparameters for this configuration
    pub fn forest(&self) -> ForestConfig {
        ForestConfig {
            n_trees: self.n_trees,
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            bootstrap: self.bootstrap,
            max_features: self.max_features,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| MonitorError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| MonitorError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// ~/.disaster-monitor/config.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".disaster-monitor").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.monitor.locations.is_empty() {
            return Err(MonitorError::ConfigError(
                "at least one location is required".to_string()
            ));
        }

        if self.monitor.disaster_type.trim().is_empty() {
            return Err(MonitorError::ConfigError(
                "disaster_type must not be empty".to_string()
            ));
        }

        for (name, range) in [
            ("temperature", &self.sensors.temperature),
            ("humidity", &self.sensors.humidity),
            ("wind_speed", &self.sensors.wind_speed),
        ] {
            if !range.is_valid() {
                return Err(MonitorError::ConfigError(format!(
                    "{} range is empty: min {} > max {}",
                    name, range.min, range.max
                )));
            }
        }

        if let Some(seed) = self.monitor.seed {
            if seed > MAX_SEED {
                return Err(MonitorError::ConfigError(format!(
                    "seed {} is larger than the maximum {}",
                    seed, MAX_SEED
                )));
            }
        }

        if self.model.n_trees == 0 {
            return Err(MonitorError::ConfigError(
                "n_trees must be greater than 0".to_string()
            ));
        }

        if !(0.0..1.0).contains(&self.model.test_fraction) {
            return Err(MonitorError::ConfigError(
                "test_fraction must be in [0.0, 1.0)".to_string()
            ));
        }

        if self.store.path.trim().is_empty() {
            return Err(MonitorError::ConfigError(
                "store path must not be empty".to_string()
            ));
        }

        match self.telemetry.default_verbosity.as_str() {
            "quiet" | "normal" | "verbose" | "very_verbose" => {}
            _ => return Err(MonitorError::ConfigError(
                format!("Invalid verbosity level: {}", self.telemetry.default_verbosity)
            )),
        }

        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| MonitorError::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = self.to_toml()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| MonitorError::ConfigError(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| MonitorError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Alert database path
    pub fn store_path(&self) -> PathBuf {
        Self::expand_path(&self.store.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.monitor.iterations, 5);
        assert_eq!(config.monitor.delay_ms, 1000);
        assert_eq!(config.monitor.locations.len(), 4);
        assert_eq!(config.sensors.temperature, SensorRange::new(20, 50));
        assert_eq!(config.store.path, "disaster_alerts.db");
    }

    #[test]
    fn test_config_validation_success() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_locations() {
        let mut config = Config::default();
        config.monitor.locations.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_inverted_range() {
        let mut config = Config::default();
        config.sensors.humidity = SensorRange::new(100, 10);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_trees() {
        let mut config = Config::default();
        config.model.n_trees = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_test_fraction() {
        let mut config = Config::default();
        config.model.test_fraction = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_verbosity() {
        let mut config = Config::default();
        config.telemetry.default_verbosity = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[monitor]\niterations = 12\nseed = 99\n").unwrap();

        let config = Config::load(Some(path)).unwrap();
        assert_eq!(config.monitor.iterations, 12);
        assert_eq!(config.monitor.seed, Some(99));
        assert_eq!(config.monitor.delay_ms, 1000);
        assert_eq!(config.model.n_trees, 100);
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.monitor.seed = Some(7);
        config.save(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_largest_seed_roundtrips() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.monitor.seed = Some(MAX_SEED);
        assert!(config.validate().is_ok());
        std::fs::write(&path, config.to_toml().unwrap()).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.monitor.seed, Some(MAX_SEED));
    }

    #[test]
    fn test_config_validation_seed_too_large() {
        let mut config = Config::default();
        config.monitor.seed = Some(MAX_SEED + 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_features_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[model]\nmax_features = \"all\"\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.model.max_features, MaxFeatures::All);
        assert_eq!(config.model.forest().max_features, MaxFeatures::All);

        std::fs::write(&path, "[model]\nmax_features = { fixed = 2 }\n").unwrap();
        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.model.max_features, MaxFeatures::Fixed(2));
    }

    #[test]
    fn test_expand_path_without_tilde() {
        let path = "/absolute/path";
        let expanded = Config::expand_path(path);
        assert_eq!(expanded.to_string_lossy(), path);
    }

    #[test]
    fn test_forest_from_model_config() {
        let config = Config::default();
        assert_eq!(config.model.forest(), ForestConfig::default());
    }
}
