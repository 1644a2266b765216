//! Configuration file support for liftlog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/liftlog/config.toml`. The
//! analytics themselves take every parameter per call; the config only seeds
//! the CLI's defaults.

use crate::{AnalyticsOptions, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const KG_PER_LB: f64 = 0.453_592_37;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub analytics: AnalyticsOptions,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl DataConfig {
    /// JSONL workout log inside `data_dir`
    pub fn workouts_path(&self) -> PathBuf {
        workouts_path(&self.data_dir)
    }
}

/// Workout log location for a data directory
pub fn workouts_path(data_dir: &Path) -> PathBuf {
    data_dir.join("workouts.jsonl")
}

/// Unit used when printing weights
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DisplayUnit {
    #[default]
    Kg,
    Lb,
}

impl DisplayUnit {
    /// Convert a stored kilogram value for display
    pub fn convert_kg(self, kg: f64) -> f64 {
        match self {
            DisplayUnit::Kg => kg,
            DisplayUnit::Lb => kg / KG_PER_LB,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DisplayUnit::Kg => "kg",
            DisplayUnit::Lb => "lb",
        }
    }
}

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DisplayUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilograms" => Ok(DisplayUnit::Kg),
            "lb" | "lbs" | "pounds" => Ok(DisplayUnit::Lb),
            other => Err(Error::Config(format!("Unknown unit: {}", other))),
        }
    }
}

/// Presentation settings
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    #[serde(default)]
    pub unit: DisplayUnit,
}

/// Exercise catalog override
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// TOML catalog replacing the built-in one
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| home_dir().join(".local/share"));
    base.join("liftlog")
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| home_dir().join(".config"));
        base.join("liftlog").join("config.toml")
    }

    /// Save the configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OneRepMaxFormula;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analytics.formula, OneRepMaxFormula::Epley);
        assert!(!config.analytics.include_unvalidated);
        assert_eq!(config.display.unit, DisplayUnit::Kg);
        assert!(config.catalog.path.is_none());
        assert!(config.data.data_dir.ends_with("liftlog"));
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("liftlog").join("config.toml");

        let mut config = Config::default();
        config.analytics.formula = OneRepMaxFormula::Lander;
        config.display.unit = DisplayUnit::Lb;
        config.save_to(&path).unwrap();

        let parsed = Config::load_from(&path).unwrap();
        assert_eq!(parsed.analytics.formula, OneRepMaxFormula::Lander);
        assert_eq!(parsed.display.unit, DisplayUnit::Lb);
        assert_eq!(parsed.data.data_dir, config.data.data_dir);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[analytics]
include_unvalidated = true

[display]
unit = "lb"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.analytics.include_unvalidated);
        assert_eq!(config.analytics.formula, OneRepMaxFormula::Epley);
        assert_eq!(config.display.unit, DisplayUnit::Lb);
    }

    #[test]
    fn test_unknown_formula_rejected() {
        let toml_str = r#"
[analytics]
formula = "wathan"
"#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn test_unit_conversion() {
        assert_eq!(DisplayUnit::Kg.convert_kg(100.0), 100.0);
        assert!((DisplayUnit::Lb.convert_kg(100.0) - 220.462).abs() < 0.001);
        assert_eq!("LBS".parse::<DisplayUnit>().unwrap(), DisplayUnit::Lb);
        assert!("stone".parse::<DisplayUnit>().is_err());
    }

    #[test]
    fn test_workouts_path() {
        let data = DataConfig {
            data_dir: PathBuf::from("/tmp/liftlog-data"),
        };
        assert_eq!(
            data.workouts_path(),
            PathBuf::from("/tmp/liftlog-data/workouts.jsonl")
        );
    }
}
