//! Configuration management and validation.
//!
//! Provides the extraction configuration: lexical settings for the reader,
//! the settings catalog, and the substrings that drive the name-based
//! heuristics. Configuration is layered: defaults, then an optional TOML
//! file, then environment variables, then CLI overrides.

use crate::constants::{
    COMMENT_MARKER, DEFAULT_ENGINE_NAME, DEFAULT_NON_FIXED_EQUIPMENT_MARKERS,
    DEFAULT_SETPOINT_INDICATORS, GEOMETRY_CATEGORY, MINUTES_PER_DAY, MINUTES_PER_HOUR,
    SETTINGS_CATEGORIES, keywords,
};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable overriding the engine name
pub const ENV_ENGINE_NAME: &str = "IDF_EXTRACT_ENGINE_NAME";

/// Environment variable overriding the expansion slot width
pub const ENV_SLOT_MINUTES: &str = "IDF_EXTRACT_SLOT_MINUTES";

/// Settings catalog: category name to the keys reported under it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsCatalogConfig {
    /// Categories in report order
    pub categories: IndexMap<String, Vec<String>>,

    /// Category whose keys are carried by top-level comments
    pub comment_category: String,
}

impl Default for SettingsCatalogConfig {
    fn default() -> Self {
        let categories = SETTINGS_CATEGORIES
            .iter()
            .map(|(category, keys)| {
                (
                    category.to_string(),
                    keys.iter().map(|key| key.to_string()).collect(),
                )
            })
            .collect();

        Self {
            categories,
            comment_category: GEOMETRY_CATEGORY.to_string(),
        }
    }
}

impl SettingsCatalogConfig {
    /// Keys recognised in `! Key: Value` comments
    pub fn comment_keys(&self) -> HashSet<String> {
        self.categories
            .get(&self.comment_category)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Iterate `(category, key)` for every object-carried key
    pub fn object_keys(&self) -> impl Iterator<Item = (&str, &str)> {
        self.categories
            .iter()
            .filter(|(category, _)| **category != self.comment_category)
            .flat_map(|(category, keys)| {
                keys.iter()
                    .map(move |key| (category.as_str(), key.as_str()))
            })
    }
}

/// Global configuration for IDF extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Comment marker character
    pub comment_marker: char,

    /// Simulation engine name used by the Version formatter
    pub engine_name: String,

    /// Settings catalog
    pub settings: SettingsCatalogConfig,

    /// Schedule-name substrings identifying setpoint schedules (case-insensitive)
    pub setpoint_indicators: Vec<String>,

    /// Name substrings classifying `OtherEquipment` as non-fixed (case-insensitive)
    pub non_fixed_equipment_markers: Vec<String>,

    /// Keyword of the schedule definitions collected by the schedule extractor
    pub schedule_keyword: String,

    /// Slot width in minutes for schedule time expansion
    pub expansion_slot_minutes: u32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            comment_marker: COMMENT_MARKER,
            engine_name: DEFAULT_ENGINE_NAME.to_string(),
            settings: SettingsCatalogConfig::default(),
            setpoint_indicators: DEFAULT_SETPOINT_INDICATORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            non_fixed_equipment_markers: DEFAULT_NON_FIXED_EQUIPMENT_MARKERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            schedule_keyword: keywords::SCHEDULE_COMPACT.to_string(),
            expansion_slot_minutes: MINUTES_PER_HOUR,
        }
    }
}

impl ExtractorConfig {
    /// Set the engine name
    pub fn with_engine_name(mut self, engine_name: impl Into<String>) -> Self {
        self.engine_name = engine_name.into();
        self
    }

    /// Set the comment marker
    pub fn with_comment_marker(mut self, marker: char) -> Self {
        self.comment_marker = marker;
        self
    }

    /// Replace the setpoint indicator substrings
    pub fn with_setpoint_indicators(mut self, indicators: Vec<String>) -> Self {
        self.setpoint_indicators = indicators;
        self
    }

    /// Replace the settings catalog
    pub fn with_settings_catalog(mut self, catalog: SettingsCatalogConfig) -> Self {
        self.settings = catalog;
        self
    }

    /// Set the expansion slot width in minutes
    pub fn with_expansion_slot_minutes(mut self, minutes: u32) -> Self {
        self.expansion_slot_minutes = minutes;
        self
    }

    /// Default config file location (`<config dir>/idf-extract/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))?;
        Ok(config_dir.join("idf-extract").join("config.toml"))
    }

    /// Load configuration from a TOML file; missing keys take defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config_file(path, format!("cannot read file: {}", e)))?;
        toml::from_str(&content).map_err(|e| Error::config_file(path, e.to_string()))
    }

    /// Load configuration with layered approach (defaults -> file -> env)
    ///
    /// An explicit `config_file` must exist. Without one, the default location
    /// is used when present.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                info!("Using config file: {}", path.display());
                Self::from_file(path)?
            }
            None => match Self::default_config_path() {
                Ok(path) if path.exists() => {
                    info!("Using config file: {}", path.display());
                    Self::from_file(&path)?
                }
                _ => {
                    debug!("No config file found, using defaults and environment variables");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(engine_name) = std::env::var(ENV_ENGINE_NAME) {
            debug!("{} overrides engine name: {}", ENV_ENGINE_NAME, engine_name);
            self.engine_name = engine_name;
        }

        if let Ok(minutes) = std::env::var(ENV_SLOT_MINUTES) {
            self.expansion_slot_minutes = minutes.trim().parse().map_err(|_| {
                Error::configuration(format!(
                    "{} must be a whole number of minutes, got '{}'",
                    ENV_SLOT_MINUTES, minutes
                ))
            })?;
        }

        Ok(())
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<()> {
        if self.comment_marker.is_whitespace()
            || matches!(self.comment_marker, ',' | ';' | ':')
        {
            return Err(Error::configuration(format!(
                "comment marker '{}' collides with IDF syntax",
                self.comment_marker
            )));
        }

        if self.expansion_slot_minutes == 0 || MINUTES_PER_DAY % self.expansion_slot_minutes != 0
        {
            return Err(Error::configuration(format!(
                "expansion slot of {} minutes does not divide a day",
                self.expansion_slot_minutes
            )));
        }

        if self.schedule_keyword.trim().is_empty() {
            return Err(Error::configuration("schedule keyword must not be empty"));
        }

        if !self
            .settings
            .categories
            .contains_key(&self.settings.comment_category)
        {
            return Err(Error::configuration(format!(
                "comment category '{}' is not in the settings catalog",
                self.settings.comment_category
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.comment_marker, '!');
        assert_eq!(config.engine_name, "EnergyPlus");
        assert_eq!(config.expansion_slot_minutes, 60);
    }

    #[test]
    fn test_comment_keys_come_from_geometry_category() {
        let catalog = SettingsCatalogConfig::default();
        let keys = catalog.comment_keys();
        assert_eq!(keys.len(), 5);
        assert!(keys.contains("Zone volume calculation method"));
        assert!(!keys.contains("Version"));
    }

    #[test]
    fn test_object_keys_exclude_comment_category() {
        let catalog = SettingsCatalogConfig::default();
        let object_keys: Vec<_> = catalog.object_keys().collect();
        assert!(object_keys.contains(&("General Settings", "RunPeriod")));
        assert!(object_keys.contains(&("Location Settings", "Site:Location")));
        assert!(
            !object_keys
                .iter()
                .any(|(category, _)| *category == GEOMETRY_CATEGORY)
        );
    }

    #[test]
    fn test_invalid_slot_width_rejected() {
        let config = ExtractorConfig::default().with_expansion_slot_minutes(7);
        assert!(matches!(
            config.validate(),
            Err(Error::Configuration { .. })
        ));

        let config = ExtractorConfig::default().with_expansion_slot_minutes(15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders_replace_heuristics_and_catalog() {
        let mut catalog = SettingsCatalogConfig::default();
        catalog
            .categories
            .insert("Custom".to_string(), vec!["Building".to_string()]);

        let config = ExtractorConfig::default()
            .with_setpoint_indicators(vec!["Thermostat".to_string()])
            .with_settings_catalog(catalog.clone());
        assert_eq!(config.setpoint_indicators, vec!["Thermostat".to_string()]);
        assert_eq!(config.settings, catalog);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_catalog_without_comment_category_rejected() {
        let mut catalog = SettingsCatalogConfig::default();
        catalog.comment_category = "Missing".to_string();
        let config = ExtractorConfig::default().with_settings_catalog(catalog);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_comment_marker_collision_rejected() {
        let config = ExtractorConfig::default().with_comment_marker(',');
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "engine_name = \"OpenStudio EnergyPlus\"").unwrap();
        writeln!(file, "setpoint_indicators = [\"Setpoint\"]").unwrap();

        let config = ExtractorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.engine_name, "OpenStudio EnergyPlus");
        assert_eq!(config.setpoint_indicators, vec!["Setpoint".to_string()]);
        assert_eq!(config.schedule_keyword, "Schedule:Compact");
        assert_eq!(config.settings, SettingsCatalogConfig::default());
    }

    #[test]
    fn test_malformed_toml_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "engine_name = ").unwrap();

        let err = ExtractorConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigFile { .. }));
    }

    #[test]
    fn test_missing_explicit_config_file_is_error() {
        let result = ExtractorConfig::load_layered(Some(Path::new("/nonexistent/idf.toml")));
        assert!(result.is_err());
    }
}
