//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Timeline slot geometry
//! - Default planner document and category for new tasks
//! - Breakdown chart colors
//!
//! Configuration is stored at `~/.config/dayplanner/config.toml`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use super::data_dir;
use crate::aggregate::ChartColors;
use crate::error::{ConfigError, Result};
use crate::grid::{GridGeometry, MIN_DURATION, RESOLUTION, SLOT_HEIGHT_PX};
use crate::palette::{CATEGORY_COLORS, FALLBACK_CHART_COLOR};
use crate::planner::DEFAULT_DOCUMENT_NAME;

/// Timeline geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_slot_height")]
    pub slot_height_px: f64,
    #[serde(default = "default_resolution")]
    pub resolution: i32,
}

/// Planner document defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_document")]
    pub default_document: String,
    #[serde(default = "default_category")]
    pub default_category: String,
}

/// Breakdown chart colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_category_colors")]
    pub category_colors: IndexMap<String, String>,
    #[serde(default = "default_fallback_color")]
    pub fallback_color: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/dayplanner/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

// Default functions
fn default_slot_height() -> f64 {
    SLOT_HEIGHT_PX
}
fn default_resolution() -> i32 {
    RESOLUTION
}
fn default_document() -> String {
    DEFAULT_DOCUMENT_NAME.into()
}
fn default_category() -> String {
    "Physical".into()
}
fn default_category_colors() -> IndexMap<String, String> {
    CATEGORY_COLORS
        .iter()
        .map(|&(name, color)| (name.to_string(), color.to_string()))
        .collect()
}
fn default_fallback_color() -> String {
    FALLBACK_CHART_COLOR.into()
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            slot_height_px: default_slot_height(),
            resolution: default_resolution(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_document: default_document(),
            default_category: default_category(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            category_colors: default_category_colors(),
            fallback_color: default_fallback_color(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            return Ok(cfg);
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(cfg)
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!("falling back to default config: {e}");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        if GridGeometry::new(updated.grid.slot_height_px, updated.grid.resolution).is_none() {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!(
                    "slot height must be positive and resolution must divide {MIN_DURATION} minutes"
                ),
            });
        }
        *self = updated;
        Ok(())
    }

    /// Timeline geometry, or the default when the configured values are not
    /// usable.
    pub fn grid(&self) -> GridGeometry {
        GridGeometry::new(self.grid.slot_height_px, self.grid.resolution).unwrap_or_else(|| {
            warn!(
                slot_height_px = self.grid.slot_height_px,
                resolution = self.grid.resolution,
                "invalid grid config, using defaults"
            );
            GridGeometry::default()
        })
    }

    pub fn chart_colors(&self) -> ChartColors {
        ChartColors {
            colors: self.chart.category_colors.clone(),
            fallback: self.chart.fallback_color.clone(),
        }
    }
}
