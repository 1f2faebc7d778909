//! Discover Settings
//!
//! Persisted settings for the saved query list:
//! - Card subtitles and context menu labels
//! - Usage telemetry event keys
//! - The organization feature that unlocks transaction presets

use anyhow::{Context, Result};
use discover_core::TRANSACTION_EVENTS_FEATURE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DiscoverSettings {
    pub list: QueryListSettings,
    pub telemetry: TelemetrySettings,
}

impl DiscoverSettings {
    /// Load from the default settings path, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::settings_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::settings_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        serde_json::from_str(&content).with_context(|| "Failed to parse settings JSON")
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// `<config_dir>/discover/settings.json`
    pub fn settings_path() -> Result<PathBuf> {
        config_dir().map(|dir| dir.join("settings.json"))
    }
}

pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .context("Could not determine config directory")
        .map(|dir| dir.join("discover"))
}

/// Labels and catalog options for the query list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QueryListSettings {
    pub preset_subtitle: String,
    pub saved_subtitle: String,
    pub delete_label: String,
    pub duplicate_label: String,
    /// Organization feature that adds the transaction presets
    pub transaction_feature: String,
}

impl Default for QueryListSettings {
    fn default() -> Self {
        Self {
            preset_subtitle: "Pre-Built Query".to_string(),
            saved_subtitle: "Saved Query".to_string(),
            delete_label: "Delete Query".to_string(),
            duplicate_label: "Duplicate Query".to_string(),
            transaction_feature: TRANSACTION_EVENTS_FEATURE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TelemetrySettings {
    pub enabled: bool,
    pub preset_click_event: String,
    pub saved_click_event: String,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            preset_click_event: "discover_v2.prebuilt_query_click".to_string(),
            saved_click_event: "discover_v2.saved_query_click".to_string(),
        }
    }
}
