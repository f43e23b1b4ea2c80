//! Configuration for the operations layer.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{OpsError, OpsResult};
use crate::report::ReportFormat;

/// Configuration for scan operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Report reference fields that were never assigned as findings.
    #[serde(default)]
    pub report_empty_references: bool,

    /// Report format used when none is given explicitly.
    #[serde(default)]
    pub default_format: ReportFormat,

    /// Path prefix used by asset scans when none is given explicitly.
    #[serde(default = "default_asset_prefix")]
    pub asset_prefix: String,
}

fn default_asset_prefix() -> String {
    "Assets/".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report_empty_references: false,
            default_format: ReportFormat::default(),
            asset_prefix: default_asset_prefix(),
        }
    }
}

impl Config {
    /// Load configuration from disk with environment overrides.
    pub fn load() -> OpsResult<Self> {
        let config = if let Some(path) = Self::config_file_path() {
            if path.exists() {
                let contents = std::fs::read_to_string(&path)?;
                serde_json::from_str(&contents)?
            } else {
                Self::default()
            }
        } else {
            Self::default()
        };

        config.with_env_overrides()
    }

    /// Apply `REFSCAN_*` environment variables on top of this configuration.
    pub fn with_env_overrides(mut self) -> OpsResult<Self> {
        if let Ok(value) = std::env::var("REFSCAN_REPORT_EMPTY_REFERENCES") {
            self.set("report_empty_references", &value)?;
        }
        if let Ok(value) = std::env::var("REFSCAN_FORMAT") {
            self.set("default_format", &value)?;
        }
        if let Ok(value) = std::env::var("REFSCAN_ASSET_PREFIX") {
            self.set("asset_prefix", &value)?;
        }
        Ok(self)
    }

    /// Save configuration to disk.
    pub fn save(&self) -> OpsResult<()> {
        if let Some(path) = Self::config_file_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = serde_json::to_string_pretty(self)?;
            std::fs::write(&path, contents)?;
        }
        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "refscan", "refscan")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Get a configuration value by key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "report_empty_references" => Some(self.report_empty_references.to_string()),
            "default_format" => Some(self.default_format.to_string()),
            "asset_prefix" => Some(self.asset_prefix.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key.
    pub fn set(&mut self, key: &str, value: &str) -> OpsResult<()> {
        match key {
            "report_empty_references" => {
                self.report_empty_references = parse_bool(value)
                    .ok_or_else(|| OpsError::Config(format!("Invalid boolean: {}", value)))?;
            }
            "default_format" => {
                self.default_format = value.parse().map_err(OpsError::Config)?;
            }
            "asset_prefix" => {
                self.asset_prefix = value.to_string();
            }
            _ => {
                return Err(OpsError::Config(format!("Unknown config key: {}", key)));
            }
        }
        Ok(())
    }

    /// All configuration keys understood by [`Config::get`] and [`Config::set`].
    pub fn keys() -> &'static [&'static str] {
        &["report_empty_references", "default_format", "asset_prefix"]
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
