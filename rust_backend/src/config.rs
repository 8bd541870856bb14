//! Detector configuration file support.
//!
//! Settings are read from a TOML file such as:
//!
//! ```toml
//! [detection]
//! policy = "merged"      # or "per-key"
//!
//! [output]
//! suffix = "_with_collisions"
//! report = "text"        # "text", "json" or "none"
//! ```
//!
//! Every section and key is optional.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::algorithms::detector::CollisionPolicy;
use crate::error::{ScheduleError, ScheduleResult};

/// Default name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "collisions.toml";

/// Detector configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    #[serde(default)]
    pub detection: DetectionSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Detection settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionSettings {
    #[serde(default)]
    pub policy: CollisionPolicy,
}

/// Export and report settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_suffix")]
    pub suffix: String,
    #[serde(default)]
    pub report: ReportFormat,
}

/// How the collision report is rendered on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    None,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => f.write_str("text"),
            ReportFormat::Json => f.write_str("json"),
            ReportFormat::None => f.write_str("none"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "none" => Ok(ReportFormat::None),
            other => Err(format!(
                "unknown report format '{}' (expected 'text', 'json' or 'none')",
                other
            )),
        }
    }
}

fn default_suffix() -> String {
    "_with_collisions".to_string()
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            report: ReportFormat::default(),
        }
    }
}

impl DetectorConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(DetectorConfig)` if successful
    /// * `Err(ScheduleError::Configuration)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> ScheduleResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ScheduleError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> ScheduleResult<Self> {
        let config: DetectorConfig = toml::from_str(content).map_err(|e| {
            ScheduleError::Configuration(format!("Failed to parse config file: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `collisions.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    ///
    /// Returns `Ok(None)` when no file exists.
    pub fn from_default_location() -> ScheduleResult<Option<Self>> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("rust_backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path).map(Some);
            }
        }

        Ok(None)
    }

    fn validate(&self) -> ScheduleResult<()> {
        let suffix = self.output.suffix.trim();
        if suffix.is_empty() {
            return Err(ScheduleError::Configuration(
                "output.suffix must not be empty".to_string(),
            ));
        }
        if suffix.contains(|c: char| c == '/' || c == '\\') {
            return Err(ScheduleError::Configuration(format!(
                "output.suffix must not contain path separators: {}",
                suffix
            )));
        }
        Ok(())
    }
}
