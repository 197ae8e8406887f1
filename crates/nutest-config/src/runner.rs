//! Runner configuration (nutest.toml `[output]` table)
//!
//! Handles the settings that shape how a test run is reported.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Whether status tags are rendered with terminal color escapes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Enabled,
    Disabled,
}

impl ColorMode {
    pub fn is_enabled(self) -> bool {
        matches!(self, ColorMode::Enabled)
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::Enabled => write!(f, "enabled"),
            ColorMode::Disabled => write!(f, "disabled"),
        }
    }
}

impl FromStr for ColorMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "enabled" | "on" | "true" | "1" => Ok(ColorMode::Enabled),
            "disabled" | "off" | "false" | "0" => Ok(ColorMode::Disabled),
            other => Err(ConfigError::InvalidValue {
                field: "output.color".to_string(),
                reason: format!("must be 'enabled' or 'disabled', got '{}'", other),
            }),
        }
    }
}

/// Effective configuration handed to the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Color status tags
    pub color: ColorMode,
    /// Print each test's description next to its name
    pub descriptions: bool,
    /// Print a recap of failed and errored tests with their diagnostics
    pub failure_details: bool,
    /// Print per-test and per-suite durations
    pub timings: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Enabled,
            descriptions: false,
            failure_details: true,
            timings: true,
        }
    }
}

impl RunnerConfig {
    /// Load configuration starting from the current working directory
    pub fn from_env() -> ConfigResult<Self> {
        let cwd = std::env::current_dir()?;
        crate::ConfigLoader::new().load_from_directory(&cwd)
    }

    /// Overlay the values set in an `[output]` table
    pub fn apply(&mut self, output: &OutputSection) {
        if let Some(color) = output.color {
            self.color = color;
        }
        if let Some(descriptions) = output.descriptions {
            self.descriptions = descriptions;
        }
        if let Some(failure_details) = output.failure_details {
            self.failure_details = failure_details;
        }
        if let Some(timings) = output.timings {
            self.timings = timings;
        }
    }

    /// Builder-style color override (used by CLI flags)
    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    pub fn with_descriptions(mut self, descriptions: bool) -> Self {
        self.descriptions = descriptions;
        self
    }

    pub fn with_timings(mut self, timings: bool) -> Self {
        self.timings = timings;
        self
    }

    pub fn with_failure_details(mut self, failure_details: bool) -> Self {
        self.failure_details = failure_details;
        self
    }
}

/// Contents of a nutest.toml file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectFile {
    /// Output settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputSection>,
}

/// `[output]` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorMode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptions: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_details: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timings: Option<bool>,
}

impl ProjectFile {
    /// Load a project file from disk
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;

        toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })
    }
}
