//! Configuration Loader
//!
//! Handles loading and merging configuration from multiple sources with proper precedence.

use crate::runner::{ColorMode, ProjectFile, RunnerConfig};
use crate::{ConfigError, ConfigResult};
use std::env;
use std::path::{Path, PathBuf};

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "nutest.toml";

/// Configuration loader
///
/// Loads configuration from multiple sources and merges them with proper precedence:
/// 1. Built-in defaults - lowest priority
/// 2. Project config (nutest.toml) - overrides defaults
/// 3. Environment variables (NUTEST_*, NO_COLOR) - overrides project
/// 4. CLI flags - highest priority (handled by caller)
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Project file that supplied values, if one was found
    loaded_from: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self { loaded_from: None }
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find nutest.toml, then applies
    /// environment variable overrides.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<RunnerConfig> {
        let mut config = RunnerConfig::default();

        if let Some(path) = find_project_file(start_dir) {
            let file = ProjectFile::load_from_file(&path)?;
            if let Some(output) = &file.output {
                config.apply(output);
            }
            self.loaded_from = Some(path);
        }

        apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Load configuration from a specific project file
    pub fn load_from_file(&mut self, path: &Path) -> ConfigResult<RunnerConfig> {
        let mut config = RunnerConfig::default();
        let file = ProjectFile::load_from_file(path)?;
        if let Some(output) = &file.output {
            config.apply(output);
        }
        self.loaded_from = Some(path.to_path_buf());

        apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Path of the project file used by the last load, if any
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}

/// Find nutest.toml by walking up the directory tree
fn find_project_file(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Apply environment variable overrides
///
/// Environment variables follow the pattern: NUTEST_<KEY>
/// Example: NUTEST_COLOR=disabled
fn apply_env_overrides(config: &mut RunnerConfig) -> ConfigResult<()> {
    if let Ok(color) = env::var("NUTEST_COLOR") {
        config.color = color.parse()?;
    }

    if let Ok(value) = env::var("NUTEST_DESCRIPTIONS") {
        config.descriptions = parse_flag("NUTEST_DESCRIPTIONS", &value)?;
    }

    if let Ok(value) = env::var("NUTEST_FAILURE_DETAILS") {
        config.failure_details = parse_flag("NUTEST_FAILURE_DETAILS", &value)?;
    }

    if let Ok(value) = env::var("NUTEST_TIMINGS") {
        config.timings = parse_flag("NUTEST_TIMINGS", &value)?;
    }

    // https://no-color.org: presence alone disables color
    if env::var_os("NO_COLOR").is_some() {
        config.color = ColorMode::Disabled;
    }

    Ok(())
}

fn parse_flag(field: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("expected a boolean, got '{}'", other),
        }),
    }
}
