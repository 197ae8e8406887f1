//! Nutest Configuration System
//!
//! Provides the configuration consumed by the nutest runner:
//! - Output settings (color, descriptions, failure recap, timings)
//! - Project configuration file (nutest.toml)
//! - Environment variable overrides
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded and merged in the following order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Project config (nearest ./nutest.toml, searching upwards)
//! 3. Environment variables (NUTEST_*, NO_COLOR)
//! 4. CLI flags (applied by the embedding program)
//!
//! # Example
//!
//! ```no_run
//! use nutest_config::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::new().load_from_directory(Path::new(".")).unwrap();
//! assert!(config.timings);
//! ```

pub mod loader;
pub mod runner;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

pub use loader::{ConfigLoader, CONFIG_FILE_NAME};
pub use runner::{ColorMode, OutputSection, ProjectFile, RunnerConfig};
