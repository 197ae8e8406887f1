//! Error types

use std::collections::TryReserveError;
use thiserror::Error;

/// Registration errors
///
/// Growing the registry is the only way registration can fail. It is a
/// startup error: the entry points report it and exit before any test runs.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("failed to grow registry storage for a new {what}")]
    Capacity {
        what: &'static str,
        #[source]
        source: TryReserveError,
    },
}

/// Fixture set-up errors, reported as an errored test
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("fixture set-up failed: {0}")]
    SetUp(String),

    #[error("fixture set-up failed: {0}")]
    Io(#[from] std::io::Error),
}

impl FixtureError {
    pub fn set_up(reason: impl Into<String>) -> Self {
        FixtureError::SetUp(reason.into())
    }
}
