//! Error types for loading and saving function descriptors.
//!
//! Responsibilities:
//! - Define one error enum covering every failure of `load` and `save`.
//!
//! Does NOT handle:
//! - Formatting of rejected descriptors (see `report`).
//!
//! Invariants:
//! - I/O errors display exactly as the operating system reported them; the
//!   offending path is kept as a field for callers that want it.
//! - A missing descriptor is never an error.

use std::path::PathBuf;

use thiserror::Error;

use crate::report::ValidationReport;

/// Errors that can occur while loading or saving a descriptor.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The descriptor exists but could not be read.
    #[error("{source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The descriptor failed to parse, failed validation, or both.
    #[error("{0}")]
    Invalid(ValidationReport),

    #[error("failed to serialize function config: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// The descriptor could not be written.
    #[error("{source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ConfigError {
    /// The aggregated report, when the descriptor itself was at fault.
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            ConfigError::Invalid(report) => Some(report),
            _ => None,
        }
    }
}
