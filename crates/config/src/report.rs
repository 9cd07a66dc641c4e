//! Aggregated report for a rejected descriptor.
//!
//! Responsibilities:
//! - Collect parse errors and per-entry validation messages in one value.
//! - Render them under a single header with stable indentation.
//!
//! Invariants:
//! - Rendering order is parse errors, then volume errors, then env errors.
//! - Every entry is indented by two spaces under the header.
//! - Volume and env blocks are separated by one blank line, and only when
//!   both are present.

use std::fmt;

use crate::constants::{ERROR_HEADER, ERROR_INDENT};

/// Every defect found while loading one descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Normalized codec errors, one line each.
    pub parse: Vec<String>,
    /// Messages from `validate_volumes`.
    pub volumes: Vec<String>,
    /// Messages from `validate_envs`.
    pub envs: Vec<String>,
}

impl ValidationReport {
    /// True when nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.parse.is_empty() && self.volumes.is_empty() && self.envs.is_empty()
    }

    /// Total number of reported lines.
    pub fn len(&self) -> usize {
        self.parse.len() + self.volumes.len() + self.envs.len()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ERROR_HEADER)?;
        for line in self.parse.iter().chain(&self.volumes) {
            write!(f, "\n{ERROR_INDENT}{line}")?;
        }
        if !self.volumes.is_empty() && !self.envs.is_empty() {
            f.write_str("\n")?;
        }
        for line in &self.envs {
            write!(f, "\n{ERROR_INDENT}{line}")?;
        }
        Ok(())
    }
}
