//! Reading and writing `func.yaml`.
//!
//! Responsibilities:
//! - Locate the descriptor under a function root.
//! - Read, strictly decode and validate it into a `PersistedConfig`.
//! - Serialize a `Function` back to disk.
//!
//! Does NOT handle:
//! - The rules for volumes and envs (see `validation`).
//! - Coordinating concurrent writers; callers own that.
//!
//! Invariants:
//! - A missing descriptor loads as `PersistedConfig::default()`.
//! - Parse and validation defects are combined into one `ConfigError::Invalid`.
//! - I/O errors are returned unchanged.
//! - A save either replaces the descriptor whole or leaves it untouched.

mod codec;
mod document;

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::constants::{CONFIG_FILE, CONFIG_FILE_MODE};
use crate::error::ConfigError;
use crate::types::{Function, PersistedConfig};

/// Loads the descriptor stored under `root`.
///
/// Returns an empty config when `root` holds no descriptor.
pub fn load(root: &Path) -> Result<PersistedConfig, ConfigError> {
    let path = root.join(CONFIG_FILE);
    match read_config_file(&path) {
        Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No function config found, using defaults");
            Ok(PersistedConfig::default())
        }
        result => result,
    }
}

/// Reads and decodes the descriptor at `path`.
pub fn read_config_file(path: &Path) -> Result<PersistedConfig, ConfigError> {
    let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_config(&bytes)?;
    tracing::debug!(path = %path.display(), "Function config loaded");
    Ok(config)
}

/// Decodes and validates descriptor contents held in memory.
pub fn parse_config(bytes: &[u8]) -> Result<PersistedConfig, ConfigError> {
    codec::decode(bytes).map_err(|report| {
        tracing::warn!(
            parse_errors = report.parse.len(),
            volume_errors = report.volumes.len(),
            env_errors = report.envs.len(),
            "Function config rejected"
        );
        ConfigError::Invalid(report)
    })
}

/// Writes `function`'s descriptor into its root directory.
///
/// The content goes to a temporary file next to the descriptor, which is
/// then renamed over it.
pub fn save(function: &Function) -> Result<(), ConfigError> {
    let path = function.root.join(CONFIG_FILE);
    let content = serde_yaml::to_string(&PersistedConfig::from(function))?;

    atomic_write(&function.root, &path, content.as_bytes()).map_err(|source| {
        ConfigError::Write {
            path: path.clone(),
            source,
        }
    })?;

    tracing::debug!(path = %path.display(), "Function config saved atomically");
    Ok(())
}

fn atomic_write(dir: &Path, path: &Path, content: &[u8]) -> io::Result<()> {
    let mut temp = NamedTempFile::new_in(dir)?;
    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(Permissions::from_mode(CONFIG_FILE_MODE))?;
    }

    temp.write_all(content)?;
    temp.flush()?;
    // On failure the temporary file is dropped, which removes it.
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
