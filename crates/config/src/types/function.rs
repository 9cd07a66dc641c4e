//! The `Function` domain model.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::persistence;
use crate::types::{Env, PersistedConfig, Volume};

/// A deployable function as the application sees it.
///
/// Everything except `root` is persisted in the descriptor file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Function {
    /// Directory holding the function's sources and descriptor. Never persisted.
    pub root: PathBuf,
    /// Function name, unique within a namespace.
    pub name: Option<String>,
    /// Namespace the function is deployed to.
    pub namespace: Option<String>,
    /// Language runtime, e.g. `rust` or `node`.
    pub runtime: Option<String>,
    /// Fully qualified image reference.
    pub image: Option<String>,
    /// Digest of the last built image.
    pub image_digest: Option<String>,
    /// Invocation trigger, e.g. `http` or `events`.
    pub trigger: Option<String>,
    /// Builder selected for the next build.
    pub builder: Option<String>,
    /// Named builders available to this function.
    pub builder_map: BTreeMap<String, String>,
    /// Secrets and config maps mounted into the container.
    pub volumes: Vec<Volume>,
    /// Environment variables set on the container.
    pub envs: Vec<Env>,
    /// Free-form annotations.
    pub annotations: BTreeMap<String, String>,
}

impl Function {
    /// Loads the function whose descriptor lives under `root`.
    ///
    /// A missing descriptor yields an uninitialized function at `root`.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let root = root.as_ref();
        let config = persistence::load(root)?;
        Ok(config.into_function(root))
    }

    /// Writes the descriptor to `root`.
    pub fn write(&self) -> Result<(), ConfigError> {
        persistence::save(self)
    }

    /// True once the descriptor names the function.
    pub fn is_initialized(&self) -> bool {
        self.name.as_deref().is_some_and(|name| !name.is_empty())
    }

    /// The persisted view of this function.
    pub fn to_config(&self) -> PersistedConfig {
        PersistedConfig::from(self)
    }
}
