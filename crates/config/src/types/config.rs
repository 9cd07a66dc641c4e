//! The on-disk form of a function descriptor.
//!
//! Responsibilities:
//! - Define `PersistedConfig`, the schema of `func.yaml`.
//! - Map between `PersistedConfig` and the `Function` domain model.
//!
//! Does NOT handle:
//! - Reading or writing the file (see `persistence`).
//! - Structural checks of volumes and envs (see `validation`).
//!
//! Invariants:
//! - Unknown fields are rejected at every level of the schema.
//! - Scalars are `Option<String>`: an absent field and an empty string are
//!   different states and survive a save/load cycle as such.
//! - The mapping to and from `Function` is field-for-field; it neither
//!   validates nor fills in defaults.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::report::ValidationReport;
use crate::types::{Env, Function, Volume};
use crate::validation::{validate_envs, validate_volumes};

/// Serialized state of a function's metadata.
///
/// See [`Function`] for attribute documentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PersistedConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_digest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builder: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub builder_map: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<Volume>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub envs: Vec<Env>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl PersistedConfig {
    /// Runs the volume and env validators over this config.
    pub fn validate(&self) -> ValidationReport {
        ValidationReport {
            parse: Vec::new(),
            volumes: validate_volumes(&self.volumes),
            envs: validate_envs(&self.envs),
        }
    }

    /// Converts into the domain model rooted at `root`.
    pub fn into_function(self, root: impl Into<PathBuf>) -> Function {
        Function {
            root: root.into(),
            name: self.name,
            namespace: self.namespace,
            runtime: self.runtime,
            image: self.image,
            image_digest: self.image_digest,
            trigger: self.trigger,
            builder: self.builder,
            builder_map: self.builder_map,
            volumes: self.volumes,
            envs: self.envs,
            annotations: self.annotations,
        }
    }
}

impl From<PersistedConfig> for Function {
    fn from(config: PersistedConfig) -> Self {
        config.into_function(PathBuf::new())
    }
}

impl From<&Function> for PersistedConfig {
    fn from(function: &Function) -> Self {
        Self {
            name: function.name.clone(),
            namespace: function.namespace.clone(),
            runtime: function.runtime.clone(),
            image: function.image.clone(),
            image_digest: function.image_digest.clone(),
            trigger: function.trigger.clone(),
            builder: function.builder.clone(),
            builder_map: function.builder_map.clone(),
            volumes: function.volumes.clone(),
            envs: function.envs.clone(),
            annotations: function.annotations.clone(),
        }
    }
}

impl From<Function> for PersistedConfig {
    fn from(function: Function) -> Self {
        Self {
            name: function.name,
            namespace: function.namespace,
            runtime: function.runtime,
            image: function.image,
            image_digest: function.image_digest,
            trigger: function.trigger,
            builder: function.builder,
            builder_map: function.builder_map,
            volumes: function.volumes,
            envs: function.envs,
            annotations: function.annotations,
        }
    }
}
