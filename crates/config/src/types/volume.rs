//! Volume mounts declared in the descriptor.

use serde::{Deserialize, Serialize};

/// One entry of the `volumes` sequence.
///
/// A well-formed entry mounts either a secret or a config map at `path`.
/// Every field is optional so that a half-written entry still parses and can
/// be reported by `validate_volumes` with its index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Volume {
    /// Name of the secret to mount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// Name of the config map to mount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map: Option<String>,
    /// Mount path inside the function's container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Volume {
    /// Mounts the secret `name` at `path`.
    pub fn secret(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            secret: Some(name.into()),
            config_map: None,
            path: Some(path.into()),
        }
    }

    /// Mounts the config map `name` at `path`.
    pub fn config_map(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            secret: None,
            config_map: Some(name.into()),
            path: Some(path.into()),
        }
    }
}
