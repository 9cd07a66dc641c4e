//! Environment variables declared in the descriptor.

use serde::{Deserialize, Serialize};

/// One entry of the `envs` sequence.
///
/// `value` is either a literal or a reference expression (see
/// [`crate::reference`]). An entry without a name imports every key of the
/// referenced store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Env {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Env {
    /// A named variable with a literal or keyed-reference value.
    pub fn named(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
        }
    }

    /// An unnamed entry importing a whole secret or config map.
    pub fn from_store(value: impl Into<String>) -> Self {
        Self {
            name: None,
            value: Some(value.into()),
        }
    }
}
