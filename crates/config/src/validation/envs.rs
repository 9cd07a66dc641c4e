//! Structural checks for `envs` entries.
//!
//! Allowed shapes:
//!
//! ```yaml
//! envs:
//!   - name: EXAMPLE1                           # literal value
//!     value: value1
//!   - name: EXAMPLE2                           # from a local variable
//!     value: '{{ env.MY_ENV }}'
//!   - name: EXAMPLE3                           # one key of a secret
//!     value: '{{ secret.secretName.key }}'
//!   - value: '{{ secret.secretName }}'         # every key of a secret
//!   - name: EXAMPLE4                           # one key of a config map
//!     value: '{{ configMap.configMapName.key }}'
//!   - value: '{{ configMap.configMapName }}'   # every key of a config map
//! ```

use crate::constants::{KEYED_FORMS, REFERENCE_OPEN, WHOLE_STORE_FORMS};
use crate::reference::Reference;
use crate::types::Env;

/// Checks every env entry, returning one message per faulty entry.
///
/// Messages carry the 0-based index of the entry and keep input order.
pub fn validate_envs(envs: &[Env]) -> Vec<String> {
    envs.iter()
        .enumerate()
        .filter_map(|(index, env)| validate_env(index, env))
        .collect()
}

/// Checks a single env entry found at `index`.
pub fn validate_env(index: usize, env: &Env) -> Option<String> {
    match (&env.name, &env.value) {
        (None, None) => Some(format!("env entry #{index} is not properly set")),
        (Some(name), None) => Some(format!(
            "env entry #{index} is missing value field, only name '{name}' is set"
        )),
        (None, Some(value)) => {
            let whole_store = Reference::parse(value).is_ok_and(|r| r.is_whole_store());
            (!whole_store).then(|| {
                format!(
                    "env entry #{index} has invalid value field set, it has '{value}', but allowed is only {WHOLE_STORE_FORMS}"
                )
            })
        }
        (Some(name), Some(value)) => {
            // Anything not opening a reference is a literal.
            if !value.starts_with(REFERENCE_OPEN) {
                return None;
            }
            let keyed = Reference::parse(value).is_ok_and(|r| r.is_keyed());
            (!keyed).then(|| {
                format!(
                    "env entry #{index} with name '{name}' has invalid value field set, it has '{value}', but allowed is only {KEYED_FORMS}"
                )
            })
        }
    }
}
