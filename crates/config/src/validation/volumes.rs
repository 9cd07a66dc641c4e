//! Structural checks for `volumes` entries.
//!
//! Allowed shapes:
//!
//! ```yaml
//! volumes:
//!   - secret: example-secret          # mount a secret
//!     path: /etc/secret-volume
//!   - configMap: example-config-map   # mount a config map
//!     path: /etc/config-volume
//! ```

use crate::types::Volume;

/// Checks every volume entry, returning one message per faulty entry.
///
/// Messages carry the 0-based index of the entry and keep input order.
pub fn validate_volumes(volumes: &[Volume]) -> Vec<String> {
    volumes
        .iter()
        .enumerate()
        .filter_map(|(index, volume)| validate_volume(index, volume))
        .collect()
}

/// Checks a single volume entry found at `index`.
pub fn validate_volume(index: usize, volume: &Volume) -> Option<String> {
    match (&volume.secret, &volume.config_map, &volume.path) {
        (Some(secret), Some(config_map), _) => Some(format!(
            "volume entry #{index} is not properly set, both secret '{secret}' and configMap '{config_map}' can not be set at the same time"
        )),
        (None, None, None) => Some(format!("volume entry #{index} is not properly set")),
        (Some(secret), None, None) => Some(format!(
            "volume entry #{index} is missing path field, only secret '{secret}' is set"
        )),
        (None, Some(config_map), None) => Some(format!(
            "volume entry #{index} is missing path field, only configMap '{config_map}' is set"
        )),
        (None, None, Some(path)) => Some(format!(
            "volume entry #{index} is missing secret or configMap field, only path '{path}' is set"
        )),
        (Some(_), None, Some(_)) | (None, Some(_), Some(_)) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volume(secret: Option<&str>, config_map: Option<&str>, path: Option<&str>) -> Volume {
        Volume {
            secret: secret.map(String::from),
            config_map: config_map.map(String::from),
            path: path.map(String::from),
        }
    }

    #[test]
    fn test_valid_shapes() {
        let volumes = vec![
            Volume::secret("secret", "/etc/secret"),
            Volume::config_map("cm", "/etc/cm"),
        ];
        assert!(validate_volumes(&volumes).is_empty());
    }

    #[test]
    fn test_both_stores_set_regardless_of_path() {
        for path in [None, Some("/etc/x")] {
            let errors = validate_volumes(&[volume(Some("s"), Some("c"), path)]);
            assert_eq!(
                errors,
                vec![
                    "volume entry #0 is not properly set, both secret 's' and configMap 'c' can not be set at the same time"
                ]
            );
        }
    }

    #[test]
    fn test_empty_entry() {
        assert_eq!(
            validate_volumes(&[Volume::default()]),
            vec!["volume entry #0 is not properly set"]
        );
    }

    #[test]
    fn test_missing_path() {
        assert_eq!(
            validate_volumes(&[volume(Some("s"), None, None), volume(None, Some("c"), None)]),
            vec![
                "volume entry #0 is missing path field, only secret 's' is set",
                "volume entry #1 is missing path field, only configMap 'c' is set",
            ]
        );
    }

    #[test]
    fn test_missing_store() {
        assert_eq!(
            validate_volumes(&[volume(None, None, Some("/etc/x"))]),
            vec!["volume entry #0 is missing secret or configMap field, only path '/etc/x' is set"]
        );
    }

    #[test]
    fn test_indices_follow_input_order() {
        let volumes = vec![
            Volume::secret("ok", "/ok"),
            Volume::default(),
            Volume::config_map("ok", "/ok"),
            volume(None, None, Some("/p")),
        ];
        let errors = validate_volumes(&volumes);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("volume entry #1 "));
        assert!(errors[1].starts_with("volume entry #3 "));
    }

    #[test]
    fn test_empty_strings_count_as_present() {
        assert!(validate_volumes(&[volume(Some(""), None, Some(""))]).is_empty());
    }
}
