//! Property-based tests for the volume and env validators.
//!
//! Test coverage:
//! - Volumes: every combination of present/absent fields maps to the right
//!   number of messages.
//! - Envs: generated reference expressions are accepted or rejected by the
//!   presence of a name, never by the names inside them.
//! - Loader: generated functions survive a save/load cycle.

use proptest::prelude::*;
use tempfile::TempDir;

use func_config::{Env, Function, Volume, load, validate_envs, validate_volumes};

/// Strategy for secret and config map names, including interior separators.
fn store_name_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,8}([-'][a-z0-9]{1,8}){0,3}".prop_map(String::from)
}

/// Strategy for keys and local variable names.
fn word_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_]{1,16}".prop_map(String::from)
}

fn source_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("secret"), Just("configMap")]
}

/// Strategy for whitespace allowed inside the delimiters.
fn padding_strategy() -> impl Strategy<Value = String> {
    "[ \t]{0,3}".prop_map(String::from)
}

fn optional_text() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-z/]{0,12}".prop_map(String::from))
}

proptest! {
    #[test]
    fn prop_volume_both_stores_is_one_error(
        secret in "[a-z]{1,8}",
        config_map in "[a-z]{1,8}",
        path in optional_text(),
    ) {
        let volume = Volume { secret: Some(secret.clone()), config_map: Some(config_map.clone()), path };
        let errors = validate_volumes(&[volume]);
        prop_assert_eq!(errors.len(), 1);
        prop_assert!(errors[0].contains(&format!("'{secret}'")), "error should mention secret '{}'", secret);
        prop_assert!(errors[0].contains(&format!("'{config_map}'")), "error should mention config map '{}'", config_map);
    }

    #[test]
    fn prop_volume_shapes(
        secret in optional_text(),
        config_map in optional_text(),
        path in optional_text(),
    ) {
        let valid = path.is_some() && (secret.is_some() != config_map.is_some());
        let volume = Volume { secret, config_map, path };
        let errors = validate_volumes(&[volume]);
        prop_assert_eq!(errors.is_empty(), valid);
        prop_assert!(errors.len() <= 1);
    }

    #[test]
    fn prop_whole_store_needs_unnamed_entry(
        source in source_strategy(),
        store in store_name_strategy(),
        left in padding_strategy(),
        right in padding_strategy(),
    ) {
        let value = format!("{{{{{left}{source}.{store}{right}}}}}");
        prop_assert!(validate_envs(&[Env::from_store(value.clone())]).is_empty());
        prop_assert_eq!(validate_envs(&[Env::named("X", value)]).len(), 1);
    }

    #[test]
    fn prop_keyed_reference_needs_name(
        source in source_strategy(),
        store in store_name_strategy(),
        key in word_strategy(),
    ) {
        let value = format!("{{{{ {source}.{store}.{key} }}}}");
        prop_assert!(validate_envs(&[Env::named("X", value.clone())]).is_empty());
        prop_assert_eq!(validate_envs(&[Env::from_store(value)]).len(), 1);
    }

    #[test]
    fn prop_trailing_garbage_rejected(
        store in store_name_strategy(),
        garbage in "[a-z;]{1,6}",
    ) {
        let value = format!("{{{{ secret.{store} }}}}{garbage}");
        prop_assert_eq!(validate_envs(&[Env::from_store(value)]).len(), 1);
    }

    #[test]
    fn prop_literal_values_always_valid(
        name in word_strategy(),
        value in "[^{].{0,20}",
    ) {
        prop_assert!(validate_envs(&[Env::named(name, value)]).is_empty());
    }

    #[test]
    fn prop_round_trip(
        name in proptest::option::of(word_strategy()),
        runtime in proptest::option::of("[a-z]{0,8}"),
        store in store_name_strategy(),
        key in word_strategy(),
    ) {
        let dir = TempDir::new().unwrap();
        let function = Function {
            root: dir.path().to_path_buf(),
            name,
            runtime,
            volumes: vec![Volume::secret(store.clone(), "/etc/store")],
            envs: vec![Env::named(key.clone(), format!("{{{{ secret.{store}.{key} }}}}"))],
            ..Default::default()
        };

        function.write().unwrap();
        let loaded = load(dir.path()).unwrap().into_function(dir.path());
        prop_assert_eq!(loaded, function);
    }
}
