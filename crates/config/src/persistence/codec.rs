//! Strict YAML decoding for `func.yaml`.
//!
//! Responsibilities:
//! - Decode descriptor bytes into `PersistedConfig`, rejecting unknown fields
//!   and repeated keys.
//! - Rewrite codec errors into user-facing lines that do not mention internal
//!   type names.
//! - Recover whatever `volumes` and `envs` entries are readable when the
//!   document as a whole is rejected, so they are still validated.
//!
//! Invariants:
//! - Decoding never stops at the first structural error: the returned report
//!   holds every repeated key, every unknown field, every badly typed
//!   top-level field and every validator message that could be computed.
//! - Only YAML syntax errors carry a `line N:` prefix. Schema errors name
//!   the field path instead.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

use crate::persistence::document::{prune_unknown_fields, read_document};
use crate::report::ValidationReport;
use crate::types::{Env, PersistedConfig, Volume};
use crate::validation::{validate_env, validate_volume};

static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*at line \d+ column \d+$").expect("location pattern is valid")
});

static INTERNAL_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"expected struct \w+").expect("internal type pattern is valid")
});

/// Decodes `bytes`, returning the config or every defect found.
pub(crate) fn decode(bytes: &[u8]) -> Result<PersistedConfig, ValidationReport> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(PersistedConfig::default());
    }

    // Only a syntax error leaves nothing to validate.
    let document = read_document(bytes).map_err(|e| ValidationReport {
        parse: normalize_syntax_error(&e),
        ..Default::default()
    })?;
    let mut value = document.value;
    if value.is_null() {
        return Ok(PersistedConfig::default());
    }

    let mut parse = document.duplicates;
    parse.extend(prune_unknown_fields(&mut value));

    let report = match decode_value::<PersistedConfig>(&value) {
        Ok(config) => {
            let mut report = config.validate();
            if parse.is_empty() && report.is_empty() {
                return Ok(config);
            }
            report.parse = parse;
            report
        }
        Err(e) => {
            parse.extend(field_errors(&value, e));
            ValidationReport {
                parse,
                volumes: salvage::<Volume, _>(&value, "volumes", validate_volume),
                envs: salvage::<Env, _>(&value, "envs", validate_env),
            }
        }
    };
    Err(report)
}

/// Decodes an already pruned node through its YAML text.
///
/// Going through text keeps serde_yaml's scalar rules, so `version: 1`
/// still decodes into a string field.
fn decode_value<T: DeserializeOwned>(value: &Value) -> Result<T, serde_yaml::Error> {
    let text = serde_yaml::to_string(value)?;
    serde_yaml::from_str(&text)
}

/// Decodes each top-level field on its own to report every bad one.
fn field_errors(document: &Value, whole: serde_yaml::Error) -> Vec<String> {
    let Value::Mapping(fields) = document else {
        return normalize_schema_error(&whole);
    };

    let errors: Vec<String> = fields
        .iter()
        .filter_map(|(key, value)| {
            let mut single = Mapping::new();
            single.insert(key.clone(), value.clone());
            decode_value::<PersistedConfig>(&Value::Mapping(single)).err()
        })
        .flat_map(|e| normalize_schema_error(&e))
        .collect();

    if errors.is_empty() {
        normalize_schema_error(&whole)
    } else {
        errors
    }
}

/// Rewrites a YAML syntax error as report lines, prefixed by its line.
pub(crate) fn normalize_syntax_error(error: &serde_yaml::Error) -> Vec<String> {
    let lines = scrub(error);
    match error.location() {
        Some(location) => lines
            .into_iter()
            .map(|line| format!("line {}: {}", location.line(), line))
            .collect(),
        None => lines,
    }
}

/// Rewrites a schema error as report lines without any location.
pub(crate) fn normalize_schema_error(error: &serde_yaml::Error) -> Vec<String> {
    scrub(error)
}

fn scrub(error: &serde_yaml::Error) -> Vec<String> {
    let message = error.to_string();
    let message = LOCATION.replace(&message, "");
    let message = INTERNAL_TYPE.replace_all(&message, "expected a mapping");

    message
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Validates every entry of `section` that decodes on its own.
///
/// Entries that do not decode are skipped; their defect is already part of
/// the parse errors. Indices still refer to positions in the document.
fn salvage<T, F>(document: &Value, section: &str, check: F) -> Vec<String>
where
    T: DeserializeOwned,
    F: Fn(usize, &T) -> Option<String>,
{
    let Some(Value::Sequence(entries)) = document.get(section) else {
        return Vec::new();
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let entry: T = decode_value(entry).ok()?;
            check(index, &entry)
        })
        .collect()
}
