//! Untyped view of a descriptor used to collect every schema defect.
//!
//! Responsibilities:
//! - Read descriptor bytes into a `serde_yaml::Value`, keeping the last value
//!   of a repeated key and recording the repetition instead of failing.
//! - Strip keys the schema does not know, recording each one.
//!
//! Invariants:
//! - Defect messages name the offending key by its field path
//!   (`volumes[1]: field mountPath is not valid`), never by line.
//! - After `prune_unknown_fields` every mapping the schema describes holds
//!   only known keys, so a typed decode can only fail on value types.

use std::fmt;

use serde::de::{self, DeserializeSeed, MapAccess, SeqAccess, Visitor};
use serde_yaml::{Mapping, Value};

/// Keys of the top-level mapping.
pub(crate) const TOP_LEVEL_FIELDS: &[&str] = &[
    "name",
    "namespace",
    "runtime",
    "image",
    "imageDigest",
    "trigger",
    "builder",
    "builderMap",
    "volumes",
    "envs",
    "annotations",
];

/// Keys of a `volumes` entry.
pub(crate) const VOLUME_FIELDS: &[&str] = &["secret", "configMap", "path"];

/// Keys of an `envs` entry.
pub(crate) const ENV_FIELDS: &[&str] = &["name", "value"];

/// A parsed descriptor plus the repeated keys found while reading it.
#[derive(Debug)]
pub(crate) struct Document {
    pub value: Value,
    pub duplicates: Vec<String>,
}

/// Reads `bytes` as one YAML document, tolerating repeated keys.
pub(crate) fn read_document(bytes: &[u8]) -> Result<Document, serde_yaml::Error> {
    let mut duplicates = Vec::new();
    let value = NodeSeed {
        path: String::new(),
        duplicates: &mut duplicates,
    }
    .deserialize(serde_yaml::Deserializer::from_slice(bytes))?;
    Ok(Document { value, duplicates })
}

/// Removes keys unknown to the schema, returning one message per key.
pub(crate) fn prune_unknown_fields(document: &mut Value) -> Vec<String> {
    let Value::Mapping(top) = document else {
        return Vec::new();
    };

    let mut unknown = prune_mapping(top, "", TOP_LEVEL_FIELDS);
    for (section, fields) in [("volumes", VOLUME_FIELDS), ("envs", ENV_FIELDS)] {
        if let Some(Value::Sequence(entries)) = top.get_mut(section) {
            for (index, entry) in entries.iter_mut().enumerate() {
                if let Value::Mapping(entry) = entry {
                    unknown.extend(prune_mapping(entry, &format!("{section}[{index}]"), fields));
                }
            }
        }
    }
    unknown
}

fn prune_mapping(mapping: &mut Mapping, path: &str, known: &[&str]) -> Vec<String> {
    let mut unknown = Vec::new();
    mapping.retain(|key, _| {
        let keep = key.as_str().is_some_and(|key| known.contains(&key));
        if !keep {
            unknown.push(field_message(path, &key_name(key), "is not valid"));
        }
        keep
    });
    unknown
}

fn field_message(path: &str, key: &str, problem: &str) -> String {
    if path.is_empty() {
        format!("field {key} {problem}")
    } else {
        format!("{path}: field {key} {problem}")
    }
}

fn key_name(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// Deserializes one node, recording repeated keys under `path`.
struct NodeSeed<'a> {
    path: String,
    duplicates: &'a mut Vec<String>,
}

impl<'de> DeserializeSeed<'de> for NodeSeed<'_> {
    type Value = Value;

    fn deserialize<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for NodeSeed<'_> {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a YAML value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let NodeSeed { path, duplicates } = self;
        let mut items = Vec::new();
        while let Some(item) = seq.next_element_seed(NodeSeed {
            path: format!("{path}[{}]", items.len()),
            duplicates: &mut *duplicates,
        })? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let NodeSeed { path, duplicates } = self;
        let mut mapping = Mapping::new();
        while let Some(key) = map.next_key::<Value>()? {
            let name = key_name(&key);
            let value = map.next_value_seed(NodeSeed {
                path: child_path(&path, &name),
                duplicates: &mut *duplicates,
            })?;
            // The last occurrence wins.
            if mapping.insert(key, value).is_some() {
                duplicates.push(field_message(&path, &name, "is set more than once"));
            }
        }
        Ok(Value::Mapping(mapping))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Env, PersistedConfig, Volume};

    #[test]
    fn test_repeated_keys_are_recorded_not_fatal() {
        let document = read_document(b"name: a\nname: b\nannotations:\n  team: x\n  team: y\n").unwrap();
        assert_eq!(
            document.duplicates,
            vec![
                "field name is set more than once",
                "annotations: field team is set more than once",
            ]
        );
        assert_eq!(document.value["name"].as_str(), Some("b"));
        assert_eq!(document.value["annotations"]["team"].as_str(), Some("y"));
    }

    #[test]
    fn test_repeated_keys_in_sequence_entries() {
        let document = read_document(b"volumes:\n  - path: /a\n    path: /b\n").unwrap();
        assert_eq!(
            document.duplicates,
            vec!["volumes[0]: field path is set more than once"]
        );
    }

    #[test]
    fn test_syntax_error_still_fails() {
        assert!(read_document(b"name: [unterminated\n").is_err());
    }

    #[test]
    fn test_prune_reports_every_unknown_key() {
        let mut document = read_document(
            b"nmae: a\nruntim: b\nvolumes:\n  - secret: s\n    mountPath: /x\nenvs:\n  - name: A\n    vaule: b\n",
        )
        .unwrap()
        .value;

        let unknown = prune_unknown_fields(&mut document);
        assert_eq!(
            unknown,
            vec![
                "field nmae is not valid",
                "field runtim is not valid",
                "volumes[0]: field mountPath is not valid",
                "envs[0]: field vaule is not valid",
            ]
        );
        assert!(document.get("nmae").is_none());
        assert!(document["volumes"][0].get("mountPath").is_none());
        assert_eq!(document["volumes"][0]["secret"].as_str(), Some("s"));
    }

    #[test]
    fn test_non_string_keys_are_unknown() {
        let mut document = read_document(b"1: one\nname: a\n").unwrap().value;
        assert_eq!(prune_unknown_fields(&mut document), vec!["field 1 is not valid"]);
    }

    #[test]
    fn test_field_lists_match_serialized_schema() {
        let mut full = PersistedConfig {
            name: Some(String::new()),
            namespace: Some(String::new()),
            runtime: Some(String::new()),
            image: Some(String::new()),
            image_digest: Some(String::new()),
            trigger: Some(String::new()),
            builder: Some(String::new()),
            volumes: vec![Volume {
                secret: Some("s".to_string()),
                config_map: Some("c".to_string()),
                path: Some("/p".to_string()),
            }],
            envs: vec![Env::named("A", "b")],
            ..Default::default()
        };
        full.builder_map.insert("k".to_string(), "v".to_string());
        full.annotations.insert("k".to_string(), "v".to_string());

        let mut value = serde_yaml::to_value(&full).unwrap();
        assert!(prune_unknown_fields(&mut value).is_empty());
        assert_eq!(value.as_mapping().map(Mapping::len), Some(TOP_LEVEL_FIELDS.len()));
        assert_eq!(
            value["volumes"][0].as_mapping().map(Mapping::len),
            Some(VOLUME_FIELDS.len())
        );
        assert_eq!(
            value["envs"][0].as_mapping().map(Mapping::len),
            Some(ENV_FIELDS.len())
        );
    }
}
