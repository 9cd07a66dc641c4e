//! Reference expressions accepted inside env values.
//!
//! Responsibilities:
//! - Recognize the `{{ ... }}` mini-language that points an env entry at a
//!   local variable, a secret or a config map.
//! - Expose the identifier rules on their own so they can be tested apart
//!   from the env entry rules.
//!
//! Does NOT handle:
//! - Deciding which forms are allowed for a given env entry (see
//!   `validation::envs`).
//! - Resolving references against a live store.
//!
//! Invariants:
//! - The expression spans the whole value: nothing may precede `{{` or
//!   follow `}}`. Whitespace is only allowed just inside the delimiters.
//! - Store names are word characters with interior `-` or `'` separators;
//!   keys and local variable names are plain word characters.

use std::fmt;

use thiserror::Error;

use crate::constants::{REFERENCE_CLOSE, REFERENCE_OPEN};

const ENV_SOURCE: &str = "env";
const SECRET_SOURCE: &str = "secret";
const CONFIG_MAP_SOURCE: &str = "configMap";

/// A parsed reference expression, borrowing from the source value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference<'a> {
    /// `{{ env.NAME }}`
    Env { name: &'a str },
    /// `{{ secret.store }}` or `{{ secret.store.key }}`
    Secret { store: &'a str, key: Option<&'a str> },
    /// `{{ configMap.store }}` or `{{ configMap.store.key }}`
    ConfigMap { store: &'a str, key: Option<&'a str> },
}

/// Why a value is not a well-formed reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("reference must start with '{{{{'")]
    MissingOpen,

    #[error("reference must end with '}}}}'")]
    MissingClose,

    #[error("reference source '{0}' is not one of env, secret or configMap")]
    UnknownSource(String),

    #[error("reference to {0} is missing a name")]
    MissingName(&'static str),

    #[error("'{0}' is not a valid name")]
    InvalidName(String),

    #[error("'{0}' is not a valid key")]
    InvalidKey(String),
}

impl<'a> Reference<'a> {
    /// Parses `value` as a complete reference expression.
    pub fn parse(value: &'a str) -> Result<Self, ReferenceError> {
        let inner = value
            .strip_prefix(REFERENCE_OPEN)
            .ok_or(ReferenceError::MissingOpen)?
            .strip_suffix(REFERENCE_CLOSE)
            .ok_or(ReferenceError::MissingClose)?;
        let body = inner.trim_matches(is_space);

        let Some((source, rest)) = body.split_once('.') else {
            return Err(ReferenceError::UnknownSource(body.to_string()));
        };

        match source {
            ENV_SOURCE => {
                if rest.is_empty() {
                    Err(ReferenceError::MissingName(ENV_SOURCE))
                } else if is_word(rest) {
                    Ok(Reference::Env { name: rest })
                } else {
                    Err(ReferenceError::InvalidName(rest.to_string()))
                }
            }
            SECRET_SOURCE => {
                let (store, key) = parse_store(SECRET_SOURCE, rest)?;
                Ok(Reference::Secret { store, key })
            }
            CONFIG_MAP_SOURCE => {
                let (store, key) = parse_store(CONFIG_MAP_SOURCE, rest)?;
                Ok(Reference::ConfigMap { store, key })
            }
            other => Err(ReferenceError::UnknownSource(other.to_string())),
        }
    }

    /// True for the forms that import every key of a store.
    pub fn is_whole_store(&self) -> bool {
        matches!(
            self,
            Reference::Secret { key: None, .. } | Reference::ConfigMap { key: None, .. }
        )
    }

    /// True for the forms that yield a single value.
    pub fn is_keyed(&self) -> bool {
        !self.is_whole_store()
    }

    /// The source keyword as written in the expression.
    pub fn source(&self) -> &'static str {
        match self {
            Reference::Env { .. } => ENV_SOURCE,
            Reference::Secret { .. } => SECRET_SOURCE,
            Reference::ConfigMap { .. } => CONFIG_MAP_SOURCE,
        }
    }
}

impl fmt::Display for Reference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}.", REFERENCE_OPEN, self.source())?;
        match self {
            Reference::Env { name } => write!(f, "{name}")?,
            Reference::Secret { store, key } | Reference::ConfigMap { store, key } => {
                write!(f, "{store}")?;
                if let Some(key) = key {
                    write!(f, ".{key}")?;
                }
            }
        }
        write!(f, " {}", REFERENCE_CLOSE)
    }
}

fn parse_store<'a>(
    source: &'static str,
    rest: &'a str,
) -> Result<(&'a str, Option<&'a str>), ReferenceError> {
    let (store, key) = match rest.split_once('.') {
        Some((store, key)) => (store, Some(key)),
        None => (rest, None),
    };

    if store.is_empty() {
        return Err(ReferenceError::MissingName(source));
    }
    if !is_store_name(store) {
        return Err(ReferenceError::InvalidName(store.to_string()));
    }
    if let Some(key) = key
        && !is_word(key)
    {
        return Err(ReferenceError::InvalidKey(key.to_string()));
    }

    Ok((store, key))
}

/// Returns true when `s` is one or more word characters (`[A-Za-z0-9_]`).
pub fn is_word(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_word_byte)
}

/// Returns true when `s` is a valid secret or config map name.
///
/// Word characters, where `-` and `'` may join two word characters but never
/// lead, trail or repeat.
pub fn is_store_name(s: &str) -> bool {
    let bytes = s.as_bytes();
    match bytes.first() {
        Some(&first) if is_word_byte(first) => {}
        _ => return false,
    }

    let mut after_separator = false;
    for &b in &bytes[1..] {
        if is_word_byte(b) {
            after_separator = false;
        } else if is_separator(b) && !after_separator {
            after_separator = true;
        } else {
            return false;
        }
    }
    !after_separator
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_separator(b: u8) -> bool {
    b == b'-' || b == b'\''
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}
