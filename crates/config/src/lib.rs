//! Function descriptor configuration.
//!
//! This crate loads, validates and saves `func.yaml`, the descriptor of a
//! deployable function, and maps it to the [`Function`] domain model.
//! Volume and env entries are checked against the reference grammar in
//! [`reference`]; every defect found in one pass is reported together.

pub mod constants;
mod error;
pub mod persistence;
pub mod reference;
mod report;
pub mod types;
pub mod validation;

pub use constants::CONFIG_FILE;
pub use error::ConfigError;
pub use persistence::{load, parse_config, read_config_file, save};
pub use reference::{Reference, ReferenceError};
pub use report::ValidationReport;
pub use types::{Env, Function, PersistedConfig, Volume};
pub use validation::{validate_envs, validate_volumes};
