//! Descriptor and domain types.
//!
//! Responsibilities:
//! - Define the persisted schema (`PersistedConfig`, `Volume`, `Env`).
//! - Define the `Function` domain model and its mapping to the schema.
//!
//! Does NOT handle:
//! - File I/O (see `persistence`).
//! - Validation of field combinations (see `validation`).

mod config;
mod env;
mod function;
mod volume;

pub use config::PersistedConfig;
pub use env::Env;
pub use function::Function;
pub use volume::Volume;
