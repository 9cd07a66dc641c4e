//! Structural validation of descriptor sections.
//!
//! Responsibilities:
//! - Check `volumes` and `envs` entries for the allowed field combinations.
//! - Produce one human-readable message per faulty entry.
//!
//! Does NOT handle:
//! - Parsing reference expressions (see `reference`).
//! - Assembling messages into a report (see `report`).
//!
//! Invariants:
//! - Validators are pure: they never touch the filesystem or shared state.
//! - Output order follows input order; indices are 0-based.

mod envs;
mod volumes;

pub use envs::{validate_env, validate_envs};
pub use volumes::{validate_volume, validate_volumes};
