//! Under-sampling methods

pub mod nearmiss;

pub use nearmiss::{NearMiss, NearMissSelection, SUPPORTED_VERSIONS};
