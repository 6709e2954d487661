//! CLI command implementations.

pub mod common;
pub mod pluck;
pub mod preset;
pub mod presets;
