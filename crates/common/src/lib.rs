//! Shared types for the target range: colours, bounding boxes, rays, and the
//! arena configuration.
//!
//! # Invariants
//! - No dependency on windowing, input, or GPU crates.
//! - Every config field has a default; a loaded config is validated before use.

mod config;
mod types;

pub use config::{ArenaConfig, ConfigError};
pub use types::{Aabb, Ray, Rgba};

pub fn crate_info() -> &'static str {
    "arena-common v0.1.0"
}
