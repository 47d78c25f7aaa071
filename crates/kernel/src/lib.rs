//! Arena kernel: the first-person camera, the shootable targets, and the
//! per-frame update that moves the player and resolves shots.
//!
//! # Invariants
//! - All game state (camera, targets, score, cooldown, RNG) is owned by
//!   [`Arena`]; nothing is global.
//! - Movement uses the ground-projected camera basis; shots use the full
//!   3D forward vector.
//! - A hit target is respawned in the same step it dies.

pub mod arena;
pub mod camera;
pub mod spawn;
pub mod target;

pub use arena::{Arena, ArenaEvent, ArenaSummary, FrameOutcome, ShotOutcome};
pub use camera::{FirstPersonCamera, Lens, wrap_angle};
pub use spawn::{SpawnRegion, TARGET_PALETTE};
pub use target::Target;

pub fn crate_info() -> &'static str {
    "arena-kernel v0.1.0"
}
