//! Input: polled keyboard/pointer state turned into per-frame actions.
//!
//! # Invariants
//! - Edges and pointer deltas compare the current snapshot against the
//!   snapshot taken at the end of the previous frame, never mid-frame.
//! - The arena consumes [`Action`]s, never raw window events.

pub mod action;
pub mod frame;

pub use action::Action;
pub use frame::{Control, InputFrame, InputSnapshot};

pub fn crate_info() -> &'static str {
    "arena-input v0.1.0"
}
