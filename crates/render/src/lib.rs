//! Rendering adapter: a renderer-agnostic description of one frame.
//!
//! # Invariants
//! - Renderers never mutate arena state; a [`FrameScene`] is captured from a
//!   read-only borrow.
//! - One static floor quad and one static cube mesh; each live target is a
//!   cube instance with a translation and a colour tint.

mod crosshair;
mod mesh;
mod renderer;
mod scene;

pub use crosshair::Crosshair;
pub use mesh::{ColorVertex, Mesh};
pub use renderer::{DebugTextRenderer, Renderer};
pub use scene::{CubeInstance, FrameScene, Hud, CLEAR_COLOR, INSTRUCTIONS};

pub fn crate_info() -> &'static str {
    "arena-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
