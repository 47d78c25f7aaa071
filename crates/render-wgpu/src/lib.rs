//! wgpu render backend for the target range.
//!
//! Draws the floor quad and one instanced cube per live target with a flat,
//! unlit vertex-colour shader.
//!
//! # Invariants
//! - Renderer only reads a captured [`arena_render::FrameScene`].
//! - Projection changes arrive through the scene; the backend only owns the
//!   depth buffer that must follow the surface size.

mod gpu;
mod shaders;

pub use gpu::WgpuRenderer;
