use crate::scene::FrameScene;
use std::fmt::Write;

/// Renderer-agnostic interface. All renderers consume a captured
/// [`FrameScene`] and never touch the arena itself.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, scene: &FrameScene) -> Self::Output;
}

/// Text renderer for headless runs, logs and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &FrameScene) -> String {
        let mut out = String::new();
        let eye = scene.eye;
        let _ = writeln!(out, "=== {} ===", scene.hud.score_text);
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) floor=±{:.0}",
            eye.x, eye.y, eye.z, scene.floor_half_size
        );
        let _ = writeln!(out, "Targets: {}", scene.cubes.len());
        for (i, cube) in scene.cubes.iter().enumerate() {
            let p = cube.translation;
            let c = cube.tint;
            let _ = writeln!(
                out,
                "  [{i}] pos=({:.2}, {:.2}, {:.2}) rgb=({:.2}, {:.2}, {:.2})",
                p.x, p.y, p.z, c.r, c.g, c.b
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_common::ArenaConfig;
    use arena_kernel::Arena;

    fn scene(target_count: usize) -> FrameScene {
        let config = ArenaConfig {
            target_count,
            seed: Some(1),
            ..ArenaConfig::default()
        };
        FrameScene::capture(&Arena::new(config, 1.0).unwrap())
    }

    #[test]
    fn debug_renderer_empty_arena() {
        let output = DebugTextRenderer::new().render(&scene(0));
        assert!(output.contains("Score: 0"));
        assert!(output.contains("Targets: 0"));
        assert!(output.contains("eye=(0.0, 1.6, 8.0)"));
    }

    #[test]
    fn debug_renderer_lists_targets() {
        let output = DebugTextRenderer::new().render(&scene(3));
        assert!(output.contains("Targets: 3"));
        assert_eq!(output.matches("pos=").count(), 3);
    }
}
