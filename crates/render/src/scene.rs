use crate::crosshair::Crosshair;
use arena_common::Rgba;
use arena_kernel::Arena;
use glam::{Mat4, Vec3};

/// Cornflower blue sky.
pub const CLEAR_COLOR: Rgba = Rgba::from_rgb8(100, 149, 237);

pub const INSTRUCTIONS: &str =
    "Controls: WASD to move, mouse to look, Left click / Space to shoot, Shift to sprint";

/// One live target to draw with the shared cube mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeInstance {
    pub translation: Vec3,
    pub tint: Rgba,
}

impl CubeInstance {
    pub fn model(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
    }
}

/// 2D overlay drawn on top of the 3D scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score_text: String,
    pub instructions: &'static str,
    pub crosshair: Crosshair,
}

/// Everything a renderer needs for one frame, captured from the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameScene {
    /// Camera position in world space.
    pub eye: Vec3,
    pub view: Mat4,
    pub projection: Mat4,
    pub clear_color: Rgba,
    pub floor_half_size: f32,
    pub cubes: Vec<CubeInstance>,
    pub hud: Hud,
}

impl FrameScene {
    pub fn capture(arena: &Arena) -> Self {
        let camera = arena.camera();
        let cubes: Vec<CubeInstance> = arena
            .targets()
            .iter()
            .filter(|t| t.is_alive())
            .map(|t| CubeInstance {
                translation: t.position(),
                tint: t.color(),
            })
            .collect();
        tracing::trace!(frame = arena.frame(), cubes = cubes.len(), "scene captured");

        Self {
            eye: camera.position(),
            view: camera.view(),
            projection: camera.projection(),
            clear_color: CLEAR_COLOR,
            floor_half_size: arena.config().floor_half_size,
            cubes,
            hud: Hud {
                score_text: format!("Score: {}", arena.score()),
                instructions: INSTRUCTIONS,
                crosshair: Crosshair::default(),
            },
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_common::ArenaConfig;
    use arena_input::Action;

    fn arena() -> Arena {
        let config = ArenaConfig {
            seed: Some(8),
            ..ArenaConfig::default()
        };
        Arena::new(config, 16.0 / 9.0).unwrap()
    }

    #[test]
    fn capture_draws_every_live_target() {
        let arena = arena();
        let scene = FrameScene::capture(&arena);
        assert_eq!(scene.cubes.len(), arena.alive_count());
        assert_eq!(scene.cubes[0].translation, arena.targets()[0].position());
        assert_eq!(scene.cubes[0].tint, arena.targets()[0].color());
        assert_eq!(scene.hud.score_text, "Score: 0");
        assert_eq!(scene.view, arena.camera().view());
    }

    #[test]
    fn dead_targets_are_not_drawn() {
        let mut arena = arena();
        arena.target_mut(2).unwrap().kill();
        let scene = FrameScene::capture(&arena);
        assert_eq!(scene.cubes.len(), 4);
    }

    #[test]
    fn score_text_tracks_hits() {
        let mut arena = arena();
        let target = arena.targets()[0].position();
        let eye = arena.camera().position();
        let to_target = target - eye;
        let yaw = (-to_target.x).atan2(-to_target.z);
        let pitch = (to_target.y / to_target.length()).asin();
        arena.camera_mut().set_orientation(yaw, pitch);
        arena.update(0.0, &[Action::Fire]);
        assert_eq!(FrameScene::capture(&arena).hud.score_text, "Score: 1");
    }

    #[test]
    fn cube_model_is_a_translation() {
        let cube = CubeInstance {
            translation: Vec3::new(1.0, 0.6, -3.0),
            tint: Rgba::WHITE,
        };
        let moved = cube.model().transform_point3(Vec3::ZERO);
        assert_eq!(moved, Vec3::new(1.0, 0.6, -3.0));
    }
}
