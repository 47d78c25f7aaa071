use arena_common::{Aabb, Rgba};
use glam::Vec3;

/// A shootable cube. Targets are never destroyed: a hit target is killed and
/// immediately respawned somewhere else.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    position: Vec3,
    color: Rgba,
    size: f32,
    alive: bool,
}

impl Target {
    /// A dead, white target at the origin. Call [`respawn`](Self::respawn)
    /// to place it.
    pub fn new(size: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            color: Rgba::WHITE,
            size,
            alive: false,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Cube-shaped bounds centred on the position.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_half_extent(self.position, Vec3::splat(self.size * 0.5))
    }

    pub fn respawn(&mut self, position: Vec3, color: Rgba) {
        self.position = position;
        self.color = color;
        self.alive = true;
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_target_is_dead() {
        let t = Target::new(1.2);
        assert!(!t.is_alive());
        assert_eq!(t.position(), Vec3::ZERO);
        assert_eq!(t.color(), Rgba::WHITE);
    }

    #[test]
    fn bounds_follow_position_and_size() {
        let mut t = Target::new(1.2);
        t.respawn(Vec3::new(4.0, 0.6, -2.0), Rgba::from_rgb8(0, 255, 255));
        let b = t.bounds();
        assert!((b.min - Vec3::new(3.4, 0.0, -2.6)).length() < 1e-5);
        assert!((b.max - Vec3::new(4.6, 1.2, -1.4)).length() < 1e-5);
    }

    #[test]
    fn kill_then_respawn() {
        let mut t = Target::new(1.0);
        t.respawn(Vec3::X, Rgba::WHITE);
        assert!(t.is_alive());
        t.kill();
        assert!(!t.is_alive());
        t.respawn(Vec3::Z, Rgba::WHITE);
        assert!(t.is_alive());
        assert_eq!(t.position(), Vec3::Z);
    }
}
