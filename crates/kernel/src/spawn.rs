use arena_common::{ArenaConfig, Rgba};
use glam::{Vec2, Vec3};
use rand::Rng;

/// Colours a respawned target is drawn in.
pub const TARGET_PALETTE: [Rgba; 6] = [
    Rgba::from_rgb8(220, 20, 60),   // crimson
    Rgba::from_rgb8(255, 140, 0),   // dark orange
    Rgba::from_rgb8(255, 215, 0),   // gold
    Rgba::from_rgb8(0, 255, 255),   // cyan
    Rgba::from_rgb8(147, 112, 219), // medium purple
    Rgba::from_rgb8(127, 255, 0),   // chartreuse
];

/// Square area of the ground plane targets respawn in, kept at a minimum
/// distance from the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRegion {
    half_range: f32,
    min_distance: f32,
    max_attempts: u32,
}

impl Default for SpawnRegion {
    fn default() -> Self {
        Self::from_config(&ArenaConfig::default())
    }
}

impl SpawnRegion {
    pub fn from_config(config: &ArenaConfig) -> Self {
        Self::new(
            config.spawn_half_range,
            config.spawn_min_distance,
            config.spawn_max_attempts,
        )
    }

    pub fn new(half_range: f32, min_distance: f32, max_attempts: u32) -> Self {
        Self {
            half_range,
            min_distance,
            max_attempts,
        }
    }

    pub fn half_range(&self) -> f32 {
        self.half_range
    }

    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Usable half-extent of the square. A negative or non-finite range
    /// collapses to the origin.
    fn extent(&self) -> f32 {
        if self.half_range.is_finite() {
            self.half_range.max(0.0)
        } else {
            0.0
        }
    }

    /// Rejection-sample a resting position for a target of edge `size`.
    ///
    /// Candidates are uniform over the square; the first one at least
    /// `min_distance` (horizontally) from `viewer` wins. After `max_attempts`
    /// rejections the square's corner farthest from the viewer is used. An
    /// empty square skips sampling and goes straight to that fallback.
    pub fn place(&self, rng: &mut impl Rng, viewer: Vec3, size: f32) -> Vec3 {
        let viewer = Vec2::new(viewer.x, viewer.z);
        let min_distance_sq = self.min_distance * self.min_distance;
        let y = size * 0.5;
        let h = self.extent();
        let attempts = if h > 0.0 { self.max_attempts } else { 0 };

        for _ in 0..attempts {
            let candidate = Vec2::new(rng.gen_range(-h..=h), rng.gen_range(-h..=h));
            if candidate.distance_squared(viewer) >= min_distance_sq {
                return Vec3::new(candidate.x, y, candidate.y);
            }
        }

        let corner = self.farthest_corner(viewer);
        tracing::warn!(
            attempts,
            x = corner.x,
            z = corner.y,
            "respawn sampling exhausted, using farthest corner"
        );
        Vec3::new(corner.x, y, corner.y)
    }

    pub fn pick_color(&self, rng: &mut impl Rng) -> Rgba {
        TARGET_PALETTE[rng.gen_range(0..TARGET_PALETTE.len())]
    }

    /// Whether `point` lies inside the square (inclusive).
    pub fn contains(&self, point: Vec3) -> bool {
        point.x.abs() <= self.half_range && point.z.abs() <= self.half_range
    }

    fn farthest_corner(&self, viewer: Vec2) -> Vec2 {
        let h = self.extent();
        let x = if viewer.x > 0.0 { -h } else { h };
        let z = if viewer.y > 0.0 { -h } else { h };
        Vec2::new(x, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
        Vec2::new(a.x - b.x, a.z - b.z).length()
    }

    #[test]
    fn placements_respect_distance_and_bounds() {
        let region = SpawnRegion::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for viewer in [
            Vec3::new(0.0, 1.6, 8.0),
            Vec3::new(24.0, 1.6, -24.0),
            Vec3::new(-40.0, 1.6, 3.0),
        ] {
            for _ in 0..500 {
                let p = region.place(&mut rng, viewer, 1.2);
                assert!(region.contains(p));
                assert!(horizontal_distance(p, viewer) >= region.min_distance);
                assert!((p.y - 0.6).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn same_seed_same_placement() {
        let region = SpawnRegion::default();
        let mut a = ChaCha8Rng::seed_from_u64(11);
        let mut b = ChaCha8Rng::seed_from_u64(11);
        let viewer = Vec3::new(1.0, 1.6, 2.0);
        assert_eq!(
            region.place(&mut a, viewer, 1.0),
            region.place(&mut b, viewer, 1.0)
        );
    }

    #[test]
    fn exhausted_sampling_falls_back_to_far_corner() {
        // Every candidate is rejected: the square is tiny and the minimum
        // distance covers all of it.
        let region = SpawnRegion::new(1.0, 2.5, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let viewer = Vec3::new(0.5, 1.6, -0.5);
        let p = region.place(&mut rng, viewer, 2.0);
        assert_eq!(p, Vec3::new(-1.0, 1.0, 1.0));
    }

    #[test]
    fn empty_region_places_at_origin() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let viewer = Vec3::new(3.0, 1.6, 4.0);
        for half_range in [-1.0, 0.0, f32::NAN, f32::INFINITY] {
            let region = SpawnRegion::new(half_range, 6.0, 16);
            let p = region.place(&mut rng, viewer, 1.2);
            assert_eq!(p, Vec3::new(0.0, 0.6, 0.0));
        }
    }

    #[test]
    fn from_config_copies_spawn_fields() {
        let region = SpawnRegion::default();
        assert_eq!(region.half_range(), 25.0);
        assert_eq!(region.min_distance(), 6.0);
        assert_eq!(region.max_attempts(), 64);
    }

    #[test]
    fn colors_come_from_palette() {
        let region = SpawnRegion::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..50 {
            assert!(TARGET_PALETTE.contains(&region.pick_color(&mut rng)));
        }
    }
}
