use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Linear RGBA colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from 8-bit channels.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centred on `center` extending `half_extent` along each axis.
    pub fn from_center_half_extent(center: Vec3, half_extent: Vec3) -> Self {
        Self {
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extent(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Half-line starting at `origin` along `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Slab test against `aabb`.
    ///
    /// Returns the distance along the ray (in units of `direction`) at which
    /// the ray enters the box, `0.0` if the origin is already inside, or
    /// `None` if the box lies entirely off the ray or behind the origin.
    pub fn intersect_aabb(&self, aabb: &Aabb) -> Option<f32> {
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let dir = self.direction[axis];
            let (min, max) = (aabb.min[axis], aabb.max[axis]);

            if dir.abs() < f32::EPSILON {
                // Parallel to this slab: must already be between the planes.
                if origin < min || origin > max {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let mut t0 = (min - origin) * inv;
            let mut t1 = (max - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }

        if t_far < 0.0 {
            return None;
        }
        Some(t_near.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box_at(center: Vec3) -> Aabb {
        Aabb::from_center_half_extent(center, Vec3::splat(0.5))
    }

    #[test]
    fn rgb8_is_normalized() {
        let c = Rgba::from_rgb8(255, 0, 51);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 0.2).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn aabb_center_and_extent() {
        let b = Aabb::from_center_half_extent(Vec3::new(1.0, 2.0, 3.0), Vec3::splat(0.6));
        assert!((b.center() - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
        assert!((b.half_extent() - Vec3::splat(0.6)).length() < 1e-6);
        assert!(b.contains(Vec3::new(1.5, 2.5, 3.5)));
        assert!(!b.contains(Vec3::new(1.7, 2.0, 3.0)));
    }

    #[test]
    fn ray_hits_box_ahead() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let t = ray.intersect_aabb(&unit_box_at(Vec3::ZERO)).unwrap();
        assert!((t - 4.5).abs() < 1e-5);
    }

    #[test]
    fn ray_misses_box_behind() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(ray.intersect_aabb(&unit_box_at(Vec3::ZERO)).is_none());
    }

    #[test]
    fn ray_misses_box_to_the_side() {
        let ray = Ray::new(Vec3::new(2.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(ray.intersect_aabb(&unit_box_at(Vec3::ZERO)).is_none());
    }

    #[test]
    fn ray_passing_over_box_misses() {
        let ray = Ray::new(Vec3::new(0.0, 1.6, 8.0), Vec3::NEG_Z);
        let target = Aabb::from_center_half_extent(Vec3::new(0.0, 0.6, 0.0), Vec3::splat(0.6));
        assert!(ray.intersect_aabb(&target).is_none());
    }

    #[test]
    fn ray_from_inside_reports_zero() {
        let ray = Ray::new(Vec3::new(0.1, 0.0, 0.0), Vec3::X);
        assert_eq!(ray.intersect_aabb(&unit_box_at(Vec3::ZERO)), Some(0.0));
    }

    #[test]
    fn diagonal_ray_enters_at_corner_region() {
        let dir = Vec3::new(-1.0, 0.0, -1.0).normalize();
        let ray = Ray::new(Vec3::new(3.0, 0.0, 3.0), dir);
        let t = ray.intersect_aabb(&unit_box_at(Vec3::ZERO)).unwrap();
        let entry = ray.at(t);
        assert!((entry.x - 0.5).abs() < 1e-4);
        assert!((entry.z - 0.5).abs() < 1e-4);
    }
}
