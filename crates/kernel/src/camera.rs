use arena_common::Ray;
use glam::{Mat4, Vec3};
use std::f32::consts::{PI, TAU};

const PITCH_LIMIT_DEGREES: f32 = 89.0;

/// Perspective parameters. Defaults: 75° vertical FOV, clip planes 0.1 / 150.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            fov_y: 75.0_f32.to_radians(),
            near: 0.1,
            far: 150.0,
        }
    }
}

/// Walking first-person camera.
///
/// Right-handed, +Y up; yaw 0 / pitch 0 looks down −Z. The eye stays at a
/// fixed height above the ground no matter how the camera is moved. View and
/// projection matrices are cached: the view is rebuilt after every mutation,
/// the projection only when the aspect ratio changes.
#[derive(Debug, Clone)]
pub struct FirstPersonCamera {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    eye_height: f32,
    aspect: f32,
    lens: Lens,
    view: Mat4,
    projection: Mat4,
}

impl FirstPersonCamera {
    pub const DEFAULT_EYE_HEIGHT: f32 = 1.6;

    pub fn new(aspect: f32) -> Self {
        Self::with_lens(aspect, Self::DEFAULT_EYE_HEIGHT, Lens::default())
    }

    pub fn with_lens(aspect: f32, eye_height: f32, lens: Lens) -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, eye_height, 0.0),
            yaw: 0.0,
            pitch: 0.0,
            eye_height,
            aspect: 1.0,
            lens,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection(aspect);
        camera.update_view();
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn eye_height(&self) -> f32 {
        self.eye_height
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn lens(&self) -> Lens {
        self.lens
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Unit view direction from yaw and pitch; −Z if degenerate.
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let forward = Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch);
        normalize_or(forward, Vec3::NEG_Z)
    }

    /// Forward flattened onto the ground plane; −Z if degenerate.
    pub fn forward_on_plane(&self) -> Vec3 {
        let mut forward = self.forward();
        forward.y = 0.0;
        normalize_or(forward, Vec3::NEG_Z)
    }

    pub fn right(&self) -> Vec3 {
        normalize_or(self.forward().cross(Vec3::Y), Vec3::X)
    }

    /// Right vector on the ground plane; +X if degenerate.
    pub fn right_on_plane(&self) -> Vec3 {
        normalize_or(self.forward_on_plane().cross(Vec3::Y), Vec3::X)
    }

    /// Ray from the eye along the full 3D forward vector.
    pub fn ray(&self) -> Ray {
        Ray::new(self.position, self.forward())
    }

    /// Rebuild the projection for a new viewport aspect ratio. Invalid ratios
    /// (zero-sized or minimised windows) keep the previous projection.
    pub fn update_projection(&mut self, aspect: f32) {
        if !(aspect.is_finite() && aspect > 0.0) {
            tracing::debug!(aspect, "ignoring invalid aspect ratio");
            return;
        }
        self.aspect = aspect;
        self.projection =
            Mat4::perspective_rh(self.lens.fov_y, self.aspect, self.lens.near, self.lens.far);
    }

    /// Place the camera at `position`'s horizontal coordinates, at eye height.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = Vec3::new(position.x, self.eye_height, position.z);
        self.update_view();
    }

    pub fn move_by(&mut self, translation: Vec3) {
        self.position += translation;
        self.position.y = self.eye_height;
        self.update_view();
    }

    /// Turn by the given angles (radians). Positive yaw turns right, positive
    /// pitch looks down. Yaw wraps into (-π, π]; pitch is clamped to ±89°.
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        if !(delta_yaw.is_finite() && delta_pitch.is_finite()) {
            tracing::debug!(delta_yaw, delta_pitch, "ignoring non-finite rotation");
            return;
        }
        let limit = PITCH_LIMIT_DEGREES.to_radians();
        self.yaw = wrap_angle(self.yaw - delta_yaw);
        self.pitch = (self.pitch - delta_pitch).clamp(-limit, limit);
        self.update_view();
    }

    /// Point the camera at an absolute yaw/pitch, applying the same wrap and
    /// clamp as [`rotate`](Self::rotate).
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.rotate(self.yaw - yaw, self.pitch - pitch);
    }

    fn update_view(&mut self) {
        self.view = Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y);
    }
}

fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    if v.length_squared() < f32::EPSILON {
        fallback
    } else {
        v.normalize()
    }
}

/// Wrap an angle into (-π, π].
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}
