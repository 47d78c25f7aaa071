use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating an [`ArenaConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunables for the arena. Every field falls back to its default when absent
/// from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Camera height above the ground plane.
    pub eye_height: f32,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Radians of rotation per unit of pointer motion.
    pub mouse_sensitivity: f32,
    /// Walking speed in units per second.
    pub move_speed: f32,
    pub sprint_multiplier: f32,
    /// Seconds between accepted shots.
    pub fire_cooldown: f32,
    /// Edge length of every target cube.
    pub target_size: f32,
    pub target_count: usize,
    /// Targets spawn with x and z in `[-spawn_half_range, spawn_half_range]`.
    pub spawn_half_range: f32,
    /// Minimum horizontal distance between a fresh target and the camera.
    pub spawn_min_distance: f32,
    pub spawn_max_attempts: u32,
    /// Initial camera position; the y component is replaced by `eye_height`.
    pub start_position: [f32; 3],
    pub floor_half_size: f32,
    /// RNG seed. A random seed is chosen at startup when absent.
    pub seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            eye_height: 1.6,
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 150.0,
            mouse_sensitivity: 0.0025,
            move_speed: 6.0,
            sprint_multiplier: 1.8,
            fire_cooldown: 0.25,
            target_size: 1.2,
            target_count: 5,
            spawn_half_range: 25.0,
            spawn_min_distance: 6.0,
            spawn_max_attempts: 64,
            start_position: [0.0, 0.0, 8.0],
            floor_half_size: 32.0,
            seed: None,
        }
    }
}

impl ArenaConfig {
    /// Parse a YAML document and validate it.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&source)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject values the simulation cannot run with.
    ///
    /// `spawn_min_distance < spawn_half_range` guarantees that, wherever the
    /// camera stands, part of the spawn square lies far enough away, so
    /// respawn sampling always has somewhere to land.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("eye_height", self.eye_height)?;
        positive("near", self.near)?;
        positive("far", self.far)?;
        positive("mouse_sensitivity", self.mouse_sensitivity)?;
        positive("move_speed", self.move_speed)?;
        positive("sprint_multiplier", self.sprint_multiplier)?;
        positive("target_size", self.target_size)?;
        positive("spawn_half_range", self.spawn_half_range)?;
        positive("floor_half_size", self.floor_half_size)?;

        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            return Err(invalid(
                "fov_y_degrees",
                format!("{} is outside (0, 180)", self.fov_y_degrees),
            ));
        }
        if self.near >= self.far {
            return Err(invalid(
                "far",
                format!("far plane {} must lie beyond near plane {}", self.far, self.near),
            ));
        }
        if !self.fire_cooldown.is_finite() || self.fire_cooldown < 0.0 {
            return Err(invalid(
                "fire_cooldown",
                format!("{} must be a non-negative number", self.fire_cooldown),
            ));
        }
        if !self.spawn_min_distance.is_finite() || self.spawn_min_distance < 0.0 {
            return Err(invalid(
                "spawn_min_distance",
                format!("{} must be a non-negative number", self.spawn_min_distance),
            ));
        }
        if self.spawn_min_distance >= self.spawn_half_range {
            return Err(invalid(
                "spawn_min_distance",
                format!(
                    "{} must be smaller than spawn_half_range {}",
                    self.spawn_min_distance, self.spawn_half_range
                ),
            ));
        }
        if self.spawn_max_attempts == 0 {
            return Err(invalid("spawn_max_attempts", "must be at least 1".into()));
        }
        if self.start_position.iter().any(|c| !c.is_finite()) {
            return Err(invalid(
                "start_position",
                format!("{:?} has a non-finite component", self.start_position),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be a positive number")))
    }
}
