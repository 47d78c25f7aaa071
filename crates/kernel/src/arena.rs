use crate::camera::{FirstPersonCamera, Lens};
use crate::spawn::SpawnRegion;
use crate::target::Target;
use arena_common::{ArenaConfig, ConfigError, Ray};
use arena_input::Action;
use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Result of a fire attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotOutcome {
    /// The cooldown from the previous shot has not elapsed; nothing happened.
    CoolingDown,
    /// The shot was taken and hit nothing.
    Miss,
    /// The shot hit target `index` at `distance` along the camera ray.
    Hit { index: usize, distance: f32 },
}

impl ShotOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }
}

/// What one [`Arena::update`] step produced.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameOutcome {
    pub quit: bool,
    /// Outcome of the first fire action of the frame, if any.
    pub shot: Option<ShotOutcome>,
}

/// A record of every scoring-relevant change to the arena.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ArenaEvent {
    ShotMissed { frame: u64 },
    TargetHit {
        frame: u64,
        index: usize,
        distance: f32,
        score: u32,
    },
    TargetRespawned {
        frame: u64,
        index: usize,
        position: Vec3,
    },
}

/// All state of a running game: camera, targets, score, fire cooldown and
/// the seeded RNG used for respawns.
pub struct Arena {
    config: ArenaConfig,
    camera: FirstPersonCamera,
    targets: Vec<Target>,
    spawn: SpawnRegion,
    rng: ChaCha8Rng,
    seed: u64,
    score: u32,
    shots: u32,
    fire_cooldown: f32,
    frame: u64,
    /// Append-only log; drained by the caller.
    event_log: Vec<ArenaEvent>,
}

impl Arena {
    /// Validate `config`, place the camera at its start position and spawn
    /// every target.
    pub fn new(config: ArenaConfig, aspect: f32) -> Result<Self, ConfigError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let lens = Lens {
            fov_y: config.fov_y_degrees.to_radians(),
            near: config.near,
            far: config.far,
        };
        let mut camera = FirstPersonCamera::with_lens(aspect, config.eye_height, lens);
        camera.set_position(Vec3::from_array(config.start_position));

        let targets = (0..config.target_count)
            .map(|_| Target::new(config.target_size))
            .collect();

        let mut arena = Self {
            spawn: SpawnRegion::from_config(&config),
            config,
            camera,
            targets,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            score: 0,
            shots: 0,
            fire_cooldown: 0.0,
            frame: 0,
            event_log: Vec::new(),
        };
        for index in 0..arena.targets.len() {
            arena.respawn_target(index);
        }

        tracing::info!(seed, targets = arena.targets.len(), "arena ready");
        Ok(arena)
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn camera(&self) -> &FirstPersonCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut FirstPersonCamera {
        &mut self.camera
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn target_mut(&mut self, index: usize) -> Option<&mut Target> {
        self.targets.get_mut(index)
    }

    pub fn spawn_region(&self) -> SpawnRegion {
        self.spawn
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Shots actually taken (cooldown rejections excluded).
    pub fn shots_fired(&self) -> u32 {
        self.shots
    }

    /// Seconds until the next shot is accepted.
    pub fn fire_cooldown(&self) -> f32 {
        self.fire_cooldown
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn events(&self) -> &[ArenaEvent] {
        &self.event_log
    }

    pub fn drain_events(&mut self) -> Vec<ArenaEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Viewport resized.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.update_projection(aspect);
    }

    /// Advance one frame: tick the cooldown, then apply this frame's actions
    /// in order. A quit action ends the step before anything else runs.
    pub fn update(&mut self, dt: f32, actions: &[Action]) -> FrameOutcome {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.frame += 1;
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);

        let mut outcome = FrameOutcome::default();
        if actions.contains(&Action::Quit) {
            outcome.quit = true;
            return outcome;
        }

        for action in actions {
            match *action {
                Action::Look(delta) => self.look(delta),
                Action::Move { axis, sprint } => self.walk(axis, sprint, dt),
                Action::Fire => {
                    let shot = self.try_fire();
                    outcome.shot.get_or_insert(shot);
                }
                Action::Quit => {}
            }
        }
        outcome
    }

    /// Turn the camera by a pointer delta scaled by the mouse sensitivity.
    pub fn look(&mut self, delta: Vec2) {
        let sensitivity = self.config.mouse_sensitivity;
        self.camera.rotate(delta.x * sensitivity, delta.y * sensitivity);
    }

    /// Walk along the ground plane. `axis.y` is forward, `axis.x` is right.
    pub fn walk(&mut self, axis: Vec2, sprint: bool, dt: f32) {
        let forward = self.camera.forward_on_plane();
        let right = self.camera.right_on_plane();
        let direction = forward * axis.y + right * axis.x;
        if direction.length_squared() <= 0.0 {
            return;
        }
        let mut speed = self.config.move_speed;
        if sprint {
            speed *= self.config.sprint_multiplier;
        }
        self.camera.move_by(direction.normalize() * speed * dt);
    }

    /// Fire if the cooldown allows it. Any shot taken, hit or miss, restarts
    /// the cooldown.
    pub fn try_fire(&mut self) -> ShotOutcome {
        if self.fire_cooldown > 0.0 {
            return ShotOutcome::CoolingDown;
        }
        self.fire_cooldown = self.config.fire_cooldown;
        self.shots += 1;
        self.shoot()
    }

    /// Cast the camera ray and resolve the nearest live target, ignoring the
    /// cooldown. A hit target is killed, respawned and scored.
    pub fn shoot(&mut self) -> ShotOutcome {
        let ray = self.camera.ray();
        let Some((index, distance)) = self.nearest_hit(&ray) else {
            tracing::debug!(frame = self.frame, "shot missed");
            self.event_log.push(ArenaEvent::ShotMissed { frame: self.frame });
            return ShotOutcome::Miss;
        };

        self.targets[index].kill();
        self.score += 1;
        tracing::debug!(index, distance, score = self.score, "target hit");
        self.event_log.push(ArenaEvent::TargetHit {
            frame: self.frame,
            index,
            distance,
            score: self.score,
        });
        self.respawn_target(index);
        ShotOutcome::Hit { index, distance }
    }

    /// Nearest live target along `ray`. On equal distances the target that
    /// comes first wins.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<(usize, f32)> {
        let mut nearest: Option<(usize, f32)> = None;
        for (index, target) in self.targets.iter().enumerate() {
            if !target.is_alive() {
                continue;
            }
            let Some(distance) = ray.intersect_aabb(&target.bounds()) else {
                continue;
            };
            if nearest.is_none_or(|(_, best)| distance < best) {
                nearest = Some((index, distance));
            }
        }
        nearest
    }

    /// Move target `index` to a fresh random spot away from the camera and
    /// mark it alive. Returns the new position.
    pub fn respawn_target(&mut self, index: usize) -> Option<Vec3> {
        let viewer = self.camera.position();
        let target = self.targets.get_mut(index)?;
        let position = self.spawn.place(&mut self.rng, viewer, target.size());
        let color = self.spawn.pick_color(&mut self.rng);
        target.respawn(position, color);

        tracing::debug!(index, x = position.x, z = position.z, "target respawned");
        self.event_log.push(ArenaEvent::TargetRespawned {
            frame: self.frame,
            index,
            position,
        });
        Some(position)
    }

    pub fn alive_count(&self) -> usize {
        self.targets.iter().filter(|t| t.is_alive()).count()
    }

    pub fn summary(&self) -> ArenaSummary {
        let p = self.camera.position();
        ArenaSummary {
            frame: self.frame,
            seed: self.seed,
            score: self.score,
            shots: self.shots,
            alive_targets: self.alive_count(),
            camera_position: [p.x, p.y, p.z],
            yaw_degrees: self.camera.yaw().to_degrees(),
            pitch_degrees: self.camera.pitch().to_degrees(),
        }
    }
}

/// Read-only snapshot of the arena for HUDs, logs and tooling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArenaSummary {
    pub frame: u64,
    pub seed: u64,
    pub score: u32,
    pub shots: u32,
    pub alive_targets: usize,
    pub camera_position: [f32; 3],
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
}

impl ArenaSummary {
    /// Hits per shot taken, in `[0, 1]`.
    pub fn accuracy(&self) -> f32 {
        if self.shots == 0 {
            0.0
        } else {
            self.score as f32 / self.shots as f32
        }
    }
}

impl std::fmt::Display for ArenaSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [x, y, z] = self.camera_position;
        write!(
            f,
            "Arena: frame={} seed={} score={} shots={} accuracy={:.0}% alive={} camera=({x:.1}, {y:.1}, {z:.1}) yaw={:.1} pitch={:.1}",
            self.frame,
            self.seed,
            self.score,
            self.shots,
            self.accuracy() * 100.0,
            self.alive_targets,
            self.yaw_degrees,
            self.pitch_degrees,
        )
    }
}
