use anyhow::Context;
use arena_common::ArenaConfig;
use arena_input::Action;
use arena_kernel::{Arena, ArenaEvent, wrap_angle};
use arena_render::{DebugTextRenderer, FrameScene, Renderer};
use clap::{Parser, Subcommand};
use glam::Vec2;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arena-cli", about = "CLI tool for target range operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate info
    Info,
    /// Run the arena headless with a scripted shooter
    Simulate {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "600")]
        frames: u64,
        /// RNG seed for target placement
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Fixed frame time in seconds
        #[arg(long, default_value = "0.016666668")]
        dt: f32,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
        /// YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Load and validate a YAML config file
    CheckConfig {
        path: PathBuf,
    },
}

/// Turns toward the nearest live target at a bounded rate and fires once the
/// remaining turn fits in a single frame.
#[derive(Debug, Clone, Copy)]
struct AimBot {
    /// Largest turn per frame, radians.
    max_turn: f32,
}

impl Default for AimBot {
    fn default() -> Self {
        Self { max_turn: 0.2 }
    }
}

impl AimBot {
    fn plan(&self, arena: &Arena) -> Vec<Action> {
        let camera = arena.camera();
        let eye = camera.position();
        let Some(target) = arena
            .targets()
            .iter()
            .filter(|t| t.is_alive())
            .map(|t| t.position())
            .min_by(|a, b| a.distance_squared(eye).total_cmp(&b.distance_squared(eye)))
        else {
            return Vec::new();
        };

        let to_target = target - eye;
        let len = to_target.length();
        if len <= f32::EPSILON {
            return vec![Action::Fire];
        }
        let yaw = (-to_target.x).atan2(-to_target.z);
        let pitch = (to_target.y / len).asin();

        // Rotation is `yaw -= delta`, so the delta is current minus desired.
        let turn = Vec2::new(
            wrap_angle(camera.yaw() - yaw),
            camera.pitch() - pitch,
        );
        let on_target = turn.abs().max_element() <= self.max_turn;
        let turn = turn.clamp(Vec2::splat(-self.max_turn), Vec2::splat(self.max_turn));

        let sensitivity = arena.config().mouse_sensitivity;
        let mut actions = vec![Action::Look(turn / sensitivity)];
        if on_target {
            actions.push(Action::Fire);
        }
        actions
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ArenaConfig> {
    match path {
        Some(path) => ArenaConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(ArenaConfig::default()),
    }
}

fn simulate(config: ArenaConfig, frames: u64, dt: f32) -> anyhow::Result<Arena> {
    let mut arena = Arena::new(config, 16.0 / 9.0).context("invalid arena configuration")?;
    let bot = AimBot::default();

    for _ in 0..frames {
        let actions = bot.plan(&arena);
        arena.update(dt, &actions);
        for event in arena.drain_events() {
            match event {
                ArenaEvent::TargetHit {
                    frame,
                    index,
                    distance,
                    score,
                } => tracing::info!(frame, index, distance, score, "hit"),
                other => tracing::debug!(event = ?other),
            }
        }
    }
    Ok(arena)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("arena-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", arena_common::crate_info());
            println!("input: {}", arena_input::crate_info());
            println!("kernel: {}", arena_kernel::crate_info());
            println!("render: {}", arena_render::crate_info());
        }
        Commands::Simulate {
            frames,
            seed,
            dt,
            json,
            config,
        } => {
            let mut config = load_config(config.as_deref())?;
            config.seed = Some(seed);
            let arena = simulate(config, frames, dt)?;
            let summary = arena.summary();

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{summary}");
                print!("{}", DebugTextRenderer::new().render(&FrameScene::capture(&arena)));
            }
        }
        Commands::CheckConfig { path } => {
            let config = load_config(Some(&path))?;
            println!("{}: OK", path.display());
            print!("{}", config.to_yaml_string()?);
        }
    }

    Ok(())
}
