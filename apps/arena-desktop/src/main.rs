mod gamepad;

use anyhow::{Context, Result};
use arena_common::ArenaConfig;
use arena_input::{Control, InputFrame};
use arena_kernel::{Arena, ArenaEvent};
use arena_render::{FrameScene, Hud};
use arena_render_wgpu::WgpuRenderer;
use clap::Parser;
use egui::Context as EguiContext;
use gamepad::Gamepads;
use glam::Vec2;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;

#[derive(Parser)]
#[command(name = "arena-desktop", about = "First-person target range")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed for target placement (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,
}

fn control_for_key(key: KeyCode) -> Option<Control> {
    match key {
        KeyCode::KeyW => Some(Control::MoveForward),
        KeyCode::KeyS => Some(Control::MoveBackward),
        KeyCode::KeyA => Some(Control::StrafeLeft),
        KeyCode::KeyD => Some(Control::StrafeRight),
        KeyCode::ShiftLeft => Some(Control::Sprint),
        KeyCode::Space => Some(Control::FireSecondary),
        KeyCode::Escape => Some(Control::Quit),
        _ => None,
    }
}

/// Game state plus per-frame input bookkeeping.
struct AppState {
    arena: Arena,
    input: InputFrame,
    crosshair: Option<egui::TextureHandle>,
    last_frame: Instant,
}

impl AppState {
    fn new(config: ArenaConfig) -> Result<Self> {
        let aspect = WINDOW_WIDTH as f32 / WINDOW_HEIGHT as f32;
        let arena = Arena::new(config, aspect).context("invalid arena configuration")?;
        Ok(Self {
            arena,
            input: InputFrame::new(),
            crosshair: None,
            last_frame: Instant::now(),
        })
    }

    /// One update step. Returns false when the game should exit.
    fn update(&mut self) -> bool {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;

        let actions = self.input.actions();
        let outcome = self.arena.update(dt, &actions);
        self.input.end_frame();

        for event in self.arena.drain_events() {
            match event {
                ArenaEvent::TargetHit { index, score, .. } => {
                    tracing::info!(index, score, "target down");
                }
                other => tracing::debug!(event = ?other),
            }
        }
        !outcome.quit
    }

    fn draw_hud(&mut self, ctx: &EguiContext, hud: &Hud) {
        let crosshair = self.crosshair.get_or_insert_with(|| {
            let size = hud.crosshair.size;
            let image = egui::ColorImage::from_rgba_unmultiplied([size, size], &hud.crosshair.rgba());
            ctx.load_texture("crosshair", image, egui::TextureOptions::NEAREST)
        });

        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("hud"),
        ));
        let screen = ctx.screen_rect();

        painter.image(
            crosshair.id(),
            egui::Rect::from_center_size(screen.center(), crosshair.size_vec2()),
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
        painter.text(
            screen.left_top() + egui::vec2(20.0, 20.0),
            egui::Align2::LEFT_TOP,
            &hud.score_text,
            egui::FontId::proportional(24.0),
            egui::Color32::WHITE,
        );
        painter.text(
            screen.left_bottom() + egui::vec2(20.0, -40.0),
            egui::Align2::LEFT_TOP,
            hud.instructions,
            egui::FontId::proportional(16.0),
            egui::Color32::WHITE,
        );
    }
}

/// Window and GPU resources, created once the event loop is running.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, arena: &Arena, egui_ctx: &EguiContext) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("Target Range")
            .with_resizable(false)
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no suitable GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("arena_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("failed to create GPU device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        // Colours are authored as 8-bit display values, so prefer a
        // non-sRGB target.
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no supported formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let arena_config = arena.config();
        let renderer = WgpuRenderer::new(
            &device,
            surface_format,
            config.width,
            config.height,
            arena_config.floor_half_size,
            arena_config.target_size,
        );

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    /// Hide and lock the cursor while the game has focus.
    fn capture_cursor(&self, captured: bool) {
        if captured {
            let grabbed = self
                .window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(e) = grabbed {
                tracing::warn!("cursor grab unavailable: {e}");
            }
        } else if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
            tracing::debug!("cursor release failed: {e}");
        }
        self.window.set_cursor_visible(!captured);
    }

    fn draw(&mut self, egui_ctx: &EguiContext, state: &mut AppState) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let scene = FrameScene::capture(&state.arena);
        self.renderer
            .render(&self.device, &self.queue, &view, &scene);

        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, |ctx| {
            state.draw_hud(ctx, &scene.hud);
        });
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("hud_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("hud_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        output.present();
    }
}

struct GpuApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    gamepads: Gamepads,
    /// Startup failure to report from `main` once the loop exits.
    fatal: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            gpu: None,
            egui_ctx: EguiContext::default(),
            gamepads: Gamepads::new(),
            fatal: None,
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match Gpu::new(event_loop, &self.state.arena, &self.egui_ctx) {
            Ok(gpu) => {
                self.state.arena.set_aspect(gpu.aspect());
                gpu.capture_cursor(true);
                self.gpu = Some(gpu);
            }
            Err(e) => {
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };
        // The HUD is not interactive; egui only needs to see the events.
        let _ = gpu.egui_winit.on_window_event(&gpu.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                gpu.resize(new_size);
                self.state.arena.set_aspect(gpu.aspect());
            }
            WindowEvent::Focused(focused) => {
                self.state.input.set_focused(focused);
                gpu.capture_cursor(focused);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                if let Some(control) = control_for_key(key) {
                    self.state
                        .input
                        .set_control(control, key_state == ElementState::Pressed);
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                self.state
                    .input
                    .set_control(Control::FirePrimary, btn_state == ElementState::Pressed);
            }
            WindowEvent::RedrawRequested => {
                if !self.state.update() {
                    event_loop.exit();
                    return;
                }
                gpu.draw(&self.egui_ctx, &mut self.state);
                gpu.window.request_redraw();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.state.input.is_focused() {
                self.state
                    .input
                    .add_pointer_motion(Vec2::new(delta.0 as f32, delta.1 as f32));
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.gamepads.poll(&mut self.state.input);
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn load_config(cli: &Cli) -> Result<ArenaConfig> {
    let mut config = match &cli.config {
        Some(path) => ArenaConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ArenaConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("arena-desktop starting");

    let state = AppState::new(load_config(&cli)?)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state);
    event_loop.run_app(&mut app)?;

    if let Some(err) = app.fatal.take() {
        return Err(err);
    }

    tracing::info!(score = app.state.arena.score(), "arena-desktop exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_keys_are_bound() {
        assert_eq!(control_for_key(KeyCode::KeyW), Some(Control::MoveForward));
        assert_eq!(control_for_key(KeyCode::KeyA), Some(Control::StrafeLeft));
        assert_eq!(control_for_key(KeyCode::ShiftLeft), Some(Control::Sprint));
        assert_eq!(control_for_key(KeyCode::Space), Some(Control::FireSecondary));
        assert_eq!(control_for_key(KeyCode::Escape), Some(Control::Quit));
        assert_eq!(control_for_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn seed_flag_overrides_config() {
        let cli = Cli {
            verbose: false,
            config: None,
            seed: Some(99),
        };
        let config = load_config(&cli).unwrap();
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.target_count, ArenaConfig::default().target_count);
    }
}
