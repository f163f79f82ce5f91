//! Dust Arena - first-person movement demo
//!
//! Walk a capsule around a walled sand arena. Enter starts, click captures
//! the view, Esc releases it and Esc again returns to the menu.
//!
//! Run with: `cargo run --bin dust_arena [config.json] [--headless TICKS]`
//! Logging follows `RUST_LOG` (default `info`).

use std::sync::Arc;

use tracing::{info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode as WinitKey, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowAttributes, WindowId};

use dust_arena_engine::config::SimulationConfig;
use dust_arena_engine::input::KeyCode;
use dust_arena_engine::render::{GpuContextConfig, HeadlessRenderer, WgpuRenderer};
use dust_arena_engine::simulation::{
    FrameId, HeadlessHost, HostChannel, HostEvent, ListenerId, ListenerTable, SimulationController,
    SimulationEvent, SimulationHost,
};

const TITLE: &str = "Dust Arena";

/// Host backed by the winit event loop: frames are window redraws.
#[derive(Default)]
struct WinitHost {
    table: ListenerTable,
    window: Option<Arc<Window>>,
}

impl SimulationHost for WinitHost {
    fn add_listener(&mut self, channel: HostChannel) -> ListenerId {
        self.table.add(channel)
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.table.remove(id)
    }

    fn is_listening(&self, channel: HostChannel) -> bool {
        self.table.is_listening(channel)
    }

    fn listener_count(&self) -> usize {
        self.table.len()
    }

    fn request_frame(&mut self) -> FrameId {
        let id = self.table.request_frame();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
        id
    }

    fn cancel_frame(&mut self, id: FrameId) -> bool {
        // A redraw already queued with winit still arrives; it finds no
        // pending request and is ignored.
        self.table.cancel_frame(id)
    }

    fn pending_frame(&self) -> Option<FrameId> {
        self.table.pending_frame()
    }

    fn take_pending_frame(&mut self) -> Option<FrameId> {
        self.table.take_pending_frame()
    }
}

fn map_key(key: WinitKey) -> KeyCode {
    match key {
        WinitKey::KeyW => KeyCode::W,
        WinitKey::KeyA => KeyCode::A,
        WinitKey::KeyS => KeyCode::S,
        WinitKey::KeyD => KeyCode::D,
        WinitKey::ArrowUp => KeyCode::ArrowUp,
        WinitKey::ArrowDown => KeyCode::ArrowDown,
        WinitKey::ArrowLeft => KeyCode::ArrowLeft,
        WinitKey::ArrowRight => KeyCode::ArrowRight,
        WinitKey::Escape => KeyCode::Escape,
        WinitKey::Enter | WinitKey::NumpadEnter => KeyCode::Enter,
        _ => KeyCode::Unknown,
    }
}

struct DustArenaApp {
    window: Option<Arc<Window>>,
    sim: SimulationController<WinitHost, WgpuRenderer>,
}

impl DustArenaApp {
    fn new(config: SimulationConfig) -> Self {
        Self {
            window: None,
            sim: SimulationController::new(config, WinitHost::default()),
        }
    }

    fn start_simulation(&mut self) {
        let Some(window) = self.window.clone() else {
            return;
        };
        if self.sim.is_running() {
            self.sim.stop();
        }

        let renderer = match WgpuRenderer::new(
            Arc::clone(&window),
            &self.sim.config().level,
            GpuContextConfig::default(),
        ) {
            Ok(renderer) => renderer,
            Err(e) => {
                warn!(error = %e, "could not create renderer");
                return;
            }
        };

        if let Err(e) = self.sim.start(renderer) {
            warn!(error = %e, "simulation did not start");
        }
    }

    fn handle_escape(&mut self) {
        if self.sim.is_engaged() {
            self.sim.unlock_pointer();
        } else if self.sim.is_running() {
            self.sim.stop();
        }
    }

    /// Push capture state to the window and surface controller events.
    fn sync_window(&mut self) {
        let Some(window) = self.window.clone() else {
            return;
        };

        if self.sim.capture().is_dirty() {
            if self.sim.capture().should_grab() {
                if window.set_cursor_grab(CursorGrabMode::Locked).is_err() {
                    let _ = window.set_cursor_grab(CursorGrabMode::Confined);
                }
                window.set_cursor_visible(false);
            } else {
                let _ = window.set_cursor_grab(CursorGrabMode::None);
                window.set_cursor_visible(true);
            }
            self.sim.clear_capture_dirty();
        }

        let events = self.sim.drain_events();
        if events.is_empty() {
            return;
        }
        for event in &events {
            info!(?event, "simulation event");
        }
        let title = match events.last() {
            Some(SimulationEvent::Stopped) => format!("{TITLE} - Press Enter to start"),
            Some(SimulationEvent::Started | SimulationEvent::Paused) => {
                format!("{TITLE} - Click to play, Esc for menu")
            }
            Some(SimulationEvent::Resumed) => format!("{TITLE} - Esc to release cursor"),
            None => return,
        };
        window.set_title(&title);
    }
}

impl ApplicationHandler for DustArenaApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = WindowAttributes::default()
            .with_title(format!("{TITLE} - Press Enter to start"))
            .with_inner_size(PhysicalSize::new(1280, 720));
        match event_loop.create_window(attrs) {
            Ok(window) => {
                let window = Arc::new(window);
                self.sim.host_mut().window = Some(Arc::clone(&window));
                self.window = Some(window);
            }
            Err(e) => {
                warn!(error = %e, "failed to create window");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.sim.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.sim.dispatch(HostEvent::Resize {
                    width: size.width,
                    height: size.height,
                });
            }
            WindowEvent::Focused(focused) => self.sim.focus_changed(focused),
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key = map_key(code);
                let pressed = event.state == ElementState::Pressed;

                if pressed && !event.repeat {
                    match key {
                        KeyCode::Enter if !self.sim.is_engaged() => self.start_simulation(),
                        KeyCode::Escape => self.handle_escape(),
                        _ => {}
                    }
                }

                let host_event = if pressed {
                    HostEvent::KeyDown(key)
                } else {
                    HostEvent::KeyUp(key)
                };
                self.sim.dispatch(host_event);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.sim.lock_pointer();
            }
            WindowEvent::RedrawRequested => {
                self.sim.on_frame();
            }
            _ => {}
        }
        self.sync_window();
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.sim.apply_look_delta(delta.0 as f32, delta.1 as f32);
        }
    }
}

/// Hold forward for `ticks` frames without a window and log the result.
fn run_headless(config: SimulationConfig, ticks: u64) -> Result<(), Box<dyn std::error::Error>> {
    let renderer = HeadlessRenderer::default();
    let log = renderer.log();
    let mut sim = SimulationController::new(config, HeadlessHost::new());

    sim.start(renderer)?;
    sim.lock_pointer();
    sim.dispatch(HostEvent::KeyDown(KeyCode::W));

    for _ in 0..ticks {
        sim.on_frame();
    }

    if let Some(report) = sim.last_tick() {
        info!(
            tick = report.tick,
            body = %report.body_position,
            camera = %report.camera_position,
            velocity = %report.commanded_velocity,
            "headless run finished"
        );
    }
    sim.stop();

    let frames = log.snapshot();
    info!(
        frames = frames.frames,
        failed = frames.failed_frames,
        disposed = frames.disposed,
        "headless renderer"
    );
    Ok(())
}

struct Args {
    config_path: Option<String>,
    headless_ticks: Option<u64>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config_path: None,
        headless_ticks: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--headless" => {
                let ticks = iter
                    .next()
                    .ok_or("--headless needs a tick count")?
                    .parse::<u64>()
                    .map_err(|e| format!("invalid tick count: {e}"))?;
                args.headless_ticks = Some(ticks);
            }
            _ if args.config_path.is_none() => args.config_path = Some(arg),
            _ => return Err(format!("unexpected argument: {arg}")),
        }
    }
    Ok(args)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = parse_args()?;
    let config = match &args.config_path {
        Some(path) => {
            info!(path = %path, "loading config");
            SimulationConfig::load(path)?
        }
        None => SimulationConfig::default(),
    };

    if let Some(ticks) = args.headless_ticks {
        return run_headless(config, ticks);
    }

    info!("Controls: Enter start, click capture, WASD/arrows move, Esc release / menu");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut app = DustArenaApp::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
