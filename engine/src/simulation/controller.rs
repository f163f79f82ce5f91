//! Simulation Loop Controller
//!
//! Owns the start/stop lifecycle and runs one tick per host frame:
//!
//! 1. snapshot the movement keys
//! 2. write the resolved horizontal velocity (zero while disengaged)
//! 3. step physics once
//! 4. move the camera to the body's eye position
//! 5. render, then request the next frame
//!
//! Engagement (pointer capture) never stops the loop; it only gates
//! movement and look input and is reported as Paused/Resumed.

use tracing::{debug, error, info, warn};

use super::events::{SimulationEvent, SimulationState, TickReport};
use super::host::{HostChannel, HostEvent, ListenerId, SimulationHost};
use super::session::SimulationSession;
use crate::camera::FpsCamera;
use crate::config::SimulationConfig;
use crate::error::SimulationResult;
use crate::input::{CaptureTransition, KeyboardState, PointerCapture};
use crate::render::RenderBackend;

const SUBSCRIBED_CHANNELS: [HostChannel; 3] =
    [HostChannel::Resize, HostChannel::KeyDown, HostChannel::KeyUp];

pub struct SimulationController<H: SimulationHost, R: RenderBackend> {
    config: SimulationConfig,
    host: H,
    keyboard: KeyboardState,
    capture: PointerCapture,
    session: Option<SimulationSession<R>>,
    subscriptions: Vec<ListenerId>,
    state: SimulationState,
    events: Vec<SimulationEvent>,
    last_tick: Option<TickReport>,
}

impl<H: SimulationHost, R: RenderBackend> SimulationController<H, R> {
    pub fn new(config: SimulationConfig, host: H) -> Self {
        Self {
            config,
            host,
            keyboard: KeyboardState::new(),
            capture: PointerCapture::new(),
            session: None,
            subscriptions: Vec::new(),
            state: SimulationState::Stopped,
            events: Vec::new(),
            last_tick: None,
        }
    }

    /// Create the session, subscribe to host events and request the first
    /// frame.
    ///
    /// A second `start` while running is ignored (the extra renderer is
    /// disposed). On failure nothing is registered and the controller
    /// stays stopped.
    pub fn start(&mut self, mut renderer: R) -> SimulationResult<()> {
        if self.is_running() {
            debug!("start ignored: already running");
            renderer.dispose();
            return Ok(());
        }

        if let Err(e) = self.config.validate() {
            error!(error = %e, "simulation failed to start");
            renderer.dispose();
            return Err(e);
        }

        let session = SimulationSession::new(&self.config, renderer).inspect_err(|e| {
            error!(error = %e, "simulation failed to start");
        })?;

        debug!(
            bodies = session.physics().body_count(),
            colliders = session.physics().collider_count(),
            "physics world built"
        );

        self.session = Some(session);
        self.subscriptions = SUBSCRIBED_CHANNELS
            .iter()
            .map(|&channel| self.host.add_listener(channel))
            .collect();
        self.state = SimulationState::Running;
        self.last_tick = None;
        self.events.push(SimulationEvent::Started);
        self.host.request_frame();

        info!(spawn = %self.config.player.spawn, "simulation started");
        Ok(())
    }

    /// Tear down the session. Every cleanup step runs even when there is
    /// nothing to clean, so calling this twice (or before `start`) is fine.
    /// Movement key flags are left as they are.
    pub fn stop(&mut self) {
        let was_running = self.state == SimulationState::Running;
        self.state = SimulationState::Stopped;

        for id in self.subscriptions.drain(..) {
            if !self.host.remove_listener(id) {
                debug!(?id, "listener already removed");
            }
        }

        if let Some(frame) = self.host.pending_frame() {
            self.host.cancel_frame(frame);
        }

        self.capture.unlock();

        if let Some(session) = self.session.take() {
            debug!(ticks = session.ticks(), "disposing session");
            session.dispose();
        }

        if was_running {
            self.events.push(SimulationEvent::Stopped);
            info!("simulation stopped");
        }
    }

    /// Host frame callback. Runs one tick if a frame was requested and the
    /// controller is running; otherwise does nothing and schedules nothing.
    pub fn on_frame(&mut self) -> Option<TickReport> {
        let frame = self.host.take_pending_frame()?;

        if self.state != SimulationState::Running {
            warn!(?frame, "frame fired while stopped, ignored");
            return None;
        }
        let session = self.session.as_mut()?;

        let keys = self.keyboard.snapshot();
        let engaged = self.capture.is_locked();
        let report = session.tick(keys, engaged);
        if report.is_none() {
            warn!("player body missing, tick skipped");
        }

        if let Err(e) = session.render() {
            warn!(error = %e, "render failed, frame skipped");
        }

        self.host.request_frame();
        self.last_tick = report;
        report
    }

    /// Deliver a host event. Returns `true` if it changed anything; events
    /// on channels nobody is subscribed to are dropped.
    pub fn dispatch(&mut self, event: HostEvent) -> bool {
        if !self.host.is_listening(event.channel()) {
            return false;
        }

        match event {
            HostEvent::KeyDown(code) => self.keyboard.handle_key(code, true),
            HostEvent::KeyUp(code) => self.keyboard.handle_key(code, false),
            HostEvent::Resize { width, height } => match self.session.as_mut() {
                Some(session) => {
                    debug!(width, height, "viewport resized");
                    session.resize(width, height);
                    true
                }
                None => false,
            },
        }
    }

    /// Capture the pointer. Only meaningful while running.
    pub fn lock_pointer(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let transition = self.capture.lock();
        self.report_capture(transition)
    }

    /// Release the pointer; the loop keeps running, disengaged.
    pub fn unlock_pointer(&mut self) -> bool {
        let transition = self.capture.unlock();
        self.report_capture(transition)
    }

    pub fn focus_changed(&mut self, focused: bool) {
        if focused {
            self.capture.handle_focus_gained();
        } else {
            let transition = self.capture.handle_focus_lost();
            self.report_capture(transition);
        }
    }

    fn report_capture(&mut self, transition: Option<CaptureTransition>) -> bool {
        let event = match transition {
            Some(CaptureTransition::Locked) => SimulationEvent::Resumed,
            Some(CaptureTransition::Unlocked) => SimulationEvent::Paused,
            None => return false,
        };
        if self.is_running() {
            info!(?event, "engagement changed");
            self.events.push(event);
        }
        true
    }

    /// Turn the camera by a raw pointer delta. Ignored while disengaged.
    pub fn apply_look_delta(&mut self, dx: f32, dy: f32) {
        if !self.capture.is_locked() {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            session.look(dx, dy);
        }
    }

    /// Take all notifications raised since the last call.
    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SimulationState::Running
    }

    pub fn is_engaged(&self) -> bool {
        self.capture.is_locked()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replace the configuration used by the next `start`.
    pub fn set_config(&mut self, config: SimulationConfig) {
        self.config = config;
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    pub fn capture(&self) -> &PointerCapture {
        &self.capture
    }

    /// Mark capture state as applied to the window.
    pub fn clear_capture_dirty(&mut self) {
        self.capture.clear_dirty();
    }

    pub fn session(&self) -> Option<&SimulationSession<R>> {
        self.session.as_ref()
    }

    pub fn camera(&self) -> Option<&FpsCamera> {
        self.session.as_ref().map(|s| s.camera())
    }

    pub fn last_tick(&self) -> Option<TickReport> {
        self.last_tick
    }
}
