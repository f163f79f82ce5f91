//! Host Abstraction
//!
//! The host is whatever feeds the simulation events and frame callbacks:
//! a winit event loop in the demo binary, or [`HeadlessHost`] in tests and
//! headless runs. The controller registers listeners when it starts and
//! removes exactly those on stop; it requests one frame at a time.

use crate::input::KeyCode;

/// Event channels a controller can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostChannel {
    Resize,
    KeyDown,
    KeyUp,
}

/// An event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    Resize { width: u32, height: u32 },
}

impl HostEvent {
    pub fn channel(&self) -> HostChannel {
        match self {
            HostEvent::KeyDown(_) => HostChannel::KeyDown,
            HostEvent::KeyUp(_) => HostChannel::KeyUp,
            HostEvent::Resize { .. } => HostChannel::Resize,
        }
    }
}

/// Registration returned by [`SimulationHost::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(u64);

/// Event and frame source for a [`SimulationController`](super::SimulationController).
pub trait SimulationHost {
    /// Subscribe to a channel.
    fn add_listener(&mut self, channel: HostChannel) -> ListenerId;

    /// Unsubscribe. Returns `false` if the id was not registered.
    fn remove_listener(&mut self, id: ListenerId) -> bool;

    /// Whether any listener is registered for `channel`.
    fn is_listening(&self, channel: HostChannel) -> bool;

    /// Number of registered listeners across all channels.
    fn listener_count(&self) -> usize;

    /// Ask for a frame callback. At most one request is outstanding; asking
    /// again replaces it.
    fn request_frame(&mut self) -> FrameId;

    /// Cancel an outstanding request. Returns `false` if `id` is not the
    /// pending request.
    fn cancel_frame(&mut self, id: FrameId) -> bool;

    /// The outstanding request, if any.
    fn pending_frame(&self) -> Option<FrameId>;

    /// Consume the outstanding request as the frame callback fires.
    fn take_pending_frame(&mut self) -> Option<FrameId>;
}

/// Listener and frame bookkeeping shared by host implementations.
#[derive(Debug, Default)]
pub struct ListenerTable {
    next_listener: u64,
    listeners: Vec<(ListenerId, HostChannel)>,
    next_frame: u64,
    pending: Option<FrameId>,
}

impl ListenerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, channel: HostChannel) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listeners.push((id, channel));
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn is_listening(&self, channel: HostChannel) -> bool {
        self.listeners.iter().any(|(_, c)| *c == channel)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn request_frame(&mut self) -> FrameId {
        self.next_frame += 1;
        let id = FrameId(self.next_frame);
        self.pending = Some(id);
        id
    }

    pub fn cancel_frame(&mut self, id: FrameId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn pending_frame(&self) -> Option<FrameId> {
        self.pending
    }

    pub fn take_pending_frame(&mut self) -> Option<FrameId> {
        self.pending.take()
    }
}

/// Host with no window. Frames fire when the driver calls
/// [`SimulationController::on_frame`](super::SimulationController::on_frame).
#[derive(Debug, Default)]
pub struct HeadlessHost {
    table: ListenerTable,
    frames_requested: u64,
    frames_cancelled: u64,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_requested(&self) -> u64 {
        self.frames_requested
    }

    pub fn frames_cancelled(&self) -> u64 {
        self.frames_cancelled
    }
}

impl SimulationHost for HeadlessHost {
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
        self.frames_requested += 1;
        self.table.request_frame()
    }

    fn cancel_frame(&mut self, id: FrameId) -> bool {
        let cancelled = self.table.cancel_frame(id);
        if cancelled {
            self.frames_cancelled += 1;
        }
        cancelled
    }

    fn pending_frame(&self) -> Option<FrameId> {
        self.table.pending_frame()
    }

    fn take_pending_frame(&mut self) -> Option<FrameId> {
        self.table.take_pending_frame()
    }
}
