//! Simulation Module
//!
//! The real-time loop: a [`SimulationController`] drives one
//! [`SimulationSession`] per start/stop cycle, fed by a [`SimulationHost`].

pub mod controller;
pub mod events;
pub mod host;
pub mod session;

pub use controller::SimulationController;
pub use events::{SimulationEvent, SimulationState, TickReport};
pub use host::{
    FrameId, HeadlessHost, HostChannel, HostEvent, ListenerId, ListenerTable, SimulationHost,
};
pub use session::SimulationSession;
