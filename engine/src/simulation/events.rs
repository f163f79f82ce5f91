//! Notifications and state reported by the loop controller.

use glam::Vec3;

/// Lifecycle state of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationState {
    #[default]
    Stopped,
    Running,
}

/// Notifications for UI consumers, drained with
/// [`SimulationController::drain_events`](super::SimulationController::drain_events).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationEvent {
    Started,
    Stopped,
    /// View capture released while running; movement is ignored
    Paused,
    /// View captured; movement applies again
    Resumed,
}

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// 1-based tick number within the session
    pub tick: u64,
    /// Velocity written into the body before the step
    pub commanded_velocity: Vec3,
    /// Body center after the step
    pub body_position: Vec3,
    /// Camera position after synchronization
    pub camera_position: Vec3,
}
