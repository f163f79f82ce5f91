//! Error Types
//!
//! Failures that can surface from starting a simulation session or from
//! the rendering backend. Everything that can go wrong mid-frame is
//! handled by skipping the frame, so only initialization paths return these.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading configuration or starting a session.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A configuration value would make the world unconstructible.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The physics world or one of its bodies could not be created.
    #[error("physics initialization failed: {0}")]
    Physics(String),

    /// The rendering backend failed to come up.
    #[error("renderer initialization failed: {0}")]
    Renderer(#[from] RenderError),

    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file was not valid JSON for [`crate::config::SimulationConfig`].
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Errors raised by a rendering backend.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(String),

    #[error("no compatible GPU adapter: {0}")]
    Adapter(String),

    #[error("failed to create GPU device: {0}")]
    Device(String),

    /// The surface was lost or outdated and has been reconfigured; the
    /// frame was dropped.
    #[error("surface lost, frame skipped")]
    SurfaceLost,

    #[error("surface error: {0}")]
    Frame(String),

    /// `render` was called after `dispose`.
    #[error("renderer already disposed")]
    Disposed,
}

pub type SimulationResult<T> = Result<T, SimulationError>;
