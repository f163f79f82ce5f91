//! Rendering backend with no GPU, for tests and `--headless` runs.
//!
//! Every call is recorded into a shared [`FrameLog`] so the caller can
//! inspect what happened even after the controller dropped the renderer.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

use super::RenderBackend;
use crate::camera::FpsCamera;
use crate::error::RenderError;
use crate::world::LevelLayout;

/// What a [`HeadlessRenderer`] has been asked to do.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameLog {
    /// Frames rendered successfully
    pub frames: u64,
    /// Frames that returned an error
    pub failed_frames: u64,
    pub last_camera_position: Option<Vec3>,
    pub last_camera_yaw: Option<f32>,
    pub size: (u32, u32),
    pub resizes: u32,
    pub disposed: bool,
}

/// Shared view of a headless renderer's [`FrameLog`].
#[derive(Debug, Clone)]
pub struct FrameLogHandle(Rc<RefCell<FrameLog>>);

impl FrameLogHandle {
    pub fn snapshot(&self) -> FrameLog {
        self.0.borrow().clone()
    }
}

#[derive(Debug)]
pub struct HeadlessRenderer {
    log: Rc<RefCell<FrameLog>>,
    fail_next: u32,
}

impl HeadlessRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        let log = FrameLog {
            size: (width, height),
            ..Default::default()
        };
        Self {
            log: Rc::new(RefCell::new(log)),
            fail_next: 0,
        }
    }

    pub fn log(&self) -> FrameLogHandle {
        FrameLogHandle(Rc::clone(&self.log))
    }

    /// Make the next `count` render calls fail with a frame error.
    pub fn fail_next_frames(&mut self, count: u32) {
        self.fail_next = count;
    }
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

impl RenderBackend for HeadlessRenderer {
    fn render(&mut self, _level: &LevelLayout, camera: &FpsCamera) -> Result<(), RenderError> {
        let mut log = self.log.borrow_mut();
        if log.disposed {
            return Err(RenderError::Disposed);
        }
        if self.fail_next > 0 {
            self.fail_next -= 1;
            log.failed_frames += 1;
            return Err(RenderError::Frame("injected failure".into()));
        }
        log.frames += 1;
        log.last_camera_position = Some(camera.position);
        log.last_camera_yaw = Some(camera.yaw);
        Ok(())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        let mut log = self.log.borrow_mut();
        log.size = (width, height);
        log.resizes += 1;
    }

    fn dispose(&mut self) {
        self.log.borrow_mut().disposed = true;
    }

    fn size(&self) -> (u32, u32) {
        self.log.borrow().size
    }
}
