//! Pointer Capture Module
//!
//! Tracks whether the player's view is captured (cursor locked and hidden)
//! and reports lock/unlock transitions. The simulation treats "locked" as
//! engaged: movement input is applied only while the pointer is captured.
//!
//! # Usage
//!
//! ```rust,ignore
//! use dust_arena_engine::input::{PointerCapture, CaptureTransition};
//!
//! let mut capture = PointerCapture::new();
//!
//! // Click on the view: capture
//! if capture.lock() == Some(CaptureTransition::Locked) {
//!     // resume
//! }
//!
//! // Apply state to the window when dirty
//! if capture.is_dirty() {
//!     window.set_cursor_visible(!capture.should_grab());
//!     capture.clear_dirty();
//! }
//! ```

/// A change in capture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureTransition {
    /// Pointer captured; view input engaged
    Locked,
    /// Pointer released; view input disengaged
    Unlocked,
}

/// Pointer capture state for first-person view control.
#[derive(Debug, Clone)]
pub struct PointerCapture {
    /// Whether the pointer is captured
    locked: bool,
    /// Whether the window currently has focus
    has_focus: bool,
    /// Tracks if state changed and needs to be applied to the window
    state_dirty: bool,
}

impl Default for PointerCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerCapture {
    /// Create a released capture. Sessions start unlocked and wait for the
    /// player to click into the view.
    pub fn new() -> Self {
        Self {
            locked: false,
            has_focus: true,
            state_dirty: true,
        }
    }

    /// Whether the pointer is captured.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Check if the window has focus.
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Check if cursor state needs to be applied to the window.
    pub fn is_dirty(&self) -> bool {
        self.state_dirty
    }

    /// Clear the dirty flag after applying state.
    pub fn clear_dirty(&mut self) {
        self.state_dirty = false;
    }

    /// Capture the pointer. Returns the transition, or `None` if it was
    /// already captured or the window is unfocused.
    pub fn lock(&mut self) -> Option<CaptureTransition> {
        if self.locked || !self.has_focus {
            return None;
        }
        self.locked = true;
        self.state_dirty = true;
        Some(CaptureTransition::Locked)
    }

    /// Release the pointer. Returns the transition, or `None` if it was
    /// not captured.
    pub fn unlock(&mut self) -> Option<CaptureTransition> {
        if !self.locked {
            return None;
        }
        self.locked = false;
        self.state_dirty = true;
        Some(CaptureTransition::Unlocked)
    }

    /// Window focus lost: the pointer must be given back to the system.
    pub fn handle_focus_lost(&mut self) -> Option<CaptureTransition> {
        self.has_focus = false;
        self.unlock()
    }

    /// Window focus regained. Capture is not restored automatically; the
    /// player clicks back in.
    pub fn handle_focus_gained(&mut self) {
        self.has_focus = true;
        self.state_dirty = true;
    }

    /// Whether the window should grab and hide the cursor right now.
    pub fn should_grab(&self) -> bool {
        self.locked && self.has_focus
    }

    /// Get a human-readable status message for the current capture state.
    pub fn status_message(&self) -> &'static str {
        if self.locked {
            "View captured. ESC to release cursor."
        } else {
            "Paused. Click to resume, ESC again for menu."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_released() {
        let capture = PointerCapture::new();
        assert!(!capture.is_locked());
        assert!(capture.has_focus());
        assert!(capture.is_dirty());
    }

    #[test]
    fn test_lock_unlock_transitions() {
        let mut capture = PointerCapture::new();
        capture.clear_dirty();

        assert_eq!(capture.lock(), Some(CaptureTransition::Locked));
        assert!(capture.is_locked());
        assert!(capture.is_dirty());

        // Locking again does nothing
        capture.clear_dirty();
        assert_eq!(capture.lock(), None);
        assert!(!capture.is_dirty());

        assert_eq!(capture.unlock(), Some(CaptureTransition::Unlocked));
        assert!(!capture.is_locked());
        assert_eq!(capture.unlock(), None);
    }

    #[test]
    fn test_focus_loss_releases() {
        let mut capture = PointerCapture::new();
        capture.lock();

        assert_eq!(capture.handle_focus_lost(), Some(CaptureTransition::Unlocked));
        assert!(!capture.is_locked());

        // Cannot capture while unfocused
        assert_eq!(capture.lock(), None);

        capture.handle_focus_gained();
        assert_eq!(capture.lock(), Some(CaptureTransition::Locked));
    }

    #[test]
    fn test_should_grab() {
        let mut capture = PointerCapture::new();
        assert!(!capture.should_grab());
        capture.lock();
        assert!(capture.should_grab());
    }

    #[test]
    fn test_status_message() {
        let mut capture = PointerCapture::new();
        assert!(capture.status_message().contains("Click"));
        capture.lock();
        assert!(capture.status_message().contains("ESC"));
    }
}
