//! Keyboard Input Module
//!
//! Tracks the four directional movement keys. Decoupled from winit: the
//! windowing layer translates its key codes into [`KeyCode`].

/// Generic key codes, independent of windowing system.
///
/// Only keys the demo reacts to are named; everything else is `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Letter scheme
    W,
    A,
    S,
    D,

    // Arrow scheme
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Menu / capture keys
    Escape,
    Enter,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Which movement flag a key drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

impl KeyCode {
    /// Movement direction for this key, if it is one of the two aliases
    /// (arrow key or W/A/S/D) for a direction.
    pub fn movement_direction(self) -> Option<MoveDirection> {
        match self {
            KeyCode::W | KeyCode::ArrowUp => Some(MoveDirection::Forward),
            KeyCode::S | KeyCode::ArrowDown => Some(MoveDirection::Backward),
            KeyCode::A | KeyCode::ArrowLeft => Some(MoveDirection::Left),
            KeyCode::D | KeyCode::ArrowRight => Some(MoveDirection::Right),
            _ => None,
        }
    }
}

/// Current state of the movement keys.
///
/// Flags are independent; diagonals and opposing pairs are both valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    /// W / ArrowUp
    pub forward: bool,
    /// S / ArrowDown
    pub backward: bool,
    /// A / ArrowLeft
    pub left: bool,
    /// D / ArrowRight
    pub right: bool,
}

impl MovementKeys {
    /// Create a new movement keys state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update movement state based on key press/release.
    ///
    /// Returns `true` if the key was a movement key and was handled,
    /// `false` otherwise (the state is left untouched).
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        match key.movement_direction() {
            Some(MoveDirection::Forward) => self.forward = pressed,
            Some(MoveDirection::Backward) => self.backward = pressed,
            Some(MoveDirection::Left) => self.left = pressed,
            Some(MoveDirection::Right) => self.right = pressed,
            None => return false,
        }
        true
    }

    /// Check if any movement key is currently pressed.
    pub fn any_pressed(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Get the forward/backward movement direction (-1, 0, or 1).
    pub fn forward_axis(&self) -> i32 {
        (self.forward as i32) - (self.backward as i32)
    }

    /// Get the left/right movement direction (-1, 0, or 1).
    pub fn right_axis(&self) -> i32 {
        (self.right as i32) - (self.left as i32)
    }
}

/// The input state tracker the simulation reads each tick.
///
/// Key events can arrive at any point between ticks; a tick reads one
/// consistent copy through [`snapshot`](Self::snapshot).
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    movement: MovementKeys,
}

impl KeyboardState {
    /// Create a new keyboard state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press or release event.
    ///
    /// Returns `true` if the key was handled as a movement key.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        self.movement.handle_key(key, pressed)
    }

    /// Copy of the current movement flags.
    #[inline]
    pub fn snapshot(&self) -> MovementKeys {
        self.movement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys_default() {
        let keys = MovementKeys::new();
        assert!(!keys.any_pressed());
        assert_eq!(keys.forward_axis(), 0);
        assert_eq!(keys.right_axis(), 0);
    }

    #[test]
    fn test_movement_keys_forward() {
        let mut keys = MovementKeys::new();
        assert!(keys.handle_key(KeyCode::W, true));
        assert!(keys.forward);
        assert!(keys.any_pressed());
        assert_eq!(keys.forward_axis(), 1);
    }

    #[test]
    fn test_arrow_aliases() {
        let mut keys = MovementKeys::new();
        assert!(keys.handle_key(KeyCode::ArrowUp, true));
        assert!(keys.handle_key(KeyCode::ArrowDown, true));
        assert!(keys.handle_key(KeyCode::ArrowLeft, true));
        assert!(keys.handle_key(KeyCode::ArrowRight, true));
        assert!(keys.forward && keys.backward && keys.left && keys.right);
    }

    #[test]
    fn test_alias_release_clears_flag() {
        let mut keys = MovementKeys::new();
        keys.handle_key(KeyCode::W, true);
        keys.handle_key(KeyCode::ArrowUp, false);
        assert!(!keys.forward);
    }

    #[test]
    fn test_movement_axes() {
        let mut keys = MovementKeys::new();
        keys.handle_key(KeyCode::W, true);
        keys.handle_key(KeyCode::S, true);
        // Both pressed cancels out
        assert_eq!(keys.forward_axis(), 0);

        keys.handle_key(KeyCode::D, true);
        assert_eq!(keys.right_axis(), 1);
        keys.handle_key(KeyCode::A, true);
        assert_eq!(keys.right_axis(), 0);
    }

    #[test]
    fn test_non_movement_key() {
        let mut keys = MovementKeys::new();
        assert!(!keys.handle_key(KeyCode::Escape, true));
        assert!(!keys.handle_key(KeyCode::Enter, true));
        assert!(!keys.handle_key(KeyCode::Unknown, true));
        assert!(!keys.any_pressed());
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut keyboard = KeyboardState::new();
        keyboard.handle_key(KeyCode::D, true);
        let snap = keyboard.snapshot();
        keyboard.handle_key(KeyCode::D, false);
        assert!(snap.right);
        assert!(!keyboard.snapshot().right);
    }
}
