use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Tracks keyboard and mouse state across window events.
pub struct Input {
    keys_down: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    mouse_position: Vec2,
    mouse_delta: Vec2,
    cursor_seen: bool,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_pressed: HashSet::new(),
            mouse_position: Vec2::ZERO,
            mouse_delta: Vec2::ZERO,
            cursor_seen: false,
        }
    }
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call at the end of each frame to reset per-frame state.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.mouse_delta = Vec2::ZERO;
    }

    /// Process a window event and update input state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => {
                            if !self.keys_down.contains(&key) {
                                self.keys_pressed.insert(key);
                            }
                            self.keys_down.insert(key);
                        }
                        ElementState::Released => {
                            self.keys_down.remove(&key);
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            _ => {}
        }
    }

    /// Track a new cursor position.
    ///
    /// The first observed position only establishes the reference point;
    /// deltas are produced from the second position onward. Otherwise the
    /// first event would report the cursor's absolute window coordinates as
    /// one huge movement and whip the camera around.
    fn cursor_moved(&mut self, position: Vec2) {
        if self.cursor_seen {
            self.mouse_delta += position - self.mouse_position;
        }
        self.cursor_seen = true;
        self.mouse_position = position;
    }

    /// Returns true if the key is currently held down.
    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns true if the key was pressed this frame.
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Current mouse position in window coordinates.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Mouse movement delta accumulated this frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }
}

#[cfg(test)]
impl Input {
    /// Simulate a key press for controller tests.
    pub(crate) fn press(&mut self, key: KeyCode) {
        if !self.keys_down.contains(&key) {
            self.keys_pressed.insert(key);
        }
        self.keys_down.insert(key);
    }

    /// Simulate mouse movement for controller tests, past the point where
    /// a cursor position has already been observed.
    pub(crate) fn move_mouse(&mut self, delta: Vec2) {
        self.cursor_seen = true;
        self.mouse_delta += delta;
        self.mouse_position += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressed_is_cleared_each_frame_but_down_persists() {
        let mut input = Input::new();
        input.press(KeyCode::KeyW);

        assert!(input.key_pressed(KeyCode::KeyW));
        assert!(input.key_down(KeyCode::KeyW));

        input.begin_frame();
        assert!(!input.key_pressed(KeyCode::KeyW));
        assert!(input.key_down(KeyCode::KeyW));
    }

    #[test]
    fn first_cursor_position_produces_no_delta() {
        let mut input = Input::new();

        // A window opening with the cursor near its center must not turn
        // the cursor's absolute position into a movement.
        input.cursor_moved(Vec2::new(500.0, 400.0));
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
        assert_eq!(input.mouse_position(), Vec2::new(500.0, 400.0));

        // From the second position on, deltas flow normally.
        input.cursor_moved(Vec2::new(503.0, 398.0));
        assert_eq!(input.mouse_delta(), Vec2::new(3.0, -2.0));
    }

    #[test]
    fn reference_point_survives_frame_reset() {
        let mut input = Input::new();
        input.cursor_moved(Vec2::new(100.0, 100.0));
        input.begin_frame();

        input.cursor_moved(Vec2::new(110.0, 100.0));
        assert_eq!(input.mouse_delta(), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn mouse_delta_accumulates_within_a_frame() {
        let mut input = Input::new();
        input.move_mouse(Vec2::new(3.0, -1.0));
        input.move_mouse(Vec2::new(2.0, 2.0));

        assert_eq!(input.mouse_delta(), Vec2::new(5.0, 1.0));

        input.begin_frame();
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
        assert_eq!(input.mouse_position(), Vec2::new(5.0, 1.0));
    }
}
