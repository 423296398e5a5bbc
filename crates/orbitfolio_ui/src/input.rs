//! Pointer and keyboard input for the interaction layer.
//!
//! The host translates its native events (DOM, winit, tests) into calls on
//! [`InputState`]; widgets read it once per frame.

use crate::layout::Rect;

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button (scroll wheel click).
    Middle,
}

/// Keyboard keys the widgets react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key. Dismisses the active timeline item.
    Escape,
    /// Enter/Return key.
    Enter,
    /// Space bar.
    Space,
    /// Tab key.
    Tab,
}

/// Input state for the current frame.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Current pointer X position.
    pub mouse_x: f32,
    /// Current pointer Y position.
    pub mouse_y: f32,
    /// Viewport size used for normalized coordinates.
    viewport: (f32, f32),
    /// Mouse buttons pressed this frame.
    buttons_pressed: u8,
    /// Mouse buttons currently held.
    buttons_down: u8,
    /// Keys pressed this frame.
    keys_pressed: Vec<Key>,
    /// The pointer is a finger, not a mouse.
    coarse_pointer: bool,
    /// The element under the pointer is interactive (link, button, field).
    hover_target: bool,
    /// Text shown inside the cursor ring for the hovered element.
    hover_label: Option<String>,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            mouse_x: 0.0,
            mouse_y: 0.0,
            viewport: (1920.0, 1080.0),
            buttons_pressed: 0,
            buttons_down: 0,
            keys_pressed: Vec::new(),
            coarse_pointer: false,
            hover_target: false,
            hover_label: None,
        }
    }
}

impl InputState {
    /// Creates a new empty input state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a new frame, clearing per-frame state.
    pub fn begin_frame(&mut self) {
        self.buttons_pressed = 0;
        self.keys_pressed.clear();
    }

    /// Updates viewport size.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
    }

    /// Returns the viewport size.
    #[must_use]
    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    /// Updates pointer position.
    pub fn set_mouse_pos(&mut self, x: f32, y: f32) {
        self.mouse_x = x;
        self.mouse_y = y;
    }

    /// Records a mouse button press.
    pub fn mouse_button_down(&mut self, button: MouseButton) {
        let mask = Self::button_mask(button);
        self.buttons_pressed |= mask;
        self.buttons_down |= mask;
    }

    /// Records a mouse button release.
    pub fn mouse_button_up(&mut self, button: MouseButton) {
        let mask = Self::button_mask(button);
        self.buttons_down &= !mask;
    }

    /// Records a key press.
    pub fn key_down(&mut self, key: Key) {
        if !self.keys_pressed.contains(&key) {
            self.keys_pressed.push(key);
        }
    }

    /// Marks the pointer as coarse (touch). Cursor effects switch off.
    pub fn set_coarse_pointer(&mut self, coarse: bool) {
        self.coarse_pointer = coarse;
    }

    /// Returns true for touch pointers.
    #[must_use]
    pub fn is_coarse_pointer(&self) -> bool {
        self.coarse_pointer
    }

    /// Records whether the pointer is over an interactive element, and its
    /// cursor label if it has one.
    pub fn set_hover_target(&mut self, interactive: bool, label: Option<&str>) {
        self.hover_target = interactive;
        self.hover_label = if interactive { label.map(str::to_owned) } else { None };
    }

    /// Returns true if the pointer is over an interactive element.
    #[must_use]
    pub fn is_over_interactive(&self) -> bool {
        self.hover_target
    }

    /// Returns the cursor label of the hovered element.
    #[must_use]
    pub fn hover_label(&self) -> Option<&str> {
        self.hover_label.as_deref()
    }

    /// Returns true if the mouse button was clicked this frame.
    #[must_use]
    pub fn mouse_clicked(&self, button: MouseButton) -> bool {
        (self.buttons_pressed & Self::button_mask(button)) != 0
    }

    /// Returns true if the mouse button is currently held.
    #[must_use]
    pub fn mouse_down(&self, button: MouseButton) -> bool {
        (self.buttons_down & Self::button_mask(button)) != 0
    }

    /// Returns true if the key was pressed this frame.
    #[must_use]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Pointer in normalized device coordinates: x in [-1, 1] left to right,
    /// y in [-1, 1] bottom to top.
    #[must_use]
    pub fn normalized(&self) -> (f32, f32) {
        let (width, height) = self.viewport;
        if width <= 0.0 || height <= 0.0 {
            return (0.0, 0.0);
        }
        (
            (self.mouse_x / width) * 2.0 - 1.0,
            -(self.mouse_y / height) * 2.0 + 1.0,
        )
    }

    /// Pointer position relative to `rect`, each axis clamped to [0, 1].
    /// An empty rect reports its center.
    #[must_use]
    pub fn relative_to(&self, rect: &Rect) -> (f32, f32) {
        if rect.is_empty() {
            return (0.5, 0.5);
        }
        (
            ((self.mouse_x - rect.x) / rect.width).clamp(0.0, 1.0),
            ((self.mouse_y - rect.y) / rect.height).clamp(0.0, 1.0),
        )
    }

    /// Returns the bit mask for a button.
    const fn button_mask(button: MouseButton) -> u8 {
        match button {
            MouseButton::Left => 1,
            MouseButton::Right => 2,
            MouseButton::Middle => 4,
        }
    }
}

/// Drops pointer-move events that arrive faster than a frame.
#[derive(Debug, Clone, Copy)]
pub struct MoveThrottle {
    interval: f64,
    last: Option<f64>,
}

impl MoveThrottle {
    /// One 60 fps frame, in seconds.
    pub const FRAME_INTERVAL: f64 = 0.016;

    /// Creates a throttle admitting at most one event per `interval` seconds.
    #[must_use]
    pub const fn new(interval: f64) -> Self {
        Self { interval, last: None }
    }

    /// Returns true if an event at `time` (seconds) should be processed.
    pub fn accept(&mut self, time: f64) -> bool {
        match self.last {
            Some(last) if time - last < self.interval => false,
            _ => {
                self.last = Some(time);
                true
            }
        }
    }
}

impl Default for MoveThrottle {
    fn default() -> Self {
        Self::new(Self::FRAME_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_click() {
        let mut input = InputState::new();

        input.mouse_button_down(MouseButton::Left);
        assert!(input.mouse_clicked(MouseButton::Left));
        assert!(input.mouse_down(MouseButton::Left));

        input.begin_frame();
        assert!(!input.mouse_clicked(MouseButton::Left));
        assert!(input.mouse_down(MouseButton::Left));

        input.mouse_button_up(MouseButton::Left);
        assert!(!input.mouse_down(MouseButton::Left));
    }

    #[test]
    fn test_normalized_coordinates() {
        let mut input = InputState::new();
        input.set_viewport(800.0, 600.0);

        input.set_mouse_pos(0.0, 0.0);
        assert_eq!(input.normalized(), (-1.0, 1.0));

        input.set_mouse_pos(400.0, 300.0);
        assert_eq!(input.normalized(), (0.0, 0.0));

        input.set_mouse_pos(800.0, 600.0);
        assert_eq!(input.normalized(), (1.0, -1.0));
    }

    #[test]
    fn test_relative_position_is_clamped() {
        let mut input = InputState::new();
        let rect = Rect::new(100.0, 100.0, 200.0, 100.0);

        input.set_mouse_pos(150.0, 125.0);
        assert_eq!(input.relative_to(&rect), (0.25, 0.25));

        input.set_mouse_pos(0.0, 1000.0);
        assert_eq!(input.relative_to(&rect), (0.0, 1.0));

        assert_eq!(input.relative_to(&Rect::ZERO), (0.5, 0.5));
    }

    #[test]
    fn test_throttle_drops_fast_events() {
        let mut throttle = MoveThrottle::default();
        assert!(throttle.accept(0.0));
        assert!(!throttle.accept(0.010));
        assert!(throttle.accept(0.020));
    }

    #[test]
    fn test_keys_clear_each_frame() {
        let mut input = InputState::new();
        input.key_down(Key::Escape);
        assert!(input.key_pressed(Key::Escape));
        input.begin_frame();
        assert!(!input.key_pressed(Key::Escape));
    }

    #[test]
    fn test_hover_label_only_on_interactive() {
        let mut input = InputState::new();
        input.set_hover_target(true, Some("view"));
        assert_eq!(input.hover_label(), Some("view"));
        input.set_hover_target(false, Some("view"));
        assert_eq!(input.hover_label(), None);
    }
}
