//! Core widget types and traits.

use crate::clock::{FrameStamp, FrameTimer};
use crate::input::InputState;
use crate::layout::Rect;
use crate::render::UIRenderer;

/// Unique identifier for a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Creates a new widget ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Widget state flags (bitfield).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetFlags(u32);

impl WidgetFlags {
    /// Widget is visible.
    pub const VISIBLE: u32 = 1 << 0;
    /// Widget is enabled (can receive input).
    pub const ENABLED: u32 = 1 << 1;
    /// Pointer is over the widget.
    pub const HOVERED: u32 = 1 << 2;
    /// Primary button is held on the widget.
    pub const PRESSED: u32 = 1 << 3;

    /// Default flags for a new widget.
    pub const DEFAULT: Self = Self(Self::VISIBLE | Self::ENABLED);

    /// Creates new flags with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Returns true if the flag is set.
    #[inline]
    #[must_use]
    pub const fn has(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    /// Sets a flag.
    #[inline]
    pub fn set(&mut self, flag: u32) {
        self.0 |= flag;
    }

    /// Clears a flag.
    #[inline]
    pub fn clear(&mut self, flag: u32) {
        self.0 &= !flag;
    }

    /// Sets or clears a flag.
    #[inline]
    pub fn assign(&mut self, flag: u32, on: bool) {
        if on {
            self.set(flag);
        } else {
            self.clear(flag);
        }
    }
}

impl Default for WidgetFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Common widget state.
#[derive(Debug, Clone)]
pub struct WidgetState {
    /// Widget identifier.
    pub id: WidgetId,
    /// Bounding rectangle in screen space.
    pub rect: Rect,
    /// State flags.
    pub flags: WidgetFlags,
    /// Base z-index for layering.
    pub z_index: i32,
}

impl WidgetState {
    /// Creates a new widget state.
    #[must_use]
    pub fn new(id: WidgetId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            flags: WidgetFlags::DEFAULT,
            z_index: 0,
        }
    }

    /// Returns true if the widget is visible.
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.flags.has(WidgetFlags::VISIBLE)
    }

    /// Returns true if the widget takes input.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.flags.has(WidgetFlags::ENABLED)
    }

    /// Returns true if the widget is hovered.
    #[inline]
    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.flags.has(WidgetFlags::HOVERED)
    }

    /// Returns true if the widget is pressed.
    #[inline]
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.flags.has(WidgetFlags::PRESSED)
    }

    /// Records whether the pointer is inside and reports the transition.
    pub fn track_hover(&mut self, inside: bool, response: &mut WidgetResponse) {
        let was = self.is_hovered();
        self.flags.assign(WidgetFlags::HOVERED, inside);
        response.hovered = inside && !was;
        response.unhovered = !inside && was;
    }
}

/// Timing handed to widgets each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// The host frame being processed.
    pub frame: FrameStamp,
    /// Seconds since the previous frame. [`FrameContext::from_timer`] clamps it.
    pub dt: f32,
}

impl FrameContext {
    /// Creates a frame context.
    #[must_use]
    pub const fn new(frame: FrameStamp, dt: f32) -> Self {
        Self { frame, dt }
    }

    /// Builds the context for `frame`, or `None` if the timer already saw it.
    pub fn from_timer(timer: &mut FrameTimer, frame: FrameStamp) -> Option<Self> {
        timer.delta(frame).map(|dt| Self::new(frame, dt))
    }
}

/// Response from widget update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetResponse {
    /// Widget was clicked.
    pub clicked: bool,
    /// Pointer just entered.
    pub hovered: bool,
    /// Pointer just left.
    pub unhovered: bool,
    /// Widget state visible to the host changed (selection, reveal, ...).
    pub changed: bool,
}

/// Base trait for all widgets.
pub trait Widget {
    /// Returns the widget's state.
    fn state(&self) -> &WidgetState;

    /// Returns mutable access to the widget's state.
    fn state_mut(&mut self) -> &mut WidgetState;

    /// Handles input and advances animations.
    ///
    /// Called every frame, even without input events.
    fn update(&mut self, input: &InputState, ctx: FrameContext) -> WidgetResponse;

    /// Pushes render commands for this widget.
    fn render(&self, renderer: &mut UIRenderer);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let mut flags = WidgetFlags::new();
        assert!(flags.has(WidgetFlags::VISIBLE));
        assert!(!flags.has(WidgetFlags::HOVERED));

        flags.assign(WidgetFlags::HOVERED, true);
        assert!(flags.has(WidgetFlags::HOVERED));
        flags.clear(WidgetFlags::VISIBLE);
        assert!(!flags.has(WidgetFlags::VISIBLE));
    }

    #[test]
    fn test_hover_transitions() {
        let mut state = WidgetState::new(WidgetId::new(1), Rect::new(0.0, 0.0, 10.0, 10.0));

        let mut response = WidgetResponse::default();
        state.track_hover(true, &mut response);
        assert!(response.hovered && !response.unhovered);

        let mut response = WidgetResponse::default();
        state.track_hover(true, &mut response);
        assert!(!response.hovered && !response.unhovered);

        let mut response = WidgetResponse::default();
        state.track_hover(false, &mut response);
        assert!(response.unhovered);
        assert!(!state.is_hovered());
    }

    #[test]
    fn test_frame_context_skips_repeats() {
        let mut timer = FrameTimer::new();
        let first = FrameStamp::new(0, 0.0);
        assert!(FrameContext::from_timer(&mut timer, first).is_some());
        assert!(FrameContext::from_timer(&mut timer, first).is_none());

        let ctx = FrameContext::from_timer(&mut timer, FrameStamp::new(1, 0.016)).unwrap();
        assert!((ctx.dt - 0.016).abs() < 1e-6);
    }
}
