//! Custom cursor: a dot pinned to the pointer, a spring-smoothed ring and a
//! fading trail.
//!
//! ```text
//!   pointer ──► dot (exact)
//!          ├──► ring (spring, k=400 c=25 m=1)
//!          └──► trail[i] (tween, delay (i+1)·0.05 s)
//! ```
//!
//! Touch devices get no custom cursor at all.

use crate::animation::{Animation2D, Easing, Spring2D, SpringParams};
use crate::config::CursorConfig;
use crate::input::{InputState, MouseButton};
use crate::layout::Rect;
use crate::render::{RenderCommand, UIRenderer};
use crate::style::Color;
use crate::widget::core::{FrameContext, Widget, WidgetId, WidgetResponse, WidgetState};

/// Where the cursor starts before the first pointer event (off-screen).
pub const OFFSCREEN: (f32, f32) = (-100.0, -100.0);
/// Dot diameter.
pub const DOT_SIZE: f32 = 8.0;
/// Ring scale while the button is held.
pub const RING_PRESS_SCALE: f32 = 0.9;
/// Dot scale while the button is held.
pub const DOT_PRESS_SCALE: f32 = 0.5;
/// Diameter of the first trail segment.
const TRAIL_SIZE: f32 = 6.0;
/// Cursor layer sits above all page content.
const CURSOR_Z: i32 = 9999;

/// One delayed follower in the trail.
#[derive(Debug, Clone)]
pub struct TrailSegment {
    position: Animation2D,
    /// Opacity, fading along the trail.
    pub opacity: f32,
    /// Scale, shrinking along the trail.
    pub scale: f32,
}

impl TrailSegment {
    fn new(index: usize, config: &CursorConfig) -> Self {
        let i = index as f32;
        Self {
            position: Animation2D::new(OFFSCREEN.0, OFFSCREEN.1, Easing::Power2Out)
                .with_timing(config.trail_duration, (i + 1.0) * config.trail_delay),
            opacity: 1.0 - i * 0.15,
            scale: 1.0 - i * 0.1,
        }
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        self.position.value()
    }
}

/// The custom cursor overlay.
#[derive(Debug, Clone)]
pub struct CustomCursor {
    state: WidgetState,
    config: CursorConfig,
    enabled: bool,
    dot: (f32, f32),
    ring: Spring2D,
    trail: Vec<TrailSegment>,
    hovering: bool,
    pressed: bool,
    label: Option<String>,
}

impl CustomCursor {
    /// Creates an off-screen cursor.
    #[must_use]
    pub fn new(id: WidgetId, config: CursorConfig) -> Self {
        let params = SpringParams {
            stiffness: config.stiffness,
            damping: config.damping,
            mass: config.mass,
        };
        Self {
            state: WidgetState::new(
                id,
                Rect::from_center(OFFSCREEN, config.ring_size, config.ring_size),
            ),
            enabled: true,
            dot: OFFSCREEN,
            ring: Spring2D::new(OFFSCREEN.0, OFFSCREEN.1, params),
            trail: (0..config.trail_length).map(|i| TrailSegment::new(i, &config)).collect(),
            hovering: false,
            pressed: false,
            label: None,
            config,
        }
    }

    /// False on touch devices.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Dot center.
    #[must_use]
    pub fn dot(&self) -> (f32, f32) {
        self.dot
    }

    /// Ring center.
    #[must_use]
    pub fn ring(&self) -> (f32, f32) {
        self.ring.value()
    }

    /// Trail segments, nearest first.
    #[must_use]
    pub fn trail(&self) -> &[TrailSegment] {
        &self.trail
    }

    /// Ring diameter, larger over interactive elements.
    #[must_use]
    pub fn ring_diameter(&self) -> f32 {
        if self.hovering {
            self.config.ring_hover_size
        } else {
            self.config.ring_size
        }
    }

    /// Ring scale, shrunk while pressed.
    #[must_use]
    pub fn ring_scale(&self) -> f32 {
        if self.pressed {
            RING_PRESS_SCALE
        } else {
            1.0
        }
    }

    /// Dot scale, shrunk while pressed.
    #[must_use]
    pub fn dot_scale(&self) -> f32 {
        if self.pressed {
            DOT_PRESS_SCALE
        } else {
            1.0
        }
    }

    /// The dot hides while the ring shows a hover state.
    #[must_use]
    pub fn dot_visible(&self) -> bool {
        self.enabled && !self.hovering
    }

    /// Text shown inside the ring.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Widget for CustomCursor {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn update(&mut self, input: &InputState, ctx: FrameContext) -> WidgetResponse {
        let mut response = WidgetResponse::default();
        self.enabled = self.state.is_enabled() && !input.is_coarse_pointer();
        if !self.enabled {
            return response;
        }

        let pointer = (input.mouse_x, input.mouse_y);
        self.dot = pointer;
        self.ring.set_target(pointer.0, pointer.1);
        self.ring.update(ctx.dt);
        for segment in &mut self.trail {
            segment.position.set_target(pointer.0, pointer.1);
            segment.position.update(ctx.dt);
        }

        let hovering = input.is_over_interactive();
        response.hovered = hovering && !self.hovering;
        response.unhovered = !hovering && self.hovering;
        self.hovering = hovering;
        self.pressed = input.mouse_down(MouseButton::Left);
        self.label = input.hover_label().map(str::to_owned);

        let diameter = self.ring_diameter() * self.ring_scale();
        self.state.rect = Rect::from_center(self.ring(), diameter, diameter);
        response
    }

    fn render(&self, renderer: &mut UIRenderer) {
        if !self.enabled || !self.state.is_visible() {
            return;
        }

        for segment in self.trail.iter().rev() {
            renderer.push(
                CURSOR_Z,
                RenderCommand::Circle {
                    center: segment.position(),
                    radius: TRAIL_SIZE * 0.5 * segment.scale,
                    fill: Color::CYAN.with_alpha(segment.opacity * 0.5),
                    stroke: Color::TRANSPARENT,
                    stroke_width: 0.0,
                },
            );
        }

        let ring_fill = if self.hovering {
            Color::WHITE.with_alpha(0.1)
        } else {
            Color::TRANSPARENT
        };
        renderer.push(
            CURSOR_Z + 1,
            RenderCommand::Circle {
                center: self.ring(),
                radius: self.ring_diameter() * 0.5 * self.ring_scale(),
                fill: ring_fill,
                stroke: Color::WHITE.with_alpha(0.5),
                stroke_width: 1.0,
            },
        );

        if let Some(label) = &self.label {
            let (x, y) = self.ring();
            renderer.push(
                CURSOR_Z + 1,
                RenderCommand::Text {
                    text: label.clone(),
                    x,
                    y,
                    color: Color::WHITE,
                    font_size: 10.0,
                    centered: true,
                },
            );
        }

        if self.dot_visible() {
            renderer.push(
                CURSOR_Z + 2,
                RenderCommand::Circle {
                    center: self.dot,
                    radius: DOT_SIZE * 0.5 * self.dot_scale(),
                    fill: Color::WHITE,
                    stroke: Color::TRANSPARENT,
                    stroke_width: 0.0,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FrameStamp;

    fn run(cursor: &mut CustomCursor, input: &InputState, frames: u64, dt: f32) {
        for i in 0..frames {
            let stamp = FrameStamp::new(i, i as f64 * f64::from(dt));
            cursor.update(input, FrameContext::new(stamp, dt));
        }
    }

    #[test]
    fn test_starts_offscreen() {
        let cursor = CustomCursor::new(WidgetId::new(1), CursorConfig::default());
        assert_eq!(cursor.dot(), OFFSCREEN);
        assert_eq!(cursor.ring(), OFFSCREEN);
        assert_eq!(cursor.trail().len(), 5);
    }

    #[test]
    fn test_ring_converges_dot_is_exact() {
        let mut cursor = CustomCursor::new(WidgetId::new(1), CursorConfig::default());
        let mut input = InputState::new();
        input.set_mouse_pos(400.0, 300.0);

        run(&mut cursor, &input, 1, 1.0 / 60.0);
        assert_eq!(cursor.dot(), (400.0, 300.0));
        assert!(cursor.ring().0 < 400.0);

        run(&mut cursor, &input, 120, 1.0 / 60.0);
        let (rx, ry) = cursor.ring();
        assert!((rx - 400.0).abs() < 0.5 && (ry - 300.0).abs() < 0.5);
    }

    #[test]
    fn test_trail_waits_for_delay() {
        let mut cursor = CustomCursor::new(WidgetId::new(1), CursorConfig::default());
        let mut input = InputState::new();
        input.set_mouse_pos(400.0, 300.0);

        // 0.04 s: no segment has passed its delay yet
        run(&mut cursor, &input, 4, 0.01);
        for segment in cursor.trail() {
            assert_eq!(segment.position(), OFFSCREEN);
        }

        // 0.12 s: the first two segments are moving, the last is still waiting
        run(&mut cursor, &input, 8, 0.01);
        assert_ne!(cursor.trail()[0].position(), OFFSCREEN);
        assert_eq!(cursor.trail()[4].position(), OFFSCREEN);

        run(&mut cursor, &input, 100, 0.01);
        for segment in cursor.trail() {
            assert_eq!(segment.position(), (400.0, 300.0));
        }
    }

    #[test]
    fn test_unclamped_frame_gap_does_not_stall() {
        let mut cursor = CustomCursor::new(WidgetId::new(1), CursorConfig::default());
        let mut input = InputState::new();
        input.set_mouse_pos(400.0, 300.0);

        cursor.update(&input, FrameContext::new(FrameStamp::new(0, 0.0), f32::INFINITY));
        assert_eq!(cursor.dot(), (400.0, 300.0));
        assert!(cursor.ring().0.is_finite());

        run(&mut cursor, &input, 1, 1.0e6);
        let (rx, ry) = cursor.ring();
        assert!((rx - 400.0).abs() < 0.5 && (ry - 300.0).abs() < 0.5);
    }

    #[test]
    fn test_trail_fades() {
        let cursor = CustomCursor::new(WidgetId::new(1), CursorConfig::default());
        let last = &cursor.trail()[4];
        assert!((last.opacity - 0.4).abs() < 1e-6);
        assert!((last.scale - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_hover_and_press_states() {
        let mut cursor = CustomCursor::new(WidgetId::new(1), CursorConfig::default());
        let mut input = InputState::new();

        input.set_hover_target(true, Some("open"));
        input.mouse_button_down(MouseButton::Left);
        run(&mut cursor, &input, 1, 0.016);

        assert!((cursor.ring_diameter() - 60.0).abs() < f32::EPSILON);
        assert!((cursor.ring_scale() - 0.9).abs() < f32::EPSILON);
        assert!((cursor.dot_scale() - 0.5).abs() < f32::EPSILON);
        assert!(!cursor.dot_visible());
        assert_eq!(cursor.label(), Some("open"));

        input.set_hover_target(false, None);
        input.mouse_button_up(MouseButton::Left);
        run(&mut cursor, &input, 1, 0.016);
        assert!((cursor.ring_diameter() - 40.0).abs() < f32::EPSILON);
        assert!(cursor.dot_visible());
    }

    #[test]
    fn test_disabled_for_touch() {
        let mut cursor = CustomCursor::new(WidgetId::new(1), CursorConfig::default());
        let mut input = InputState::new();
        input.set_coarse_pointer(true);
        input.set_mouse_pos(10.0, 10.0);
        run(&mut cursor, &input, 10, 0.016);

        assert!(!cursor.is_enabled());
        assert_eq!(cursor.dot(), OFFSCREEN);

        let mut renderer = UIRenderer::new();
        cursor.render(&mut renderer);
        assert_eq!(renderer.command_count(), 0);
    }
}
