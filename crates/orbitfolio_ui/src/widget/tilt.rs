//! Mouse-tilt card with a moving glare highlight.
//!
//! The pointer position inside the card maps linearly to rotation around
//! both axes. Displayed values settle towards their targets with the tilt
//! bezier over `speed_ms`, so the card lags the pointer slightly.

use crate::animation::{Animation, Easing};
use crate::config::TiltConfig;
use crate::input::InputState;
use crate::layout::Rect;
use crate::render::{RenderCommand, UIRenderer};
use crate::style::{Accent, Color};
use crate::widget::core::{FrameContext, Widget, WidgetId, WidgetResponse, WidgetState};

/// Rotation and scale of a tilted card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltTransform {
    /// Rotation around the x axis, degrees.
    pub rotate_x: f32,
    /// Rotation around the y axis, degrees.
    pub rotate_y: f32,
    /// Uniform scale.
    pub scale: f32,
}

impl TiltTransform {
    /// No tilt, unit scale.
    pub const IDENTITY: Self = Self {
        rotate_x: 0.0,
        rotate_y: 0.0,
        scale: 1.0,
    };

    /// Formats the transform as a CSS `transform` value.
    #[must_use]
    pub fn css(&self, perspective: f32) -> String {
        format!(
            "perspective({perspective}px) rotateX({}deg) rotateY({}deg) scale3d({s}, {s}, {s})",
            self.rotate_x,
            self.rotate_y,
            s = self.scale
        )
    }
}

impl Default for TiltTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Glare highlight position in percent of the card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glare {
    /// Horizontal position, 0-100.
    pub x: f32,
    /// Vertical position, 0-100.
    pub y: f32,
}

impl Glare {
    /// Glare centered on the card.
    pub const CENTER: Self = Self { x: 50.0, y: 50.0 };
}

/// Tilt target for a pointer at `(x, y)` over `bounds`.
///
/// Returns `None` for an empty rect.
#[must_use]
pub fn tilt_for_pointer(
    bounds: &Rect,
    x: f32,
    y: f32,
    config: &TiltConfig,
) -> Option<(TiltTransform, Glare)> {
    if bounds.is_empty() {
        return None;
    }

    let half_w = bounds.width * 0.5;
    let half_h = bounds.height * 0.5;
    let (cx, cy) = bounds.center();
    let max = config.max_tilt;

    let transform = TiltTransform {
        rotate_x: ((y - cy) / half_h * -max).clamp(-max, max),
        rotate_y: ((x - cx) / half_w * max).clamp(-max, max),
        scale: config.scale,
    };
    let glare = Glare {
        x: (x - bounds.x) / bounds.width * 100.0,
        y: (y - bounds.y) / bounds.height * 100.0,
    };
    Some((transform, glare))
}

/// A card that tilts towards the pointer.
#[derive(Debug, Clone)]
pub struct TiltCard {
    state: WidgetState,
    config: TiltConfig,
    target: TiltTransform,
    glare: Glare,
    accent: Option<Accent>,
    rotate_x: Animation,
    rotate_y: Animation,
    scale: Animation,
}

impl TiltCard {
    /// Creates a flat card over `bounds`.
    #[must_use]
    pub fn new(id: WidgetId, bounds: Rect, config: TiltConfig) -> Self {
        let duration = config.speed_ms as f32 / 1000.0;
        let tween = |value| Animation::new(value, Easing::TILT).with_duration(duration);
        Self {
            state: WidgetState::new(id, bounds),
            config,
            target: TiltTransform::IDENTITY,
            glare: Glare::CENTER,
            accent: None,
            rotate_x: tween(0.0),
            rotate_y: tween(0.0),
            scale: tween(1.0),
        }
    }

    /// Adds a glowing accent border.
    #[must_use]
    pub fn with_accent(mut self, accent: Accent) -> Self {
        self.accent = Some(accent);
        self
    }

    /// Moves or resizes the card.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.state.rect = bounds;
    }

    /// Handles a pointer move at `(x, y)`.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if let Some((transform, glare)) = tilt_for_pointer(&self.state.rect, x, y, &self.config) {
            self.retarget(transform);
            self.glare = glare;
        }
    }

    /// Handles the pointer leaving the card.
    pub fn pointer_leave(&mut self) {
        self.retarget(TiltTransform::IDENTITY);
        self.glare = Glare::CENTER;
    }

    /// Transform the card is settling towards.
    #[must_use]
    pub fn target(&self) -> TiltTransform {
        self.target
    }

    /// Transform to display this frame.
    #[must_use]
    pub fn current(&self) -> TiltTransform {
        TiltTransform {
            rotate_x: self.rotate_x.value(),
            rotate_y: self.rotate_y.value(),
            scale: self.scale.value(),
        }
    }

    /// CSS `transform` value for this frame.
    #[must_use]
    pub fn css_transform(&self) -> String {
        self.current().css(self.config.perspective)
    }

    /// Current glare position.
    #[must_use]
    pub fn glare(&self) -> Glare {
        self.glare
    }

    /// Returns true while the pointer is over the card.
    #[must_use]
    pub fn is_hovering(&self) -> bool {
        self.state.is_hovered()
    }

    fn retarget(&mut self, transform: TiltTransform) {
        self.target = transform;
        self.rotate_x.set_target(transform.rotate_x);
        self.rotate_y.set_target(transform.rotate_y);
        self.scale.set_target(transform.scale);
    }
}

impl Widget for TiltCard {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn update(&mut self, input: &InputState, ctx: FrameContext) -> WidgetResponse {
        let mut response = WidgetResponse::default();
        if self.state.is_enabled() && !self.state.rect.is_empty() {
            let inside = self.state.rect.contains(input.mouse_x, input.mouse_y);
            self.state.track_hover(inside, &mut response);

            if inside {
                self.pointer_move(input.mouse_x, input.mouse_y);
            } else if response.unhovered {
                self.pointer_leave();
            }
        }

        self.rotate_x.update(ctx.dt);
        self.rotate_y.update(ctx.dt);
        self.scale.update(ctx.dt);
        response
    }

    fn render(&self, renderer: &mut UIRenderer) {
        if !self.state.is_visible() {
            return;
        }
        let rect = self.state.rect;

        if let Some(accent) = self.accent {
            renderer.push(
                self.state.z_index,
                RenderCommand::RectOutline {
                    bounds: rect,
                    color: accent.glow(self.is_hovering()),
                    width: 1.0,
                    corner_radius: 12.0,
                },
            );
        }

        if self.config.glare && self.is_hovering() {
            let center = (
                rect.x + rect.width * self.glare.x / 100.0,
                rect.y + rect.height * self.glare.y / 100.0,
            );
            renderer.push(
                self.state.z_index + 1,
                RenderCommand::RadialGlow {
                    center,
                    radius: rect.width.max(rect.height),
                    color: Color::WHITE.with_alpha(0.1),
                    pulse: false,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FrameStamp;

    fn card() -> TiltCard {
        TiltCard::new(WidgetId::new(1), Rect::new(0.0, 0.0, 200.0, 100.0), TiltConfig::default())
    }

    fn frame(index: u64, dt: f32) -> FrameContext {
        FrameContext::new(FrameStamp::new(index, index as f64 / 60.0), dt)
    }

    #[test]
    fn test_corner_tilts_to_max() {
        let mut card = card();
        card.pointer_move(200.0, 0.0);
        let target = card.target();
        assert!((target.rotate_x - 15.0).abs() < 1e-4);
        assert!((target.rotate_y - 15.0).abs() < 1e-4);
        assert!((target.scale - 1.02).abs() < 1e-6);
        assert_eq!(card.glare(), Glare { x: 100.0, y: 0.0 });
    }

    #[test]
    fn test_tilt_is_clamped() {
        let config = TiltConfig::default();
        let bounds = Rect::new(0.0, 0.0, 200.0, 100.0);
        let (t, _) = tilt_for_pointer(&bounds, 1000.0, -1000.0, &config).unwrap();
        assert!((t.rotate_x - 15.0).abs() < 1e-4);
        assert!((t.rotate_y - 15.0).abs() < 1e-4);

        let (t, _) = tilt_for_pointer(&bounds, 100.0, 50.0, &config).unwrap();
        assert!(t.rotate_x.abs() < 1e-6 && t.rotate_y.abs() < 1e-6);
    }

    #[test]
    fn test_empty_bounds_ignored() {
        assert!(tilt_for_pointer(&Rect::ZERO, 10.0, 10.0, &TiltConfig::default()).is_none());

        let mut card = TiltCard::new(WidgetId::new(2), Rect::ZERO, TiltConfig::default());
        card.pointer_move(10.0, 10.0);
        assert_eq!(card.target(), TiltTransform::IDENTITY);
    }

    #[test]
    fn test_leave_resets() {
        let mut card = card();
        card.pointer_move(10.0, 90.0);
        card.pointer_leave();
        assert_eq!(card.target(), TiltTransform::IDENTITY);
        assert_eq!(card.glare(), Glare::CENTER);
    }

    #[test]
    fn test_display_settles_over_speed() {
        let mut card = card();
        let mut input = InputState::new();
        input.set_mouse_pos(199.0, 1.0);

        card.update(&input, frame(1, 0.0));
        assert!(card.is_hovering());
        assert!(card.current().rotate_y.abs() < 1e-6);

        card.update(&input, frame(2, 0.2));
        let mid = card.current().rotate_y;
        assert!(mid > 0.0 && mid < card.target().rotate_y + 1e-4);

        card.update(&input, frame(3, 0.3));
        assert!((card.current().rotate_y - card.target().rotate_y).abs() < 1e-4);

        input.set_mouse_pos(500.0, 500.0);
        let response = card.update(&input, frame(4, 0.5));
        assert!(response.unhovered);
        assert!((card.current().rotate_y).abs() < 1e-4);
    }

    #[test]
    fn test_render_glare_and_accent() {
        let mut card = card().with_accent(Accent::Purple);
        let mut renderer = UIRenderer::new();
        card.render(&mut renderer);
        assert_eq!(renderer.command_count(), 1);

        let mut input = InputState::new();
        input.set_mouse_pos(50.0, 50.0);
        card.update(&input, frame(1, 0.016));

        renderer.begin_frame();
        card.render(&mut renderer);
        let batches = renderer.end_frame();
        assert_eq!(batches.len(), 2);
        assert!(matches!(
            batches[0].commands[0],
            RenderCommand::RectOutline { color, .. } if color == Accent::Purple.glow(true)
        ));
    }

    #[test]
    fn test_css_transform() {
        let t = TiltTransform {
            rotate_x: -5.0,
            rotate_y: 2.5,
            scale: 1.02,
        };
        assert_eq!(
            t.css(1000.0),
            "perspective(1000px) rotateX(-5deg) rotateY(2.5deg) scale3d(1.02, 1.02, 1.02)"
        );
    }
}
