//! Magnetic pull: elements drift towards a nearby pointer.

use crate::animation::{Animation2D, Easing};
use crate::config::MagneticConfig;
use crate::input::InputState;
use crate::layout::Rect;
use crate::render::UIRenderer;
use crate::widget::core::{FrameContext, Widget, WidgetId, WidgetResponse, WidgetState};

/// Offset of an element centered at `center` for a pointer at `pointer`.
///
/// Zero at or beyond the configured radius; grows linearly towards the center.
#[must_use]
pub fn magnetic_offset(
    pointer: (f32, f32),
    center: (f32, f32),
    config: &MagneticConfig,
) -> (f32, f32) {
    let dx = pointer.0 - center.0;
    let dy = pointer.1 - center.1;
    let distance = dx.hypot(dy);

    if config.radius <= 0.0 || distance >= config.radius {
        return (0.0, 0.0);
    }

    let pull = (1.0 - distance / config.radius) * config.strength;
    (dx * pull, dy * pull)
}

/// Seconds to reach the pull target.
const FOLLOW_DURATION: f32 = 0.3;
/// Seconds to spring back after the pointer leaves.
const RELEASE_DURATION: f32 = 0.5;

/// An element that leans towards the pointer.
#[derive(Debug, Clone)]
pub struct MagneticButton {
    state: WidgetState,
    config: MagneticConfig,
    offset: Animation2D,
    engaged: bool,
}

impl MagneticButton {
    /// Creates a button resting over `bounds`.
    #[must_use]
    pub fn new(id: WidgetId, bounds: Rect, config: MagneticConfig) -> Self {
        Self {
            state: WidgetState::new(id, bounds),
            config,
            offset: Self::tween((0.0, 0.0), Easing::Power2Out, FOLLOW_DURATION),
            engaged: false,
        }
    }

    /// Current translation of the element.
    #[must_use]
    pub fn offset(&self) -> (f32, f32) {
        self.offset.value()
    }

    /// Translation the element is moving towards.
    #[must_use]
    pub fn target(&self) -> (f32, f32) {
        (self.offset.x.target(), self.offset.y.target())
    }

    /// Handles a pointer move at `(x, y)`.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let (tx, ty) = magnetic_offset((x, y), self.state.rect.center(), &self.config);
        let pulling = tx.abs() > f32::EPSILON || ty.abs() > f32::EPSILON;

        if pulling {
            if !self.engaged {
                self.offset = Self::tween(self.offset(), Easing::Power2Out, FOLLOW_DURATION);
            }
            self.engaged = true;
            self.offset.set_target(tx, ty);
        } else if self.engaged {
            self.pointer_leave();
        }
    }

    /// Handles the pointer leaving the field.
    pub fn pointer_leave(&mut self) {
        self.engaged = false;
        self.offset = Self::tween(self.offset(), Easing::Power3Out, RELEASE_DURATION);
        self.offset.set_target(0.0, 0.0);
    }

    fn tween(from: (f32, f32), easing: Easing, duration: f32) -> Animation2D {
        Animation2D::new(from.0, from.1, easing).with_timing(duration, 0.0)
    }
}

impl Widget for MagneticButton {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn update(&mut self, input: &InputState, ctx: FrameContext) -> WidgetResponse {
        let mut response = WidgetResponse::default();
        if self.state.is_enabled() && !input.is_coarse_pointer() {
            let inside = self.state.rect.contains(input.mouse_x, input.mouse_y);
            self.state.track_hover(inside, &mut response);

            self.pointer_move(input.mouse_x, input.mouse_y);
        }

        self.offset.update(ctx.dt);
        response
    }

    fn render(&self, _renderer: &mut UIRenderer) {
        // Draws nothing itself; the host applies `offset()` to the element.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FrameStamp;

    fn button() -> MagneticButton {
        let bounds = Rect::from_center((500.0, 500.0), 120.0, 40.0);
        MagneticButton::new(WidgetId::new(7), bounds, MagneticConfig::default())
    }

    #[test]
    fn test_zero_outside_radius() {
        let config = MagneticConfig::default();
        assert_eq!(magnetic_offset((650.0, 500.0), (500.0, 500.0), &config), (0.0, 0.0));
        assert_eq!(magnetic_offset((900.0, 900.0), (500.0, 500.0), &config), (0.0, 0.0));
    }

    #[test]
    fn test_pull_scales_with_distance() {
        let config = MagneticConfig::default();
        // d = 50: 50 * (1 - 1/3) * 0.3 = 10
        let (x, y) = magnetic_offset((550.0, 500.0), (500.0, 500.0), &config);
        assert!((x - 10.0).abs() < 1e-4);
        assert!(y.abs() < 1e-6);

        assert_eq!(magnetic_offset((500.0, 500.0), (500.0, 500.0), &config), (0.0, 0.0));
    }

    #[test]
    fn test_follows_and_releases() {
        let mut button = button();
        let mut input = InputState::new();
        input.set_mouse_pos(550.0, 500.0);

        button.update(&input, FrameContext::new(FrameStamp::new(0, 0.0), 0.0));
        assert!((button.target().0 - 10.0).abs() < 1e-4);
        button.update(&input, FrameContext::new(FrameStamp::new(1, 0.3), 0.3));
        assert!((button.offset().0 - 10.0).abs() < 1e-4);

        input.set_mouse_pos(900.0, 900.0);
        let response = button.update(&input, FrameContext::new(FrameStamp::new(2, 0.4), 0.1));
        assert!(response.unhovered);
        assert_eq!(button.target(), (0.0, 0.0));
        button.update(&input, FrameContext::new(FrameStamp::new(3, 1.0), 0.5));
        assert_eq!(button.offset(), (0.0, 0.0));
    }

    #[test]
    fn test_touch_pointer_ignored() {
        let mut button = button();
        let mut input = InputState::new();
        input.set_coarse_pointer(true);
        input.set_mouse_pos(550.0, 500.0);
        button.update(&input, FrameContext::new(FrameStamp::new(0, 0.0), 0.3));
        assert_eq!(button.offset(), (0.0, 0.0));
    }
}
