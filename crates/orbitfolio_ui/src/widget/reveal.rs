//! Scroll-triggered entrances and parallax.
//!
//! Bounds handed to these widgets are in viewport coordinates: the host
//! updates them on scroll, and `y = 0` is the top of the visible area.
//!
//! ```text
//!   viewport top ─────────────  y = 0
//!
//!   stagger trigger ─ ─ ─ ─ ─  y = 0.80·h
//!   reveal trigger  ─ ─ ─ ─ ─  y = 0.85·h   element top crossing this plays the reveal
//!   viewport bottom ──────────  y = h
//! ```

use crate::animation::{Animation, Easing};
use crate::config::RevealConfig;
use crate::input::InputState;
use crate::layout::Rect;
use crate::render::UIRenderer;
use crate::widget::core::{FrameContext, Widget, WidgetId, WidgetResponse, WidgetState};

/// Direction an element travels while revealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RevealDirection {
    /// Rises into place.
    #[default]
    Up,
    /// Drops into place.
    Down,
    /// Slides in towards the left.
    Left,
    /// Slides in towards the right.
    Right,
}

impl RevealDirection {
    /// Starting translation for an entrance of `distance` pixels.
    #[must_use]
    pub fn start_offset(self, distance: f32) -> (f32, f32) {
        match self {
            Self::Up => (0.0, distance),
            Self::Down => (0.0, -distance),
            Self::Left => (distance, 0.0),
            Self::Right => (-distance, 0.0),
        }
    }
}

/// Returns true once an element's top has scrolled above `trigger`
/// (a fraction of the viewport height).
#[must_use]
pub fn crossed_trigger(element_top: f32, viewport_height: f32, trigger: f32) -> bool {
    element_top <= viewport_height * trigger
}

/// A single element that fades and slides in once.
#[derive(Debug, Clone)]
pub struct Reveal {
    state: WidgetState,
    direction: RevealDirection,
    distance: f32,
    trigger: f32,
    progress: Animation,
    triggered: bool,
}

impl Reveal {
    /// Creates a hidden element over `bounds`.
    #[must_use]
    pub fn new(
        id: WidgetId,
        bounds: Rect,
        direction: RevealDirection,
        config: &RevealConfig,
    ) -> Self {
        Self {
            state: WidgetState::new(id, bounds),
            direction,
            distance: config.offset,
            trigger: config.trigger,
            progress: Animation::new(0.0, Easing::Power3Out).with_duration(config.duration),
            triggered: false,
        }
    }

    /// Holds the element hidden for `delay` seconds after it triggers, so
    /// sibling sections can cascade.
    #[must_use]
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.progress = self.progress.with_delay(delay.max(0.0));
        self
    }

    /// Updates the element bounds after a scroll.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.state.rect = bounds;
    }

    /// Starts the entrance if the element crossed the trigger line.
    ///
    /// Returns true only on the call that starts it.
    pub fn check_trigger(&mut self, viewport_height: f32) -> bool {
        if self.triggered || !crossed_trigger(self.state.rect.y, viewport_height, self.trigger) {
            return false;
        }
        self.triggered = true;
        self.progress.set_target(1.0);
        tracing::trace!(widget = self.state.id.raw(), "reveal triggered");
        true
    }

    /// Returns true once the entrance has started.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Returns true once the entrance has finished.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.triggered && self.progress.is_complete()
    }

    /// Current translation.
    #[must_use]
    pub fn offset(&self) -> (f32, f32) {
        let (x, y) = self.direction.start_offset(self.distance);
        let remaining = 1.0 - self.progress.value();
        (x * remaining, y * remaining)
    }

    /// Current opacity.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.progress.value()
    }
}

impl Widget for Reveal {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn update(&mut self, input: &InputState, ctx: FrameContext) -> WidgetResponse {
        let response = WidgetResponse {
            changed: self.check_trigger(input.viewport().1),
            ..WidgetResponse::default()
        };
        self.progress.update(ctx.dt);
        response
    }

    fn render(&self, _renderer: &mut UIRenderer) {
        // The host applies `offset()` and `opacity()` to the element.
    }
}

/// A group of children revealed one after another.
#[derive(Debug, Clone)]
pub struct StaggerGroup {
    state: WidgetState,
    distance: f32,
    trigger: f32,
    children: Vec<Animation>,
    triggered: bool,
}

impl StaggerGroup {
    /// Creates a hidden group of `count` children inside `bounds`.
    #[must_use]
    pub fn new(id: WidgetId, bounds: Rect, count: usize, config: &RevealConfig) -> Self {
        let children = (0..count)
            .map(|i| {
                Animation::new(0.0, Easing::Power3Out)
                    .with_duration(config.stagger_duration)
                    .with_delay(i as f32 * config.stagger)
            })
            .collect();
        Self {
            state: WidgetState::new(id, bounds),
            distance: config.stagger_offset,
            trigger: config.stagger_trigger,
            children,
            triggered: false,
        }
    }

    /// Updates the container bounds after a scroll.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.state.rect = bounds;
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns true for a group without children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Starts the sequence if the container crossed the trigger line.
    pub fn check_trigger(&mut self, viewport_height: f32) -> bool {
        if self.triggered || !crossed_trigger(self.state.rect.y, viewport_height, self.trigger) {
            return false;
        }
        self.triggered = true;
        for child in &mut self.children {
            child.set_target(1.0);
        }
        true
    }

    /// Vertical translation of child `index`, `None` if out of range.
    #[must_use]
    pub fn child_offset(&self, index: usize) -> Option<f32> {
        self.children
            .get(index)
            .map(|child| self.distance * (1.0 - child.value()))
    }

    /// Opacity of child `index`, `None` if out of range.
    #[must_use]
    pub fn child_opacity(&self, index: usize) -> Option<f32> {
        self.children.get(index).map(Animation::value)
    }

    /// Returns true once every child has finished.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.triggered && self.children.iter().all(Animation::is_complete)
    }
}

impl Widget for StaggerGroup {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn update(&mut self, input: &InputState, ctx: FrameContext) -> WidgetResponse {
        let response = WidgetResponse {
            changed: self.check_trigger(input.viewport().1),
            ..WidgetResponse::default()
        };
        for child in &mut self.children {
            child.update(ctx.dt);
        }
        response
    }

    fn render(&self, _renderer: &mut UIRenderer) {}
}

/// Scroll progress of an element through the viewport.
///
/// 0 when its top sits at the viewport bottom, 1 when its bottom reaches the
/// viewport top; clamped outside that range.
#[must_use]
pub fn parallax_progress(element: &Rect, viewport_height: f32) -> f32 {
    let travel = viewport_height + element.height;
    if travel <= 0.0 {
        return 0.0;
    }
    ((viewport_height - element.y) / travel).clamp(0.0, 1.0)
}

/// Vertical parallax translation for `speed` (0.5 moves at half speed).
#[must_use]
pub fn parallax_offset(element: &Rect, viewport_height: f32, speed: f32) -> f32 {
    viewport_height * speed * 0.5 * parallax_progress(element, viewport_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FrameStamp;

    fn ctx(index: u64, dt: f32) -> FrameContext {
        FrameContext::new(FrameStamp::new(index, 0.0), dt)
    }

    fn viewport_input() -> InputState {
        let mut input = InputState::new();
        input.set_viewport(1000.0, 800.0);
        input
    }

    #[test]
    fn test_reveal_fires_once_at_trigger() {
        let config = RevealConfig::default();
        let bounds = Rect::new(0.0, 900.0, 400.0, 200.0);
        let mut reveal = Reveal::new(WidgetId::new(1), bounds, RevealDirection::Up, &config);
        let input = viewport_input();

        assert!(!reveal.update(&input, ctx(0, 0.1)).changed);
        assert_eq!(reveal.offset(), (0.0, 60.0));
        assert!(reveal.opacity().abs() < f32::EPSILON);

        // 0.85 · 800 = 680
        reveal.set_bounds(Rect::new(0.0, 681.0, 400.0, 200.0));
        assert!(!reveal.update(&input, ctx(1, 0.1)).changed);
        reveal.set_bounds(Rect::new(0.0, 680.0, 400.0, 200.0));
        assert!(reveal.update(&input, ctx(2, 0.4)).changed);
        assert!(reveal.is_triggered() && !reveal.is_revealed());
        assert!(reveal.offset().1 < 60.0);

        reveal.update(&input, ctx(3, 0.5));
        assert!(reveal.is_revealed());
        assert_eq!(reveal.offset(), (0.0, 0.0));
        assert!((reveal.opacity() - 1.0).abs() < f32::EPSILON);

        // Scrolling back out and in again does not replay it
        reveal.set_bounds(Rect::new(0.0, 2000.0, 400.0, 200.0));
        reveal.update(&input, ctx(4, 0.1));
        reveal.set_bounds(Rect::new(0.0, 100.0, 400.0, 200.0));
        assert!(!reveal.update(&input, ctx(5, 0.1)).changed);
        assert!((reveal.opacity() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_delayed_reveal_holds_until_delay_passes() {
        let config = RevealConfig::default();
        let bounds = Rect::new(0.0, 100.0, 400.0, 200.0);
        let mut reveal =
            Reveal::new(WidgetId::new(3), bounds, RevealDirection::Left, &config).with_delay(0.3);
        let input = viewport_input();

        assert!(reveal.update(&input, ctx(0, 0.2)).changed);
        assert!(reveal.is_triggered());
        assert!(reveal.opacity().abs() < f32::EPSILON);
        assert_eq!(reveal.offset(), (60.0, 0.0));

        reveal.update(&input, ctx(1, 0.2));
        assert!(reveal.opacity() > 0.0);
        assert!(reveal.offset().0 < 60.0);

        reveal.update(&input, ctx(2, 1.0));
        assert!(reveal.is_revealed());
        assert_eq!(reveal.offset(), (0.0, 0.0));
    }

    #[test]
    fn test_directions() {
        assert_eq!(RevealDirection::Up.start_offset(60.0), (0.0, 60.0));
        assert_eq!(RevealDirection::Down.start_offset(60.0), (0.0, -60.0));
        assert_eq!(RevealDirection::Left.start_offset(60.0), (60.0, 0.0));
        assert_eq!(RevealDirection::Right.start_offset(60.0), (-60.0, 0.0));
    }

    #[test]
    fn test_stagger_children_start_in_order() {
        let config = RevealConfig::default();
        let bounds = Rect::new(0.0, 600.0, 800.0, 300.0);
        let mut group = StaggerGroup::new(WidgetId::new(2), bounds, 3, &config);
        let input = viewport_input();

        assert!(group.update(&input, ctx(0, 0.15)).changed);
        // t = 0.15: child 0 and 1 moving, child 2 (delay 0.2) still hidden
        assert!(group.child_opacity(0).unwrap() > group.child_opacity(1).unwrap());
        assert!(group.child_opacity(1).unwrap() > 0.0);
        assert!(group.child_opacity(2).unwrap().abs() < f32::EPSILON);
        assert!((group.child_offset(2).unwrap() - 40.0).abs() < f32::EPSILON);
        assert_eq!(group.child_offset(3), None);

        group.update(&input, ctx(1, 0.7));
        assert!(group.is_revealed());
        assert!(group.child_offset(2).unwrap().abs() < f32::EPSILON);
    }

    #[test]
    fn test_parallax_progress() {
        let element = Rect::new(0.0, 800.0, 100.0, 200.0);
        assert!(parallax_progress(&element, 800.0).abs() < f32::EPSILON);

        let gone = Rect::new(0.0, -200.0, 100.0, 200.0);
        assert!((parallax_progress(&gone, 800.0) - 1.0).abs() < f32::EPSILON);

        let halfway = Rect::new(0.0, 300.0, 100.0, 200.0);
        assert!((parallax_progress(&halfway, 800.0) - 0.5).abs() < 1e-6);
        assert!((parallax_offset(&halfway, 800.0, 0.5) - 100.0).abs() < 1e-4);

        assert!(parallax_progress(&Rect::ZERO, 0.0).abs() < f32::EPSILON);
    }
}
