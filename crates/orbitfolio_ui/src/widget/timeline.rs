//! # Radial Timeline Widget
//!
//! Hosts an [`OrbitalLayoutEngine`] inside a screen rectangle: routes clicks
//! and Escape to selection, advances rotation once per frame and emits the
//! ring, orb, nodes and info card as render commands.
//!
//! ## Layers
//!
//! ```text
//! z = 0          orbit ring, central orb
//! z = 50..150    nodes, by 100 + 50·cos θ
//! z = 200        the expanded node
//! z = 300        its info card
//! ```

use crate::input::{InputState, Key, MouseButton};
use crate::layout::Rect;
use crate::render::{NodeInstance, RenderCommand, UIRenderer};
use crate::style::{Color, Palette, Theme};
use crate::widget::card::{CardConfig, InfoCard};
use crate::widget::core::{FrameContext, Widget, WidgetId, WidgetResponse, WidgetState};
use crate::widget::orbital::{DepthOrder, ItemId, OrbitalLayoutEngine};

/// Z-index of the expanded node.
pub const ACTIVE_Z: i32 = 200;
/// Z-index of the info card.
pub const CARD_Z: i32 = 300;
/// Scale of the expanded node.
pub const ACTIVE_SCALE: f32 = 1.5;
/// Diameter of the central orb.
const ORB_DIAMETER: f32 = 64.0;
/// Gap between a node and its label.
const LABEL_GAP: f32 = 12.0;

/// Aura diameter for an item's energy.
#[must_use]
pub fn aura_diameter(energy: f32) -> f32 {
    energy * 0.4 + 40.0
}

/// Everything needed to draw one node this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeVisual {
    /// Item shown by the node.
    pub id: ItemId,
    /// Position of the item on the ring.
    pub index: usize,
    /// Screen-space center.
    pub center: (f32, f32),
    /// Base radius before scaling.
    pub radius: f32,
    /// Scale, 1.5 when expanded.
    pub scale: f32,
    /// Opacity in [0.4, 1].
    pub opacity: f32,
    /// Z-index.
    pub z_index: i32,
    /// Stacking order among ring nodes.
    pub depth: DepthOrder,
    /// The node is the selected item.
    pub active: bool,
    /// The node is related to the selected item and pulses.
    pub pulsing: bool,
    /// Aura diameter, drawn only while pulsing.
    pub aura: Option<f32>,
    /// Node colors.
    pub palette: Palette,
}

impl NodeVisual {
    /// Radius the node occupies on screen.
    #[must_use]
    pub fn hit_radius(&self) -> f32 {
        self.radius * self.scale
    }

    /// Returns true if `(x, y)` lies on the node.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let dx = x - self.center.0;
        let dy = y - self.center.1;
        dx * dx + dy * dy <= self.hit_radius() * self.hit_radius()
    }
}

/// Interactive radial timeline.
#[derive(Debug, Clone)]
pub struct TimelineWidget {
    state: WidgetState,
    engine: OrbitalLayoutEngine,
    theme: Theme,
    card: CardConfig,
    viewport: Rect,
}

impl TimelineWidget {
    /// Wraps `engine` in a widget covering `bounds`; the ring is centered in it.
    #[must_use]
    pub fn new(id: WidgetId, bounds: Rect, engine: OrbitalLayoutEngine) -> Self {
        Self {
            state: WidgetState::new(id, bounds),
            engine,
            theme: Theme::default(),
            card: CardConfig::default(),
            viewport: bounds,
        }
    }

    /// Replaces the color theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Replaces the info card layout.
    #[must_use]
    pub fn with_card(mut self, card: CardConfig) -> Self {
        self.card = card;
        self
    }

    /// The wrapped engine.
    #[must_use]
    pub fn engine(&self) -> &OrbitalLayoutEngine {
        &self.engine
    }

    /// Mutable access to the wrapped engine.
    pub fn engine_mut(&mut self) -> &mut OrbitalLayoutEngine {
        &mut self.engine
    }

    /// Ring center in screen space.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        self.state.rect.center()
    }

    /// Node visuals in item order.
    #[must_use]
    pub fn nodes(&self) -> Vec<NodeVisual> {
        let (cx, cy) = self.center();
        let radius = self.engine.config().node_radius as f32;

        self.engine
            .layout()
            .nodes
            .into_iter()
            .zip(self.engine.items())
            .map(|(node, item)| {
                let active = self.engine.is_active(item.id);
                let pulsing = self.engine.is_related_to_active(item.id);
                let palette = if active {
                    self.theme.active
                } else if pulsing {
                    self.theme.related
                } else {
                    self.theme.idle
                };

                NodeVisual {
                    id: item.id,
                    index: node.index,
                    center: (cx + node.x as f32, cy + node.y as f32),
                    radius,
                    scale: if active { ACTIVE_SCALE } else { 1.0 },
                    opacity: if active { 1.0 } else { node.opacity as f32 },
                    z_index: if active { ACTIVE_Z } else { node.z_index },
                    depth: node.depth,
                    active,
                    pulsing,
                    aura: pulsing.then(|| aura_diameter(item.energy)),
                    palette,
                }
            })
            .collect()
    }

    /// The node under `(x, y)`: the expanded node first, then front-most.
    ///
    /// The info card is not considered; see [`InfoCard::connection_at`].
    #[must_use]
    pub fn hit_test(&self, x: f32, y: f32) -> Option<ItemId> {
        self.nodes()
            .into_iter()
            .filter(|node| node.contains(x, y))
            .max_by(|a, b| a.active.cmp(&b.active).then(a.depth.cmp(&b.depth)))
            .map(|node| node.id)
    }

    /// Card of the expanded node, if any.
    #[must_use]
    pub fn info_card(&self) -> Option<InfoCard> {
        let active = self.engine.state().active_item()?;
        let item = self.engine.item(active)?;
        let node = self.nodes().into_iter().find(|node| node.id == active)?;
        let related = self.engine.related_items(active);
        Some(InfoCard::place(item, &related, node.center, &self.viewport, self.card))
    }

    /// GPU instance records, back to front.
    #[must_use]
    pub fn instances(&self) -> Vec<NodeInstance> {
        let mut nodes = self.nodes();
        nodes.sort_by(|a, b| a.z_index.cmp(&b.z_index).then(a.depth.cmp(&b.depth)));
        nodes
            .iter()
            .map(|node| {
                NodeInstance::new(
                    [node.center.0, node.center.1],
                    node.radius,
                    node.scale,
                    node.opacity,
                    node.depth.normalized() as f32,
                    node.palette.background.to_array(),
                )
            })
            .collect()
    }

    fn render_node(&self, renderer: &mut UIRenderer, node: &NodeVisual) {
        if let Some(diameter) = node.aura {
            renderer.push(
                node.z_index,
                RenderCommand::RadialGlow {
                    center: node.center,
                    radius: diameter * 0.5,
                    color: self.theme.aura,
                    pulse: true,
                },
            );
        }

        renderer.push(
            node.z_index,
            RenderCommand::Circle {
                center: node.center,
                radius: node.hit_radius(),
                fill: node.palette.background.fade(node.opacity),
                stroke: node.palette.border.fade(node.opacity),
                stroke_width: 2.0,
            },
        );

        if let Some(item) = self.engine.item(node.id) {
            let label = if node.active {
                self.theme.label_active
            } else {
                self.theme.label_idle
            };
            renderer.push(
                node.z_index,
                RenderCommand::Text {
                    text: item.title.clone(),
                    x: node.center.0,
                    y: node.center.1 + node.hit_radius() + LABEL_GAP,
                    color: label.fade(node.opacity),
                    font_size: if node.active { 13.0 } else { 11.0 },
                    centered: true,
                },
            );
        }
    }
}

impl Widget for TimelineWidget {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn update(&mut self, input: &InputState, ctx: FrameContext) -> WidgetResponse {
        let mut response = WidgetResponse::default();
        let (width, height) = input.viewport();
        self.viewport = Rect::new(0.0, 0.0, width, height);

        if self.state.is_enabled() {
            let inside = self.state.rect.contains(input.mouse_x, input.mouse_y);
            self.state.track_hover(inside, &mut response);

            let before = self.engine.state().active_item();

            if input.key_pressed(Key::Escape) {
                self.engine.clear_selection();
            }

            // Hit-test against what the user saw last frame, before rotating.
            if input.mouse_clicked(MouseButton::Left) {
                let (x, y) = (input.mouse_x, input.mouse_y);
                match self.info_card().filter(|card| card.contains(x, y)) {
                    // The card sits above every node; a click on it never
                    // reaches the ring.
                    Some(card) => {
                        response.clicked = true;
                        self.engine.select_item(card.connection_at(x, y).unwrap_or(card.id));
                    }
                    None if inside => {
                        response.clicked = true;
                        match self.hit_test(x, y) {
                            Some(id) => {
                                self.engine.select_item(id);
                            }
                            None => {
                                self.engine.clear_selection();
                            }
                        }
                    }
                    None => {}
                }
            }

            response.changed = self.engine.state().active_item() != before;
        }

        self.engine.advance(ctx.frame);
        response
    }

    fn render(&self, renderer: &mut UIRenderer) {
        if !self.state.is_visible() {
            return;
        }

        let center = self.center();
        let ring_radius = self.engine.config().radius as f32;

        renderer.push(
            self.state.z_index,
            RenderCommand::Circle {
                center,
                radius: ring_radius,
                fill: Color::TRANSPARENT,
                stroke: self.theme.orbit,
                stroke_width: 1.0,
            },
        );
        renderer.push(
            self.state.z_index,
            RenderCommand::RadialGlow {
                center,
                radius: ORB_DIAMETER,
                color: self.theme.orb[1].with_alpha(0.3),
                pulse: true,
            },
        );
        renderer.push(
            self.state.z_index,
            RenderCommand::Circle {
                center,
                radius: ORB_DIAMETER * 0.5,
                fill: self.theme.orb[0].lerp(self.theme.orb[2], 0.5),
                stroke: Color::TRANSPARENT,
                stroke_width: 0.0,
            },
        );

        let mut nodes = self.nodes();
        nodes.sort_by(|a, b| a.depth.cmp(&b.depth));
        for node in &nodes {
            self.render_node(renderer, node);
        }

        if let Some(card) = self.info_card() {
            card.render(renderer, CARD_Z);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FrameStamp;
    use crate::widget::orbital::{ItemStatus, TimelineItem};

    fn widget() -> TimelineWidget {
        let items = vec![
            TimelineItem::new(1, ItemStatus::Completed, 100.0, &[2]).with_title("Plan"),
            TimelineItem::new(2, ItemStatus::Completed, 90.0, &[1, 3]).with_title("Design"),
            TimelineItem::new(3, ItemStatus::InProgress, 60.0, &[2]).with_title("Build"),
            TimelineItem::new(4, ItemStatus::Pending, 30.0, &[]).with_title("Test"),
        ];
        TimelineWidget::new(
            WidgetId::new(1),
            Rect::new(0.0, 0.0, 800.0, 800.0),
            OrbitalLayoutEngine::new(items),
        )
    }

    fn input_at(x: f32, y: f32) -> InputState {
        let mut input = InputState::new();
        input.set_viewport(800.0, 800.0);
        input.set_mouse_pos(x, y);
        input
    }

    fn frame(index: u64) -> FrameContext {
        FrameContext::new(FrameStamp::new(index, index as f64 / 60.0), 1.0 / 60.0)
    }

    #[test]
    fn test_nodes_centered_on_ring() {
        let widget = widget();
        let nodes = widget.nodes();
        // Item 0 at 0°: right of center
        assert!((nodes[0].center.0 - 620.0).abs() < 1e-3);
        assert!((nodes[0].center.1 - 400.0).abs() < 1e-3);
        assert!(nodes.iter().all(|n| n.aura.is_none() && !n.active));
    }

    #[test]
    fn test_click_node_selects() {
        let mut widget = widget();
        // Item 2 (index 1) sits at 90°: below center
        let mut input = input_at(400.0, 620.0);
        input.mouse_button_down(MouseButton::Left);

        let response = widget.update(&input, frame(0));
        assert!(response.clicked && response.changed);
        assert_eq!(widget.engine().state().active_item(), Some(ItemId(2)));

        let nodes = widget.nodes();
        let active = &nodes[1];
        assert_eq!(active.z_index, ACTIVE_Z);
        assert!((active.opacity - 1.0).abs() < f32::EPSILON);
        assert!((active.scale - ACTIVE_SCALE).abs() < f32::EPSILON);
        // Recentered at the top of the ring
        assert!((active.center.0 - 400.0).abs() < 1e-3);
        assert!((active.center.1 - 180.0).abs() < 1e-3);

        let pulsing: Vec<ItemId> = nodes.iter().filter(|n| n.pulsing).map(|n| n.id).collect();
        assert_eq!(pulsing, vec![ItemId(1), ItemId(3)]);
        assert!((nodes[0].aura.unwrap() - 80.0).abs() < 1e-4);
    }

    #[test]
    fn test_click_background_clears() {
        let mut widget = widget();
        widget.engine_mut().select_item(ItemId(3));

        // Empty ring space left of the card
        let mut input = input_at(100.0, 400.0);
        input.mouse_button_down(MouseButton::Left);
        let response = widget.update(&input, frame(0));

        assert!(response.changed);
        assert_eq!(widget.engine().state().active_item(), None);
        assert!(widget.engine().state().is_auto_rotating());
    }

    #[test]
    fn test_escape_clears() {
        let mut widget = widget();
        widget.engine_mut().select_item(ItemId(1));

        let mut input = input_at(0.0, 0.0);
        input.key_down(Key::Escape);
        assert!(widget.update(&input, frame(0)).changed);
        assert_eq!(widget.engine().state().active_item(), None);
    }

    #[test]
    fn test_rotation_advances_once_per_frame() {
        let mut widget = widget();
        let input = input_at(0.0, 0.0);
        widget.update(&input, frame(0));
        widget.update(&input, frame(0));
        widget.update(&input, frame(1));
        assert!((widget.engine().rotation_angle() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_render_layers() {
        let mut widget = widget();
        widget.engine_mut().select_item(ItemId(2));

        let mut renderer = UIRenderer::new();
        widget.render(&mut renderer);
        let batches = renderer.end_frame();

        assert_eq!(batches.first().map(|b| b.z_index), Some(0));
        assert_eq!(batches.last().map(|b| b.z_index), Some(CARD_Z));
        assert!(batches.iter().any(|b| b.z_index == ACTIVE_Z));
        let card = widget.info_card().unwrap();
        let titles: Vec<&str> = card.connections.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Plan", "Build"]);
    }

    #[test]
    fn test_click_connection_row_jumps_to_item() {
        let mut widget = widget();
        widget.engine_mut().select_item(ItemId(2));

        let card = widget.info_card().unwrap();
        let build = card.connections.iter().find(|c| c.id == ItemId(3)).unwrap();
        let (x, y) = build.bounds.center();

        let mut input = input_at(x, y);
        input.mouse_button_down(MouseButton::Left);
        let response = widget.update(&input, frame(0));

        assert!(response.clicked && response.changed);
        assert_eq!(widget.engine().state().active_item(), Some(ItemId(3)));
        assert!(!widget.engine().state().is_auto_rotating());
        let highlighted: Vec<ItemId> =
            widget.engine().state().highlighted().iter().copied().collect();
        assert_eq!(highlighted, vec![ItemId(2)]);
    }

    #[test]
    fn test_click_card_body_toggles_item_off() {
        let mut widget = widget();
        widget.engine_mut().select_item(ItemId(2));

        let card = widget.info_card().unwrap();
        let mut input = input_at(card.bounds.x + 20.0, card.bounds.y + 20.0);
        input.mouse_button_down(MouseButton::Left);
        let response = widget.update(&input, frame(0));

        assert!(response.clicked && response.changed);
        assert_eq!(widget.engine().state().active_item(), None);
        assert!(widget.engine().state().is_auto_rotating());
    }

    #[test]
    fn test_instances_back_to_front() {
        let widget = widget();
        let instances = widget.instances();
        assert_eq!(instances.len(), 4);
        for pair in instances.windows(2) {
            assert!(pair[0].depth <= pair[1].depth);
        }
    }
}
