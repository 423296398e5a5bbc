//! Info card for the expanded timeline node.
//!
//! The card hangs under its node and is laid out in the same frame the node
//! is selected. It is clamped inside the viewport so a node near the edge
//! never pushes its card off-screen.
//!
//! ```text
//!            │  stem from the node
//! ┌──────────┴───────────┐
//! │ [STATUS]        date │
//! │ Title                │
//! │ body text ...        │
//! │ Progress / Energy 60%│
//! │ ▓▓▓▓▓▓▓▓░░░░░░░░░░░  │
//! │──────────────────────│  only with connections
//! │ CONNECTED            │
//! │ [ Design  → ]        │  one clickable row per related item
//! └──────────────────────┘
//! ```

use crate::layout::Rect;
use crate::render::{RenderCommand, UIRenderer};
use crate::style::{Color, Palette};
use crate::widget::orbital::{ItemId, TimelineItem};

/// Configuration for card layout and colors.
#[derive(Debug, Clone, Copy)]
pub struct CardConfig {
    /// Card width.
    pub width: f32,
    /// Distance from the node center to the card's top edge.
    pub node_offset: f32,
    /// Padding inside the card.
    pub padding: f32,
    /// Approximate glyph width used to wrap body text.
    pub char_width: f32,
    /// Line height of body text.
    pub line_height: f32,
    /// Background color.
    pub background: Color,
    /// Border color.
    pub border: Color,
    /// Text color.
    pub text: Color,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            width: 288.0,
            node_offset: 96.0,
            padding: 16.0,
            char_width: 7.0,
            line_height: 18.0,
            background: Color::BLACK.with_alpha(0.9),
            border: Color::WHITE.with_alpha(0.3),
            text: Color::WHITE.with_alpha(0.8),
        }
    }
}

const BADGE_ROW: f32 = 28.0;
const TITLE_ROW: f32 = 24.0;
const BODY_GAP: f32 = 16.0;
const ENERGY_LABEL_ROW: f32 = 20.0;
const ENERGY_BAR_HEIGHT: f32 = 4.0;
const SECTION_GAP: f32 = 20.0;
const CONNECTED_LABEL_ROW: f32 = 20.0;
const CONNECTION_ROW: f32 = 24.0;
const CONNECTION_GAP: f32 = 4.0;
const STEM_LENGTH: f32 = 12.0;

/// A related item listed on the card. Clicking its row selects it.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    /// Related item.
    pub id: ItemId,
    /// Its title.
    pub title: String,
    /// Screen bounds of its row.
    pub bounds: Rect,
}

/// The laid-out card of one item.
#[derive(Debug, Clone)]
pub struct InfoCard {
    /// Item shown on the card.
    pub id: ItemId,
    /// Item title.
    pub title: String,
    /// Item date text.
    pub date: String,
    /// Body text.
    pub content: String,
    /// Status badge text.
    pub status_label: &'static str,
    /// Badge colors.
    pub status_palette: Palette,
    /// Raw energy value, printed next to the bar.
    pub energy: f32,
    /// Energy bar fill in [0, 1].
    pub energy_fill: f32,
    /// Related items that exist on the ring, in listed order.
    pub connections: Vec<Connection>,
    /// Screen bounds after clamping.
    pub bounds: Rect,
    /// Layout configuration.
    pub config: CardConfig,
}

impl InfoCard {
    /// Lays out the card for `item` hanging under `node_center`.
    #[must_use]
    pub fn place(
        item: &TimelineItem,
        related: &[&TimelineItem],
        node_center: (f32, f32),
        viewport: &Rect,
        config: CardConfig,
    ) -> Self {
        let mut height = config.padding * 2.0 + details_height(&item.content, &config);
        if !related.is_empty() {
            height += SECTION_GAP + CONNECTED_LABEL_ROW + related.len() as f32 * CONNECTION_ROW;
        }

        let bounds = Rect::new(
            node_center.0 - config.width * 0.5,
            node_center.1 + config.node_offset,
            config.width,
            height,
        )
        .clamp_inside(viewport);

        let rows_top = bounds.y
            + config.padding
            + details_height(&item.content, &config)
            + SECTION_GAP
            + CONNECTED_LABEL_ROW;
        let connections = related
            .iter()
            .enumerate()
            .map(|(i, rel)| Connection {
                id: rel.id,
                title: rel.title.clone(),
                bounds: Rect::new(
                    bounds.x + config.padding,
                    rows_top + i as f32 * CONNECTION_ROW,
                    bounds.width - config.padding * 2.0,
                    CONNECTION_ROW - CONNECTION_GAP,
                ),
            })
            .collect();

        Self {
            id: item.id,
            title: item.title.clone(),
            date: item.date.clone(),
            content: item.content.clone(),
            status_label: item.status.label(),
            status_palette: Palette::for_status(item.status),
            energy: item.energy,
            energy_fill: energy_fill(item.energy),
            connections,
            bounds,
            config,
        }
    }

    /// Returns true if `(x, y)` lies on the card.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.bounds.contains(x, y)
    }

    /// The related item whose row is under `(x, y)`.
    #[must_use]
    pub fn connection_at(&self, x: f32, y: f32) -> Option<ItemId> {
        self.connections
            .iter()
            .find(|connection| connection.bounds.contains(x, y))
            .map(|connection| connection.id)
    }

    /// Pushes the card's render commands at `z_index`.
    pub fn render(&self, renderer: &mut UIRenderer, z_index: i32) {
        let c = &self.config;
        let left = self.bounds.x + c.padding;
        let right = self.bounds.right() - c.padding;
        let inner_width = self.bounds.width - c.padding * 2.0;
        let mut y = self.bounds.y + c.padding;

        let stem_x = self.bounds.center().0;
        renderer.push(
            z_index,
            RenderCommand::Line {
                from: (stem_x, self.bounds.y - STEM_LENGTH),
                to: (stem_x, self.bounds.y),
                color: c.border,
                width: 1.0,
            },
        );
        renderer.push(
            z_index,
            RenderCommand::Rect {
                bounds: self.bounds,
                color: c.background,
                corner_radius: 6.0,
            },
        );
        renderer.push(
            z_index,
            RenderCommand::RectOutline {
                bounds: self.bounds,
                color: c.border,
                width: 1.0,
                corner_radius: 6.0,
            },
        );

        // Status badge and date share the first row
        let badge_width = self.status_label.len() as f32 * c.char_width + 12.0;
        let badge = Rect::new(left, y, badge_width, 18.0);
        renderer.push(
            z_index,
            RenderCommand::Rect {
                bounds: badge,
                color: self.status_palette.background,
                corner_radius: 3.0,
            },
        );
        renderer.push(
            z_index,
            RenderCommand::RectOutline {
                bounds: badge,
                color: self.status_palette.border,
                width: 1.0,
                corner_radius: 3.0,
            },
        );
        renderer.push(
            z_index,
            text(
                self.status_label.to_uppercase(),
                badge.x + 6.0,
                y + 2.0,
                self.status_palette.text,
                11.0,
            ),
        );
        let date_x = right - self.date.len() as f32 * c.char_width;
        renderer.push(
            z_index,
            text(self.date.clone(), date_x, y + 2.0, Color::WHITE.with_alpha(0.5), 11.0),
        );
        y += BADGE_ROW;

        renderer.push(z_index, text(self.title.clone(), left, y, Color::WHITE, 14.0));
        y += TITLE_ROW;

        renderer.push(z_index, text(self.content.clone(), left, y, c.text, 12.0));
        y += body_lines(&self.content, c) * c.line_height + BODY_GAP;

        let label = Color::WHITE.with_alpha(0.5);
        renderer.push(z_index, text("Progress / Energy".to_owned(), left, y, label, 11.0));
        let percent = format!("{}%", self.energy);
        let percent_x = right - percent.len() as f32 * c.char_width;
        renderer.push(z_index, text(percent, percent_x, y, Color::CYAN, 11.0));
        y += ENERGY_LABEL_ROW;

        let track = Rect::new(left, y, inner_width, ENERGY_BAR_HEIGHT);
        renderer.push(
            z_index,
            RenderCommand::Rect {
                bounds: track,
                color: Color::WHITE.with_alpha(0.1),
                corner_radius: 2.0,
            },
        );
        renderer.push(
            z_index,
            RenderCommand::Rect {
                bounds: Rect::new(track.x, track.y, track.width * self.energy_fill, track.height),
                color: Color::CYAN.lerp(Color::PURPLE, 0.5),
                corner_radius: 2.0,
            },
        );
        y += ENERGY_BAR_HEIGHT;

        if self.connections.is_empty() {
            return;
        }

        y += SECTION_GAP * 0.5;
        renderer.push(
            z_index,
            RenderCommand::Line {
                from: (left, y),
                to: (right, y),
                color: Color::WHITE.with_alpha(0.1),
                width: 1.0,
            },
        );
        y += SECTION_GAP * 0.5;
        renderer.push(z_index, text("CONNECTED".to_owned(), left, y, label, 10.0));

        for connection in &self.connections {
            renderer.push(
                z_index,
                RenderCommand::RectOutline {
                    bounds: connection.bounds,
                    color: Color::WHITE.with_alpha(0.1),
                    width: 1.0,
                    corner_radius: 0.0,
                },
            );
            renderer.push(
                z_index,
                text(
                    format!("{} →", connection.title),
                    connection.bounds.x + 8.0,
                    connection.bounds.y + 4.0,
                    Color::WHITE.with_alpha(0.6),
                    10.0,
                ),
            );
        }
    }
}

/// Fraction of the energy bar to fill.
#[must_use]
pub fn energy_fill(energy: f32) -> f32 {
    if energy.is_finite() {
        (energy / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Height from the badge row down to the bottom of the energy bar.
fn details_height(content: &str, config: &CardConfig) -> f32 {
    BADGE_ROW
        + TITLE_ROW
        + body_lines(content, config) * config.line_height
        + BODY_GAP
        + ENERGY_LABEL_ROW
        + ENERGY_BAR_HEIGHT
}

/// Wrapped line count of `content` at the card's inner width.
fn body_lines(content: &str, config: &CardConfig) -> f32 {
    let text_width = (config.width - config.padding * 2.0).max(config.char_width);
    let chars_per_line = (text_width / config.char_width).floor().max(1.0);
    (content.chars().count() as f32 / chars_per_line).ceil()
}

fn text(content: String, x: f32, y: f32, color: Color, font_size: f32) -> RenderCommand {
    RenderCommand::Text {
        text: content,
        x,
        y,
        color,
        font_size,
        centered: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::orbital::ItemStatus;

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 1280.0, 800.0)
    }

    fn texts(card: &InfoCard) -> Vec<String> {
        let mut renderer = UIRenderer::new();
        card.render(&mut renderer, 300);
        renderer
            .end_frame()
            .iter()
            .flat_map(|batch| batch.commands.iter())
            .filter_map(|cmd| match cmd {
                RenderCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_card_hangs_under_node() {
        let item = TimelineItem::new(1, ItemStatus::InProgress, 60.0, &[]).with_title("Build");
        let card = InfoCard::place(&item, &[], (640.0, 200.0), &viewport(), CardConfig::default());

        assert!((card.bounds.center().0 - 640.0).abs() < 0.01);
        assert!((card.bounds.y - 296.0).abs() < 0.01);
        assert!((card.bounds.width - 288.0).abs() < f32::EPSILON);
        assert_eq!(card.status_label, "in progress");
        assert!((card.energy_fill - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_card_stays_on_screen() {
        let item = TimelineItem::new(1, ItemStatus::Pending, 10.0, &[]);
        let card = InfoCard::place(&item, &[], (1270.0, 780.0), &viewport(), CardConfig::default());

        assert!(card.bounds.right() <= 1280.0);
        assert!(card.bounds.bottom() <= 800.0);
        assert!(card.bounds.x >= 0.0);
    }

    #[test]
    fn test_connections_use_titles() {
        let a = TimelineItem::new(1, ItemStatus::Completed, 100.0, &[2, 3]);
        let b = TimelineItem::new(2, ItemStatus::Completed, 90.0, &[]).with_title("Design");
        let card = InfoCard::place(&a, &[&b], (400.0, 100.0), &viewport(), CardConfig::default());
        assert_eq!(card.connections.len(), 1);
        assert_eq!(card.connections[0].id, ItemId(2));
        assert_eq!(card.connections[0].title, "Design");

        let mut renderer = UIRenderer::new();
        card.render(&mut renderer, 300);
        let batches = renderer.end_frame();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].z_index, 300);
        assert!(texts(&card).contains(&"Design →".to_owned()));
    }

    #[test]
    fn test_connection_rows_are_hit_targets() {
        let a = TimelineItem::new(1, ItemStatus::Completed, 100.0, &[2, 3]);
        let b = TimelineItem::new(2, ItemStatus::Completed, 90.0, &[]).with_title("Design");
        let c = TimelineItem::new(3, ItemStatus::Pending, 20.0, &[]).with_title("Build");
        let related = [&b, &c];
        let card =
            InfoCard::place(&a, &related, (400.0, 100.0), &viewport(), CardConfig::default());

        let rows: Vec<Rect> = card.connections.iter().map(|conn| conn.bounds).collect();
        assert!(rows[0].bottom() <= rows[1].y);
        assert!(rows[1].bottom() <= card.bounds.bottom());

        let (x, y) = rows[1].center();
        assert!(card.contains(x, y));
        assert_eq!(card.connection_at(x, y), Some(ItemId(3)));
        assert_eq!(card.connection_at(rows[0].center().0, rows[0].center().1), Some(ItemId(2)));
        // The header is on the card but not on a row
        assert_eq!(card.connection_at(card.bounds.x + 20.0, card.bounds.y + 20.0), None);
    }

    #[test]
    fn test_energy_value_is_printed() {
        let item = TimelineItem::new(1, ItemStatus::InProgress, 60.0, &[]);
        let card = InfoCard::place(&item, &[], (640.0, 200.0), &viewport(), CardConfig::default());
        let lines = texts(&card);
        assert!(lines.contains(&"Progress / Energy".to_owned()));
        assert!(lines.contains(&"60%".to_owned()));
        assert!(!lines.contains(&"CONNECTED".to_owned()));
    }

    #[test]
    fn test_energy_fill_clamps() {
        assert!((energy_fill(150.0) - 1.0).abs() < f32::EPSILON);
        assert!(energy_fill(-5.0).abs() < f32::EPSILON);
        assert!(energy_fill(f32::NAN).abs() < f32::EPSILON);
    }
}
