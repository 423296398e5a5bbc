//! # Orbital Layout Engine
//!
//! Arranges timeline items on a rotating ring and owns the selection state
//! machine behind the radial timeline.
//!
//! ```text
//!                270° (reference: selected item lands here)
//!                      ●
//!             ●                 ●
//!   180° ●         ( orb )         ● 0°      x = R·cos(θ)
//!             ●                 ●            y = R·sin(θ)   (y grows down)
//!                      ●
//!                     90°
//! ```
//!
//! The "3D" look is two independent 2D tricks: `cos(θ)` decides stacking,
//! `sin(θ)` decides opacity.
//!
//! ## State machine
//!
//! ```text
//!              select(id)                     select(other)
//!   ROTATING ─────────────────► SELECTED(id) ──────────────► SELECTED(other)
//!      ▲                           │
//!      └── select(id) / clear() ───┘
//! ```
//!
//! Selecting always pauses rotation and recenters the ring; clearing always
//! resumes rotation from wherever the ring is.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clock::{FrameSource, FrameStamp};
use crate::config::{read_file, OrbitalConfig};
use crate::error::{UiError, UiResult};

/// Identifier of a timeline item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl ItemId {
    /// Creates a new item ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Progress of a timeline item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemStatus {
    /// Done.
    Completed,
    /// Underway.
    InProgress,
    /// Not started.
    Pending,
}

impl ItemStatus {
    /// Badge text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::InProgress => "in progress",
            Self::Pending => "pending",
        }
    }
}

/// One entry on the ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    /// Unique identifier.
    pub id: ItemId,
    /// Short title shown under the node.
    #[serde(default)]
    pub title: String,
    /// Free-form date text.
    #[serde(default)]
    pub date: String,
    /// Body text of the info card.
    #[serde(default)]
    pub content: String,
    /// Grouping label.
    #[serde(default)]
    pub category: String,
    /// Items this one links to. Not necessarily reciprocal.
    #[serde(default)]
    pub related_ids: Vec<ItemId>,
    /// Progress.
    pub status: ItemStatus,
    /// Emphasis in [0, 100]. Not validated.
    #[serde(default)]
    pub energy: f32,
}

impl TimelineItem {
    /// Creates an item with empty display text.
    #[must_use]
    pub fn new(id: u32, status: ItemStatus, energy: f32, related_ids: &[u32]) -> Self {
        Self {
            id: ItemId(id),
            title: String::new(),
            date: String::new(),
            content: String::new(),
            category: String::new(),
            related_ids: related_ids.iter().copied().map(ItemId).collect(),
            status,
            energy,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// A timeline document: `[[items]]` tables in TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineData {
    /// Items in ring order.
    #[serde(default)]
    pub items: Vec<TimelineItem>,
}

impl TimelineData {
    /// Parses a timeline document and rejects duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed TOML or a repeated id.
    pub fn from_toml_str(source: &str) -> UiResult<Self> {
        let data: Self = toml::from_str(source)?;

        let mut seen = BTreeSet::new();
        for item in &data.items {
            if !seen.insert(item.id) {
                return Err(UiError::DuplicateItemId(item.id.0));
            }
        }

        tracing::info!(items = data.items.len(), "timeline loaded");
        Ok(data)
    }

    /// Loads a timeline document from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn load(path: impl AsRef<Path>) -> UiResult<Self> {
        let source = read_file(path.as_ref())?;
        Self::from_toml_str(&source)
    }
}

/// Wraps any angle in degrees into [0, 360). Non-finite input maps to 0.
#[must_use]
pub fn normalize_angle(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Stacking key of a node: strict total order, front-most is greatest.
///
/// Ordered by `cos(θ)`; nodes with equal cosine (mirror images across the
/// horizontal axis) are ordered by index, lower index in front.
#[derive(Debug, Clone, Copy)]
pub struct DepthOrder {
    /// `cos(θ)`, 1 is nearest the viewer.
    pub key: f64,
    /// Position of the item in the input sequence.
    pub index: usize,
}

impl DepthOrder {
    /// Depth rescaled to [0, 1], 1 = front.
    #[must_use]
    pub fn normalized(&self) -> f64 {
        (self.key + 1.0) * 0.5
    }
}

impl Ord for DepthOrder {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .total_cmp(&other.key)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for DepthOrder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for DepthOrder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DepthOrder {}

/// Where one item sits this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePosition {
    /// Index of the item in the input sequence.
    pub index: usize,
    /// Angle on the ring in degrees, [0, 360).
    pub angle: f64,
    /// Offset from the ring center, pixels.
    pub x: f64,
    /// Offset from the ring center, pixels (y grows down).
    pub y: f64,
    /// Strict stacking order.
    pub depth: DepthOrder,
    /// CSS-style z-index, `round(100 + 50·cos θ)`. May tie; use `depth` to sort.
    pub z_index: i32,
    /// Opacity in [0.4, 1].
    pub opacity: f64,
}

/// Minimum node opacity (back of the ring).
pub const OPACITY_FLOOR: f64 = 0.4;
/// Base z-index of ring nodes.
pub const Z_BASE: f64 = 100.0;
/// Z-index swing of ring nodes.
pub const Z_SWING: f64 = 50.0;

/// Places item `index` of `total` on a ring of `radius` rotated by
/// `rotation_angle` degrees.
///
/// Returns `None` for an empty ring or an out-of-range index.
#[must_use]
pub fn compute_position(
    index: usize,
    total: usize,
    rotation_angle: f64,
    radius: f64,
) -> Option<NodePosition> {
    if total == 0 || index >= total {
        return None;
    }

    let angle = normalize_angle((index as f64 / total as f64) * 360.0 + rotation_angle);
    let radians = angle.to_radians();
    let (sin, cos) = radians.sin_cos();

    let lit = (1.0 + sin) / 2.0;
    let opacity = (OPACITY_FLOOR + (1.0 - OPACITY_FLOOR) * lit).clamp(OPACITY_FLOOR, 1.0);

    Some(NodePosition {
        index,
        angle,
        x: radius * cos,
        y: radius * sin,
        depth: DepthOrder { key: cos, index },
        z_index: (Z_BASE + Z_SWING * cos).round() as i32,
        opacity,
    })
}

/// Positions of every item for one frame.
#[derive(Debug, Clone, Default)]
pub struct OrbitalLayout {
    /// Node positions in item order.
    pub nodes: Vec<NodePosition>,
}

impl OrbitalLayout {
    /// Returns true for an empty ring.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Item indices in paint order: back first, front last.
    #[must_use]
    pub fn paint_order(&self) -> Vec<usize> {
        let mut order: Vec<&NodePosition> = self.nodes.iter().collect();
        order.sort_by(|a, b| a.depth.cmp(&b.depth));
        order.into_iter().map(|node| node.index).collect()
    }
}

/// Interaction state owned by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalState {
    rotation_angle: f64,
    auto_rotate: bool,
    active_item: Option<ItemId>,
    highlighted: BTreeSet<ItemId>,
}

impl OrbitalState {
    /// Current ring rotation in degrees, [0, 360).
    #[must_use]
    pub fn rotation_angle(&self) -> f64 {
        self.rotation_angle
    }

    /// True while the ring spins on its own.
    #[must_use]
    pub fn is_auto_rotating(&self) -> bool {
        self.auto_rotate
    }

    /// The selected item, if any.
    #[must_use]
    pub fn active_item(&self) -> Option<ItemId> {
        self.active_item
    }

    /// Ids emphasized because the selected item lists them.
    #[must_use]
    pub fn highlighted(&self) -> &BTreeSet<ItemId> {
        &self.highlighted
    }
}

impl Default for OrbitalState {
    fn default() -> Self {
        Self {
            rotation_angle: 0.0,
            auto_rotate: true,
            active_item: None,
            highlighted: BTreeSet::new(),
        }
    }
}

/// Layout and interaction engine for one radial timeline.
#[derive(Debug, Clone)]
pub struct OrbitalLayoutEngine {
    items: Vec<TimelineItem>,
    config: OrbitalConfig,
    state: OrbitalState,
    /// Rotation when auto-rotation last (re)started.
    base_angle: f64,
    /// Ticks applied since `base_angle` was set. Angle = base + steps·step,
    /// so rotation never accumulates floating point error.
    steps: u64,
    /// Newest frame index already applied.
    last_frame: Option<u64>,
}

impl OrbitalLayoutEngine {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new(items: Vec<TimelineItem>) -> Self {
        Self::with_config(items, OrbitalConfig::default())
    }

    /// Creates an engine with a custom configuration.
    #[must_use]
    pub fn with_config(items: Vec<TimelineItem>, config: OrbitalConfig) -> Self {
        for item in &items {
            for related in &item.related_ids {
                if !items.iter().any(|other| other.id == *related) {
                    tracing::warn!(
                        item = item.id.0,
                        related = related.0,
                        "related id not on the ring"
                    );
                }
            }
        }

        Self {
            items,
            config,
            state: OrbitalState::default(),
            base_angle: 0.0,
            steps: 0,
            last_frame: None,
        }
    }

    /// Items in ring order.
    #[must_use]
    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &OrbitalConfig {
        &self.config
    }

    /// Current interaction state.
    #[must_use]
    pub fn state(&self) -> &OrbitalState {
        &self.state
    }

    /// Current ring rotation in degrees.
    #[must_use]
    pub fn rotation_angle(&self) -> f64 {
        self.state.rotation_angle
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&TimelineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Position of an id in the ring.
    #[must_use]
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Items that `id` lists as related, in its order. Unknown ids are skipped.
    #[must_use]
    pub fn related_items(&self, id: ItemId) -> Vec<&TimelineItem> {
        self.item(id)
            .map(|item| item.related_ids.iter().filter_map(|rel| self.item(*rel)).collect())
            .unwrap_or_default()
    }

    /// True if `id` is the selected item.
    #[must_use]
    pub fn is_active(&self, id: ItemId) -> bool {
        self.state.active_item == Some(id)
    }

    /// True if the selected item lists `id` as related.
    #[must_use]
    pub fn is_related_to_active(&self, id: ItemId) -> bool {
        self.state.highlighted.contains(&id)
    }

    /// Position of item `index` at the current rotation.
    #[must_use]
    pub fn compute_position(&self, index: usize) -> Option<NodePosition> {
        compute_position(index, self.items.len(), self.state.rotation_angle, self.config.radius)
    }

    /// Positions of every item at the current rotation.
    #[must_use]
    pub fn layout(&self) -> OrbitalLayout {
        let total = self.items.len();
        OrbitalLayout {
            nodes: (0..total)
                .filter_map(|index| {
                    compute_position(index, total, self.state.rotation_angle, self.config.radius)
                })
                .collect(),
        }
    }

    /// Advances auto-rotation by one step. No effect while an item is selected.
    ///
    /// Returns the rotation angle after the call.
    pub fn tick(&mut self) -> f64 {
        if self.state.auto_rotate {
            self.steps += 1;
            self.state.rotation_angle =
                normalize_angle(self.base_angle + self.steps as f64 * self.config.rotation_step);
        }
        self.state.rotation_angle
    }

    /// Applies one host frame.
    ///
    /// A frame index at or below one already applied is ignored, so replaying
    /// a frame is harmless. Gaps between frames still advance a single step:
    /// time spent in a background tab is skipped, not caught up.
    pub fn advance(&mut self, frame: FrameStamp) -> f64 {
        if self.last_frame.is_some_and(|last| frame.index <= last) {
            return self.state.rotation_angle;
        }
        self.last_frame = Some(frame.index);
        self.tick()
    }

    /// Drains `source` and applies only its newest frame.
    pub fn pump(&mut self, source: &mut impl FrameSource) -> f64 {
        match source.latest_frame() {
            Some(frame) => self.advance(frame),
            None => self.state.rotation_angle,
        }
    }

    /// Toggles selection of `id`.
    ///
    /// Selecting a new item pauses rotation, highlights its related ids and
    /// rotates the ring so the item sits at the reference angle. Selecting
    /// the active item again clears the selection. Unknown ids are ignored.
    pub fn select_item(&mut self, id: ItemId) -> &OrbitalState {
        if self.state.active_item == Some(id) {
            return self.clear_selection();
        }

        let Some(index) = self.index_of(id) else {
            tracing::debug!(item = id.0, "ignoring selection of unknown item");
            return &self.state;
        };

        let total = self.items.len();
        let target = (index as f64 / total as f64) * 360.0;
        let rotation = normalize_angle(self.config.reference_angle - target);

        self.state.active_item = Some(id);
        self.state.auto_rotate = false;
        self.state.highlighted = self.items[index].related_ids.iter().copied().collect();
        self.restart_rotation_at(rotation);

        tracing::debug!(
            item = id.0,
            rotation,
            related = self.state.highlighted.len(),
            "timeline item selected"
        );
        &self.state
    }

    /// Clears any selection and resumes rotation from the current angle.
    pub fn clear_selection(&mut self) -> &OrbitalState {
        if let Some(previous) = self.state.active_item.take() {
            tracing::debug!(item = previous.0, "timeline selection cleared");
        }
        self.state.highlighted.clear();
        self.state.auto_rotate = true;
        self.restart_rotation_at(self.state.rotation_angle);
        &self.state
    }

    fn restart_rotation_at(&mut self, angle: f64) {
        self.base_angle = angle;
        self.steps = 0;
        self.state.rotation_angle = angle;
    }
}
