//! Backend-agnostic render output.
//!
//! Widgets push [`RenderCommand`]s tagged with a z-index. At the end of the
//! frame the renderer sorts them back-to-front and groups equal z-indices
//! into batches. Whoever paints (canvas, DOM, wgpu) consumes the batches.

use crate::layout::Rect;
use crate::style::Color;

/// A render command.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Filled rectangle.
    Rect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
        /// Corner radius.
        corner_radius: f32,
    },
    /// Rectangle outline.
    RectOutline {
        /// Bounds.
        bounds: Rect,
        /// Stroke color.
        color: Color,
        /// Line width.
        width: f32,
        /// Corner radius.
        corner_radius: f32,
    },
    /// Circle with optional fill and stroke.
    Circle {
        /// Center point.
        center: (f32, f32),
        /// Radius.
        radius: f32,
        /// Fill color (transparent for none).
        fill: Color,
        /// Stroke color (transparent for none).
        stroke: Color,
        /// Stroke width.
        stroke_width: f32,
    },
    /// Radial gradient fading from `color` at the center to transparent at
    /// 70% of the radius.
    RadialGlow {
        /// Center point.
        center: (f32, f32),
        /// Outer radius.
        radius: f32,
        /// Center color.
        color: Color,
        /// Pulse animation requested.
        pulse: bool,
    },
    /// Straight line.
    Line {
        /// Start point.
        from: (f32, f32),
        /// End point.
        to: (f32, f32),
        /// Stroke color.
        color: Color,
        /// Line width.
        width: f32,
    },
    /// Text, horizontally centered on `x` when `centered` is set.
    Text {
        /// Text content.
        text: String,
        /// X position.
        x: f32,
        /// Y position.
        y: f32,
        /// Text color.
        color: Color,
        /// Font size.
        font_size: f32,
        /// Center on x.
        centered: bool,
    },
}

/// A run of commands sharing a z-index.
#[derive(Debug, Clone)]
pub struct UIBatch {
    /// Commands in this batch, in submission order.
    pub commands: Vec<RenderCommand>,
    /// Z-index of every command in the batch.
    pub z_index: i32,
}

/// Collects commands for a frame and batches them by depth.
pub struct UIRenderer {
    /// All commands from the frame with their z-index.
    commands: Vec<(i32, RenderCommand)>,
    /// Final batches for rendering.
    batches: Vec<UIBatch>,
}

impl UIRenderer {
    /// Creates a new UI renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(256),
            batches: Vec::with_capacity(32),
        }
    }

    /// Begins a new frame.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.batches.clear();
    }

    /// Adds a render command at a z-index.
    pub fn push(&mut self, z_index: i32, command: RenderCommand) {
        self.commands.push((z_index, command));
    }

    /// Returns the number of commands submitted this frame.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Ends the frame and returns batches in paint order (lowest z first).
    ///
    /// Sorting is stable: commands with equal z keep their submission order.
    pub fn end_frame(&mut self) -> &[UIBatch] {
        self.commands.sort_by_key(|(z, _)| *z);
        self.batches.clear();

        for (z_index, command) in self.commands.drain(..) {
            match self.batches.last_mut() {
                Some(batch) if batch.z_index == z_index => batch.commands.push(command),
                _ => self.batches.push(UIBatch {
                    commands: vec![command],
                    z_index,
                }),
            }
        }

        &self.batches
    }
}

impl Default for UIRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-node instance record for GPU instanced drawing of timeline nodes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct NodeInstance {
    /// Center (x, y) in screen space.
    pub position: [f32; 2],
    /// Node radius.
    pub radius: f32,
    /// Scale multiplier (1.5 when expanded).
    pub scale: f32,
    /// Opacity (0-1).
    pub opacity: f32,
    /// Normalized depth in [0, 1], 1 = front.
    pub depth: f32,
    /// Fill color (RGBA).
    pub color: [f32; 4],
}

impl NodeInstance {
    /// Creates a new instance record.
    #[must_use]
    pub const fn new(
        position: [f32; 2],
        radius: f32,
        scale: f32,
        opacity: f32,
        depth: f32,
        color: [f32; 4],
    ) -> Self {
        Self {
            position,
            radius,
            scale,
            opacity,
            depth,
            color,
        }
    }

    /// Views a slice of instances as raw bytes for upload.
    #[must_use]
    pub fn as_bytes(instances: &[Self]) -> &[u8] {
        bytemuck::cast_slice(instances)
    }
}
