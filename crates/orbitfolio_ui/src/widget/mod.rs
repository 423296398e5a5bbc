//! Widgets for the interactive portfolio.
//!
//! The radial timeline is the centerpiece; the rest are the pointer and
//! scroll effects around it.

pub mod card;
mod core;
pub mod cursor;
pub mod magnetic;
pub mod orbital;
pub mod reveal;
pub mod tilt;
pub mod timeline;

pub use card::{energy_fill, CardConfig, Connection, InfoCard};
pub use core::{FrameContext, Widget, WidgetFlags, WidgetId, WidgetResponse, WidgetState};
pub use cursor::{CustomCursor, TrailSegment};
pub use magnetic::{magnetic_offset, MagneticButton};
pub use orbital::{
    compute_position, normalize_angle, DepthOrder, ItemId, ItemStatus, NodePosition, OrbitalLayout,
    OrbitalLayoutEngine, OrbitalState, TimelineData, TimelineItem,
};
pub use reveal::{
    crossed_trigger, parallax_offset, parallax_progress, Reveal, RevealDirection, StaggerGroup,
};
pub use tilt::{tilt_for_pointer, Glare, TiltCard, TiltTransform};
pub use timeline::{aura_diameter, NodeVisual, TimelineWidget};
