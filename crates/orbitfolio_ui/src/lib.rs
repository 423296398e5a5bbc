//! # ORBITFOLIO UI System
//!
//! Headless interaction layer for an animated single-page portfolio:
//! - Radial orbital timeline (rotation, depth, selection, info card)
//! - Mouse tilt and glare cards, magnetic buttons
//! - Spring-smoothed custom cursor with a trail
//! - Scroll reveal, stagger and parallax progress
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                     UI PIPELINE                        │
//! ├────────────────────────────────────────────────────────┤
//! │  Host Events → InputState → Widgets → Render Commands  │
//! │       ↓            ↓           ↓            ↓          │
//! │  FrameSource   Hit Testing  Animation   Z-Batching     │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here paints pixels or reads the wall clock. The host feeds frames
//! and pointer events in and draws the batches that come out.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod layout;
pub mod render;
pub mod style;
pub mod widget;

pub use animation::{Animation, Easing, Spring, SpringParams};
pub use clock::{ChannelClock, FrameSource, FrameStamp, FrameTimer, ManualClock};
pub use config::UiConfig;
pub use error::{UiError, UiResult};
pub use input::{InputState, Key, MouseButton};
pub use layout::Rect;
pub use render::{NodeInstance, RenderCommand, UIBatch, UIRenderer};
pub use style::{Color, Theme};
pub use widget::{
    ItemId, ItemStatus, OrbitalLayoutEngine, OrbitalState, TimelineData, TimelineItem,
    TimelineWidget, Widget, WidgetId,
};
