//! Styling for the neon-on-black portfolio look.
//!
//! Black surfaces, white strokes, cyan/purple/magenta accents.

use crate::widget::ItemStatus;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Neon cyan, `hsl(190 100% 50%)`.
    pub const CYAN: Self = Self::rgba(0.0, 0.833, 1.0, 1.0);
    /// Neon purple, `rgb(180 0 255)`.
    pub const PURPLE: Self = Self::rgba(0.706, 0.0, 1.0, 1.0);
    /// Neon magenta, `rgb(255 0 128)`.
    pub const MAGENTA: Self = Self::rgba(1.0, 0.0, 0.502, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Returns the color with its alpha multiplied by `factor`.
    #[must_use]
    pub fn fade(self, factor: f32) -> Self {
        self.with_alpha(self.a * factor.clamp(0.0, 1.0))
    }

    /// Linearly interpolates between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Accent used for glows on cards and skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accent {
    /// Cyan glow.
    #[default]
    Cyan,
    /// Purple glow.
    Purple,
    /// Magenta glow.
    Magenta,
}

impl Accent {
    /// Solid accent color.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Cyan => Color::CYAN,
            Self::Purple => Color::PURPLE,
            Self::Magenta => Color::MAGENTA,
        }
    }

    /// Glow color at rest and while hovered.
    #[must_use]
    pub const fn glow(self, hovered: bool) -> Color {
        let alpha = if hovered { 0.4 } else { 0.3 };
        self.color().with_alpha(alpha)
    }
}

/// Stroke/fill/text triple for a badge or node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Text or icon color.
    pub text: Color,
    /// Fill color.
    pub background: Color,
    /// Border color.
    pub border: Color,
}

impl Palette {
    /// Badge colors for an item status.
    #[must_use]
    pub const fn for_status(status: ItemStatus) -> Self {
        match status {
            ItemStatus::Completed => Self {
                text: Color::WHITE,
                background: Color::BLACK,
                border: Color::WHITE,
            },
            ItemStatus::InProgress => Self {
                text: Color::BLACK,
                background: Color::WHITE,
                border: Color::BLACK,
            },
            ItemStatus::Pending => Self {
                text: Color::WHITE,
                background: Color::BLACK.with_alpha(0.4),
                border: Color::WHITE.with_alpha(0.5),
            },
        }
    }
}

/// Node colors for the orbital timeline.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Selected node.
    pub active: Palette,
    /// Node related to the selected one.
    pub related: Palette,
    /// Any other node.
    pub idle: Palette,
    /// Orbit path stroke.
    pub orbit: Color,
    /// Central orb gradient stops.
    pub orb: [Color; 3],
    /// Energy aura center color.
    pub aura: Color,
    /// Node label color when expanded.
    pub label_active: Color,
    /// Node label color otherwise.
    pub label_idle: Color,
}

impl Theme {
    /// The portfolio's black/white/neon theme.
    pub const NEON: Self = Self {
        active: Palette {
            text: Color::BLACK,
            background: Color::WHITE,
            border: Color::WHITE,
        },
        related: Palette {
            text: Color::BLACK,
            background: Color::WHITE.with_alpha(0.5),
            border: Color::WHITE,
        },
        idle: Palette {
            text: Color::WHITE,
            background: Color::BLACK,
            border: Color::WHITE.with_alpha(0.4),
        },
        orbit: Color::WHITE.with_alpha(0.05),
        orb: [Color::CYAN, Color::PURPLE, Color::MAGENTA],
        aura: Color::WHITE.with_alpha(0.1),
        label_active: Color::WHITE,
        label_idle: Color::WHITE.with_alpha(0.3),
    };
}

impl Default for Theme {
    fn default() -> Self {
        Self::NEON
    }
}
