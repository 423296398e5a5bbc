//! # Configuration
//!
//! All tunables for the interaction layer, loaded once at startup from TOML.
//! Every section is optional; missing sections and fields fall back to the
//! values the portfolio ships with.
//!
//! ```toml
//! [orbital]
//! radius = 220.0
//! rotation_step = 0.15
//! reference_angle = 270.0
//!
//! [tilt]
//! max_tilt = 20.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{UiError, UiResult};

/// Orbital timeline tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitalConfig {
    /// Ring radius in pixels.
    pub radius: f64,
    /// Degrees of rotation per frame while auto-rotating.
    pub rotation_step: f64,
    /// Angle (degrees) a selected item is rotated to. 270 is the top of the
    /// ring in screen space.
    pub reference_angle: f64,
    /// Hit radius of a node in pixels.
    pub node_radius: f64,
}

impl OrbitalConfig {
    /// Default ring radius.
    pub const DEFAULT_RADIUS: f64 = 220.0;
    /// Default per-frame rotation.
    pub const DEFAULT_ROTATION_STEP: f64 = 0.15;
    /// Default centering angle.
    pub const DEFAULT_REFERENCE_ANGLE: f64 = 270.0;
    /// Default node hit radius (nodes are 40px circles).
    pub const DEFAULT_NODE_RADIUS: f64 = 20.0;

    fn validate(&self) -> UiResult<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(UiError::InvalidConfig(format!(
                "orbital.radius must be positive, got {}",
                self.radius
            )));
        }
        if !self.rotation_step.is_finite() {
            return Err(UiError::InvalidConfig(
                "orbital.rotation_step must be finite".to_string(),
            ));
        }
        if !(0.0..360.0).contains(&self.reference_angle) {
            return Err(UiError::InvalidConfig(format!(
                "orbital.reference_angle must be in [0, 360), got {}",
                self.reference_angle
            )));
        }
        if !self.node_radius.is_finite() || self.node_radius < 0.0 {
            return Err(UiError::InvalidConfig(format!(
                "orbital.node_radius must be non-negative, got {}",
                self.node_radius
            )));
        }
        Ok(())
    }
}

impl Default for OrbitalConfig {
    fn default() -> Self {
        Self {
            radius: Self::DEFAULT_RADIUS,
            rotation_step: Self::DEFAULT_ROTATION_STEP,
            reference_angle: Self::DEFAULT_REFERENCE_ANGLE,
            node_radius: Self::DEFAULT_NODE_RADIUS,
        }
    }
}

/// Tilt card tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    /// Maximum rotation on either axis, degrees.
    pub max_tilt: f32,
    /// Scale applied while hovered.
    pub scale: f32,
    /// CSS perspective distance in pixels.
    pub perspective: f32,
    /// Transition time in milliseconds.
    pub speed_ms: u32,
    /// Track a glare highlight under the pointer.
    pub glare: bool,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_tilt: 15.0,
            scale: 1.02,
            perspective: 1000.0,
            speed_ms: 400,
            glare: true,
        }
    }
}

/// Magnetic button tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagneticConfig {
    /// Fraction of the pointer offset applied at the element center.
    pub strength: f32,
    /// Pull radius in pixels.
    pub radius: f32,
}

impl Default for MagneticConfig {
    fn default() -> Self {
        Self {
            strength: 0.3,
            radius: 150.0,
        }
    }
}

/// Custom cursor tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Spring stiffness for the ring.
    pub stiffness: f32,
    /// Spring damping for the ring.
    pub damping: f32,
    /// Spring mass for the ring.
    pub mass: f32,
    /// Ring diameter at rest.
    pub ring_size: f32,
    /// Ring diameter over an interactive target.
    pub ring_hover_size: f32,
    /// Number of trail segments.
    pub trail_length: usize,
    /// Per-segment trail delay in seconds.
    pub trail_delay: f32,
    /// Trail tween duration in seconds.
    pub trail_duration: f32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            stiffness: 400.0,
            damping: 25.0,
            mass: 1.0,
            ring_size: 40.0,
            ring_hover_size: 60.0,
            trail_length: 5,
            trail_delay: 0.05,
            trail_duration: 0.3,
        }
    }
}

/// Scroll reveal tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Start offset of a single reveal, pixels.
    pub offset: f32,
    /// Duration of a single reveal, seconds.
    pub duration: f32,
    /// Viewport fraction the element top must cross.
    pub trigger: f32,
    /// Start offset of staggered children, pixels.
    pub stagger_offset: f32,
    /// Delay between staggered children, seconds.
    pub stagger: f32,
    /// Duration of each staggered child, seconds.
    pub stagger_duration: f32,
    /// Viewport fraction the stagger container top must cross.
    pub stagger_trigger: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            offset: 60.0,
            duration: 0.8,
            trigger: 0.85,
            stagger_offset: 40.0,
            stagger: 0.1,
            stagger_duration: 0.6,
            stagger_trigger: 0.8,
        }
    }
}

/// Complete configuration for the interaction layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Orbital timeline.
    pub orbital: OrbitalConfig,
    /// Tilt cards.
    pub tilt: TiltConfig,
    /// Magnetic buttons.
    pub magnetic: MagneticConfig,
    /// Custom cursor.
    pub cursor: CursorConfig,
    /// Scroll reveals.
    pub reveal: RevealConfig,
}

impl UiConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not parse or a value is out of range.
    pub fn from_toml_str(source: &str) -> UiResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn load(path: impl AsRef<Path>) -> UiResult<Self> {
        let source = read_file(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// Checks every section for out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> UiResult<()> {
        self.orbital.validate()?;

        let (tilt, magnetic) = (&self.tilt, &self.magnetic);
        let (cursor, reveal) = (&self.cursor, &self.reveal);

        for (field, value) in [
            ("tilt.perspective", tilt.perspective),
            ("magnetic.radius", magnetic.radius),
            ("cursor.mass", cursor.mass),
        ] {
            check(field, value, is_positive, "positive")?;
        }

        for (field, value) in [
            ("tilt.max_tilt", tilt.max_tilt),
            ("tilt.scale", tilt.scale),
            ("cursor.stiffness", cursor.stiffness),
            ("cursor.damping", cursor.damping),
            ("cursor.ring_size", cursor.ring_size),
            ("cursor.ring_hover_size", cursor.ring_hover_size),
            ("cursor.trail_delay", cursor.trail_delay),
            ("cursor.trail_duration", cursor.trail_duration),
            ("reveal.offset", reveal.offset),
            ("reveal.duration", reveal.duration),
            ("reveal.stagger_offset", reveal.stagger_offset),
            ("reveal.stagger", reveal.stagger),
            ("reveal.stagger_duration", reveal.stagger_duration),
        ] {
            check(field, value, is_positive_or_zero, "finite and >= 0")?;
        }

        check("magnetic.strength", magnetic.strength, f32::is_finite, "finite")?;

        for (field, value) in [
            ("reveal.trigger", reveal.trigger),
            ("reveal.stagger_trigger", reveal.stagger_trigger),
        ] {
            check(field, value, |v| (0.0..=1.0).contains(&v), "a viewport fraction in [0, 1]")?;
        }
        Ok(())
    }
}

fn check(field: &str, value: f32, valid: impl Fn(f32) -> bool, expected: &str) -> UiResult<()> {
    if valid(value) {
        Ok(())
    } else {
        Err(UiError::InvalidConfig(format!("{field} must be {expected}, got {value}")))
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn is_positive_or_zero(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

/// Reads a whole file, attaching the path to the error.
pub(crate) fn read_file(path: &Path) -> UiResult<String> {
    std::fs::read_to_string(path).map_err(|source| UiError::Io {
        path: path.to_path_buf(),
        source,
    })
}
