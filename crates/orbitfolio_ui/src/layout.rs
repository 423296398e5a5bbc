//! Screen-space geometry.

/// A rectangle in screen coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle of the given size centered on a point.
    #[must_use]
    pub fn from_center(center: (f32, f32), width: f32, height: f32) -> Self {
        Self::new(center.0 - width * 0.5, center.1 - height * 0.5, width, height)
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Returns true if the rect has no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Returns true if the point is inside the rectangle.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Moves the rectangle so it lies inside `bounds`, preferring the
    /// top-left edges when it is larger than `bounds`.
    #[must_use]
    pub fn clamp_inside(&self, bounds: &Self) -> Self {
        let x = self.x.min(bounds.right() - self.width).max(bounds.x);
        let y = self.y.min(bounds.bottom() - self.height).max(bounds.y);
        Self::new(x, y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);

        assert!(rect.contains(50.0, 30.0));
        assert!(!rect.contains(5.0, 30.0));
        assert!(!rect.contains(50.0, 80.0));
    }

    #[test]
    fn test_from_center() {
        let rect = Rect::from_center((50.0, 50.0), 20.0, 10.0);
        assert_eq!(rect, Rect::new(40.0, 45.0, 20.0, 10.0));
        assert_eq!(rect.center(), (50.0, 50.0));
    }

    #[test]
    fn test_clamp_inside_viewport() {
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);

        let overflow_right = Rect::new(700.0, 10.0, 288.0, 100.0).clamp_inside(&viewport);
        assert!((overflow_right.right() - 800.0).abs() < f32::EPSILON);

        let overflow_top_left = Rect::new(-50.0, -20.0, 100.0, 100.0).clamp_inside(&viewport);
        assert_eq!((overflow_top_left.x, overflow_top_left.y), (0.0, 0.0));

        let inside = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert_eq!(inside.clamp_inside(&viewport), inside);
    }

    #[test]
    fn test_empty_rects() {
        assert!(Rect::ZERO.is_empty());
        assert!(Rect::new(5.0, 5.0, 10.0, 0.0).is_empty());
        assert!(!Rect::new(5.0, 5.0, 10.0, 1.0).is_empty());
    }
}
