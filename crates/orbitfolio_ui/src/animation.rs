//! Animation primitives: easing curves, tweens and springs.
//!
//! Everything advances by an explicit `dt` in seconds. Nothing here knows
//! what time it is.

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Quadratic ease-out (`power1.out`).
    Power1Out,
    /// Cubic ease-out (`power2.out`). Cursor trail.
    #[default]
    Power2Out,
    /// Quartic ease-out (`power3.out`). Scroll reveals.
    Power3Out,
    /// CSS `cubic-bezier(x1, y1, x2, y2)`.
    CubicBezier(f32, f32, f32, f32),
    /// Instant (no animation).
    Instant,
}

impl Easing {
    /// The curve tilt cards use to settle: `cubic-bezier(0.03, 0.98, 0.52, 0.99)`.
    pub const TILT: Self = Self::CubicBezier(0.03, 0.98, 0.52, 0.99);

    /// Applies the easing function to a t value (0-1).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::Power1Out => 1.0 - (1.0 - t).powi(2),
            Self::Power2Out => 1.0 - (1.0 - t).powi(3),
            Self::Power3Out => 1.0 - (1.0 - t).powi(4),
            Self::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
            Self::Instant => 1.0,
        }
    }
}

/// Evaluates a CSS cubic bezier timing curve at progress `x`.
///
/// Solves bezier_x(s) = x for s with Newton's method, falling back to
/// bisection when the slope flattens, then returns bezier_y(s).
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    // B(s) = 3(1-s)^2 s p1 + 3(1-s) s^2 p2 + s^3
    let sample = |p1: f32, p2: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
    };
    let slope = |p1: f32, p2: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
    };

    let mut s = x;
    for _ in 0..8 {
        let err = sample(x1, x2, s) - x;
        if err.abs() < 1e-6 {
            return sample(y1, y2, s);
        }
        let d = slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s = (s - err / d).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..32 {
        let value = sample(x1, x2, s);
        if (value - x).abs() < 1e-6 {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    sample(y1, y2, s)
}

/// A single tweened value.
#[derive(Debug, Clone)]
pub struct Animation {
    /// Current value.
    current: f32,
    /// Target value.
    target: f32,
    /// Start value (for interpolation).
    start: f32,
    /// Seconds elapsed since the tween was (re)started, delay included.
    elapsed: f32,
    /// Duration (seconds).
    duration: f32,
    /// Seconds to hold at the start value before moving.
    delay: f32,
    /// Easing function.
    easing: Easing,
    /// A retarget is in flight.
    running: bool,
}

impl Animation {
    /// Default animation duration.
    pub const DEFAULT_DURATION: f32 = 0.3;

    /// Creates a settled animation at the given value.
    #[must_use]
    pub fn new(value: f32, easing: Easing) -> Self {
        Self {
            current: value,
            target: value,
            start: value,
            elapsed: 0.0,
            duration: Self::DEFAULT_DURATION,
            delay: 0.0,
            easing,
            running: false,
        }
    }

    /// Creates an animation with custom duration.
    #[must_use]
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    /// Creates an animation that waits `delay` seconds after each retarget.
    #[must_use]
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Returns the value being animated towards.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Returns true if the animation is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.running
    }

    /// Sets a new target value, starting animation from current value.
    ///
    /// The delay is paid once per motion: retargeting a tween that is already
    /// in flight keeps the time it has waited.
    pub fn set_target(&mut self, target: f32) {
        if (target - self.target).abs() > 0.0001 {
            self.start = self.current;
            self.target = target;
            self.elapsed = if self.running {
                self.elapsed.min(self.delay)
            } else {
                0.0
            };
            self.running = true;
        }
    }

    /// Immediately sets the value without animation.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.start = value;
        self.running = false;
    }

    /// Updates the animation.
    ///
    /// `dt` is delta time in seconds.
    pub fn update(&mut self, dt: f32) {
        if self.is_complete() {
            return;
        }

        self.elapsed += dt.max(0.0);
        let active = self.elapsed - self.delay;
        if active <= 0.0 {
            return;
        }

        let progress = if self.duration > 0.0 {
            (active / self.duration).min(1.0)
        } else {
            1.0
        };

        let eased = self.easing.apply(progress);
        self.current = self.start + (self.target - self.start) * eased;

        // Snap to target when complete
        if progress >= 1.0 {
            self.current = self.target;
            self.running = false;
        }
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(0.0, Easing::default())
    }
}

/// Animated 2D vector.
#[derive(Debug, Clone)]
pub struct Animation2D {
    /// X component animation.
    pub x: Animation,
    /// Y component animation.
    pub y: Animation,
}

impl Animation2D {
    /// Creates a new 2D animation.
    #[must_use]
    pub fn new(x: f32, y: f32, easing: Easing) -> Self {
        Self {
            x: Animation::new(x, easing),
            y: Animation::new(y, easing),
        }
    }

    /// Sets duration and delay on both axes.
    #[must_use]
    pub fn with_timing(self, duration: f32, delay: f32) -> Self {
        Self {
            x: self.x.with_duration(duration).with_delay(delay),
            y: self.y.with_duration(duration).with_delay(delay),
        }
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> (f32, f32) {
        (self.x.value(), self.y.value())
    }

    /// Sets a new target.
    pub fn set_target(&mut self, x: f32, y: f32) {
        self.x.set_target(x);
        self.y.set_target(y);
    }

    /// Jumps both axes to a value.
    pub fn set_immediate(&mut self, x: f32, y: f32) {
        self.x.set_immediate(x);
        self.y.set_immediate(y);
    }

    /// Updates the animation.
    pub fn update(&mut self, dt: f32) {
        self.x.update(dt);
        self.y.update(dt);
    }

    /// Returns true if both animations are complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.x.is_complete() && self.y.is_complete()
    }
}

/// Spring parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    /// Stiffness (k).
    pub stiffness: f32,
    /// Damping (c).
    pub damping: f32,
    /// Mass (m).
    pub mass: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 400.0,
            damping: 25.0,
            mass: 1.0,
        }
    }
}

/// A damped spring chasing a target value.
#[derive(Debug, Clone)]
pub struct Spring {
    value: f32,
    velocity: f32,
    target: f32,
    params: SpringParams,
}

impl Spring {
    /// Largest integration step. Keeps stiff springs stable at low frame rates.
    const MAX_STEP: f32 = 1.0 / 120.0;
    /// Distance below which a slow spring snaps to rest.
    const REST_DELTA: f32 = 0.01;
    /// Speed below which a close spring snaps to rest.
    const REST_SPEED: f32 = 0.01;
    /// Most simulated time per update. Longer gaps are cut to this.
    const MAX_UPDATE: f32 = 2.0;

    /// Creates a spring at rest on `value`.
    #[must_use]
    pub fn new(value: f32, params: SpringParams) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            params,
        }
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Current velocity (units per second).
    #[must_use]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Moves the target. The spring keeps its momentum.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Returns true once the spring has settled on its target.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        (self.target - self.value).abs() < Self::REST_DELTA
            && self.velocity.abs() < Self::REST_SPEED
    }

    /// Integrates the spring forward by `dt` seconds.
    ///
    /// A non-finite `dt` is ignored and at most two seconds are simulated.
    pub fn update(&mut self, dt: f32) {
        if self.is_at_rest() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }
        if !dt.is_finite() {
            return;
        }

        let mass = self.params.mass.max(f32::EPSILON);
        let mut remaining = dt.clamp(0.0, Self::MAX_UPDATE);
        while remaining > 0.0 {
            let h = remaining.min(Self::MAX_STEP);
            let displacement = self.value - self.target;
            let force = -self.params.stiffness * displacement - self.params.damping * self.velocity;
            // Semi-implicit Euler: velocity first, then position.
            self.velocity += force / mass * h;
            self.value += self.velocity * h;
            remaining -= h;
        }

        if self.is_at_rest() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }
}

/// Two springs sharing parameters.
#[derive(Debug, Clone)]
pub struct Spring2D {
    /// X axis.
    pub x: Spring,
    /// Y axis.
    pub y: Spring,
}

impl Spring2D {
    /// Creates a 2D spring at rest.
    #[must_use]
    pub fn new(x: f32, y: f32, params: SpringParams) -> Self {
        Self {
            x: Spring::new(x, params),
            y: Spring::new(y, params),
        }
    }

    /// Current position.
    #[must_use]
    pub fn value(&self) -> (f32, f32) {
        (self.x.value(), self.y.value())
    }

    /// Moves the target.
    pub fn set_target(&mut self, x: f32, y: f32) {
        self.x.set_target(x);
        self.y.set_target(y);
    }

    /// Integrates both axes.
    pub fn update(&mut self, dt: f32) {
        self.x.update(dt);
        self.y.update(dt);
    }

    /// Returns true once both axes have settled.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.x.is_at_rest() && self.y.is_at_rest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_out_is_front_loaded() {
        // Halfway through, an ease-out curve is well past halfway
        assert!(Easing::Power2Out.apply(0.5) > 0.8);
        assert!(Easing::Power3Out.apply(0.5) > Easing::Power2Out.apply(0.5));
        assert!((Easing::Linear.apply(0.5) - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_cubic_bezier_endpoints_and_shape() {
        let ease = Easing::TILT;
        assert!(ease.apply(0.0).abs() < 1e-6);
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-6);
        // Tilt curve shoots up almost immediately
        assert!(ease.apply(0.2) > 0.6, "got {}", ease.apply(0.2));

        // cubic-bezier(0,0,1,1) is linear
        let linear = Easing::CubicBezier(0.0, 0.0, 1.0, 1.0);
        assert!((linear.apply(0.3) - 0.3).abs() < 1e-3);
    }

    #[test]
    fn test_animation_reaches_target() {
        let mut anim = Animation::new(0.0, Easing::Power2Out);
        anim.set_target(100.0);

        for _ in 0..30 {
            anim.update(0.016); // ~60fps
        }

        assert!((anim.value() - 100.0).abs() < 0.01);
        assert!(anim.is_complete());
    }

    #[test]
    fn test_animation_holds_during_delay() {
        let mut anim = Animation::new(0.0, Easing::Linear)
            .with_duration(0.3)
            .with_delay(0.1);
        anim.set_target(10.0);

        anim.update(0.05);
        assert!(anim.value().abs() < f32::EPSILON);

        anim.update(0.2);
        assert!(anim.value() > 0.0 && anim.value() < 10.0);

        anim.update(1.0);
        assert!((anim.value() - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_spring_converges() {
        let mut spring = Spring::new(0.0, SpringParams::default());
        spring.set_target(500.0);

        for _ in 0..120 {
            spring.update(1.0 / 60.0);
        }

        assert!(spring.is_at_rest(), "value {} velocity {}", spring.value(), spring.velocity());
        assert!((spring.value() - 500.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_spring_ignores_non_finite_dt() {
        let mut spring = Spring::new(0.0, SpringParams::default());
        spring.set_target(100.0);
        spring.update(f32::INFINITY);
        spring.update(f32::NAN);
        assert!(spring.value().abs() < f32::EPSILON);
        assert!(spring.velocity().abs() < f32::EPSILON);

        spring.update(1.0 / 60.0);
        assert!(spring.value() > 0.0 && spring.value().is_finite());
    }

    #[test]
    fn test_spring_caps_simulated_time() {
        let mut spring = Spring::new(0.0, SpringParams::default());
        spring.set_target(100.0);
        // A day-long gap costs the same as two seconds
        spring.update(86_400.0);
        assert!(spring.is_at_rest());
        assert!((spring.value() - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_spring_survives_huge_dt() {
        let mut spring = Spring::new(0.0, SpringParams::default());
        spring.set_target(100.0);
        spring.update(5.0);
        assert!(spring.value().is_finite());
        assert!((spring.value() - 100.0).abs() < 1.0);
    }
}
