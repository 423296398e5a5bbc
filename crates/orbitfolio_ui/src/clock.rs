//! Frame clock injected into animated widgets.
//!
//! Nothing in this crate reads wall-clock time. The host's animation loop
//! (requestAnimationFrame, a winit redraw, a test) produces [`FrameStamp`]s and
//! widgets consume them through a [`FrameSource`].
//!
//! ```text
//! host frame callback ──► FrameSender ══channel══► ChannelClock ──► widget.pump()
//! ```

use std::collections::VecDeque;

use crossbeam_channel::{Receiver, Sender, TrySendError};

/// One host animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStamp {
    /// Monotonically increasing frame number.
    pub index: u64,
    /// Host timestamp in seconds.
    pub time: f64,
}

impl FrameStamp {
    /// Creates a frame stamp.
    #[must_use]
    pub const fn new(index: u64, time: f64) -> Self {
        Self { index, time }
    }
}

/// Anything that can hand out pending frames.
pub trait FrameSource {
    /// Returns the next pending frame, oldest first, or `None` when drained.
    fn next_frame(&mut self) -> Option<FrameStamp>;

    /// Drains every pending frame and returns only the newest one.
    ///
    /// Backlogged frames are skipped, never replayed.
    fn latest_frame(&mut self) -> Option<FrameStamp> {
        let mut latest = None;
        while let Some(frame) = self.next_frame() {
            latest = Some(frame);
        }
        latest
    }
}

/// Scripted clock for tests and offline tools.
#[derive(Debug, Default)]
pub struct ManualClock {
    pending: VecDeque<FrameStamp>,
    next_index: u64,
    time: f64,
}

impl ManualClock {
    /// Creates a clock at time zero with no pending frames.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a frame `dt` seconds after the previous one and returns it.
    pub fn step(&mut self, dt: f64) -> FrameStamp {
        self.time += dt.max(0.0);
        let frame = FrameStamp::new(self.next_index, self.time);
        self.next_index += 1;
        self.pending.push_back(frame);
        frame
    }

    /// Queues `count` frames at 60 fps.
    pub fn step_frames(&mut self, count: usize) {
        for _ in 0..count {
            self.step(1.0 / 60.0);
        }
    }

    /// Number of frames queued but not yet consumed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl FrameSource for ManualClock {
    fn next_frame(&mut self) -> Option<FrameStamp> {
        self.pending.pop_front()
    }
}

/// Producer half of a channel clock, owned by the host frame callback.
#[derive(Debug, Clone)]
pub struct FrameSender {
    tx: Sender<FrameStamp>,
    next_index: u64,
}

impl FrameSender {
    /// Publishes a frame at host time `time_ms` (milliseconds, as rAF reports).
    ///
    /// Returns false once the consuming widget is gone, which is the host's
    /// signal to stop its loop.
    pub fn send_frame(&mut self, time_ms: f64) -> bool {
        let frame = FrameStamp::new(self.next_index, time_ms / 1000.0);
        self.next_index += 1;
        match self.tx.try_send(frame) {
            Ok(()) => true,
            // Full only happens with a bounded channel; the consumer is behind,
            // and dropping the frame is the skip policy anyway.
            Err(TrySendError::Full(_)) => true,
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Consumer half of a channel clock.
#[derive(Debug)]
pub struct ChannelClock {
    rx: Receiver<FrameStamp>,
}

impl ChannelClock {
    /// Creates a connected sender/clock pair.
    #[must_use]
    pub fn channel() -> (FrameSender, Self) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (FrameSender { tx, next_index: 0 }, Self { rx })
    }

    /// Creates a pair that holds at most `capacity` undelivered frames.
    #[must_use]
    pub fn bounded(capacity: usize) -> (FrameSender, Self) {
        let (tx, rx) = crossbeam_channel::bounded(capacity.max(1));
        (FrameSender { tx, next_index: 0 }, Self { rx })
    }
}

impl FrameSource for ChannelClock {
    fn next_frame(&mut self) -> Option<FrameStamp> {
        self.rx.try_recv().ok()
    }
}

/// Converts consecutive frames into clamped per-frame deltas.
///
/// A tab that was backgrounded for ten seconds produces one frame with a
/// ten second gap; animations see at most `max_dt` of it.
#[derive(Debug, Clone, Copy)]
pub struct FrameTimer {
    last: Option<FrameStamp>,
    max_dt: f32,
}

impl FrameTimer {
    /// Largest delta handed to animations by default (seconds).
    pub const DEFAULT_MAX_DT: f32 = 0.1;

    /// Creates a timer with the default clamp.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: None,
            max_dt: Self::DEFAULT_MAX_DT,
        }
    }

    /// Overrides the delta clamp.
    #[must_use]
    pub const fn with_max_dt(mut self, max_dt: f32) -> Self {
        self.max_dt = max_dt;
        self
    }

    /// Returns the delta for `frame`, or `None` if it was already seen.
    ///
    /// The first frame yields zero. Time running backwards yields zero.
    pub fn delta(&mut self, frame: FrameStamp) -> Option<f32> {
        let dt = match self.last {
            Some(last) if frame.index <= last.index => return None,
            Some(last) => ((frame.time - last.time) as f32).clamp(0.0, self.max_dt),
            None => 0.0,
        };
        self.last = Some(frame);
        Some(dt)
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
