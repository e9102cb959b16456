//! Time sources for the frame loop.
//!
//! Every time-dependent formula in the scenes is a function of the absolute
//! elapsed time since the driver started, never of a frame counter, so the
//! loop tolerates whatever cadence the host schedules frames at.

use std::cell::Cell;

use instant::{Duration, Instant};

/// A monotonic clock reporting time elapsed since its creation.
pub trait TimeSource {
    fn elapsed(&self) -> Duration;
}

/// Wall clock backed by `instant`, which maps to `performance.now()` on the web.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    start: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for Clock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// A clock that only moves when told to. Used for deterministic stepping.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to an absolute time. Going backwards is ignored.
    pub fn set(&self, elapsed: Duration) {
        if elapsed > self.now.get() {
            self.now.set(elapsed);
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl TimeSource for ManualClock {
    fn elapsed(&self) -> Duration {
        self.now.get()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::rc::Rc<T> {
    fn elapsed(&self) -> Duration {
        (**self).elapsed()
    }
}

/// Length of one frame at the refresh rate the per-frame increments were tuned for.
pub const REFERENCE_FRAME: Duration = Duration::from_micros(16_667);

/// Timing handed to every scene on each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Absolute time since the driver started.
    pub elapsed: Duration,
    /// Time since the previous frame; zero on the first frame.
    pub delta: Duration,
}

impl FrameTime {
    pub fn new(elapsed: Duration, delta: Duration) -> Self {
        Self { elapsed, delta }
    }

    /// A frame at `elapsed` following one at `previous`.
    pub fn after(previous: Duration, elapsed: Duration) -> Self {
        Self {
            elapsed,
            delta: elapsed.saturating_sub(previous),
        }
    }

    pub fn millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    pub fn secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// How many reference frames `delta` spans. Per-frame increments are scaled by this.
    pub fn frames(&self) -> f32 {
        (self.delta.as_secs_f64() / REFERENCE_FRAME.as_secs_f64()) as f32
    }
}
