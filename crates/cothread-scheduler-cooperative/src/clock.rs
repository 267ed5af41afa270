use std::cell::Cell;
use std::time::{Duration, Instant};

/// Time source for sleep deadlines.
pub trait Clock {
    fn now(&self) -> Instant;

    /// Blocks the whole OS thread until `deadline`. Only the idle thread calls
    /// this, when nothing but sleepers is left.
    fn wait_until(&self, deadline: Instant);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wait_until(&self, deadline: Instant) {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }
}

/// A clock that only moves when told to.
///
/// `wait_until` jumps straight to the deadline, so sleeping threads wake without
/// any real waiting.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Cell::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }

    fn wait_until(&self, deadline: Instant) {
        let target = deadline.saturating_duration_since(self.origin);
        if target > self.offset.get() {
            self.offset.set(target);
        }
    }
}
