use std::{
    fmt,
    time::{Instant, SystemTime},
};

/// Source of time for the round scheduler.
///
/// Production code uses [`SystemClock`]; tests inject a manual clock so rounds can elapse
/// without real delays.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Monotonic instant used for interval and timer comparisons.
    fn now(&self) -> Instant;

    /// Wall-clock time used for display only.
    fn wall_now(&self) -> SystemTime;
}

/// Clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall_now(&self) -> SystemTime {
        SystemTime::now()
    }
}
