use std::time::{Duration, Instant};

/// Source of monotonic time for stamping sensor updates.
pub trait Clock {
    fn now(&mut self) -> Duration;
}

#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that advances by a fixed step on every read.
#[derive(Debug, Clone)]
pub struct SteppingClock {
    now: Duration,
    step: Duration,
}

impl SteppingClock {
    pub fn new(step: Duration) -> Self {
        Self {
            now: Duration::ZERO,
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&mut self) -> Duration {
        self.now = self.now.saturating_add(self.step);
        self.now
    }
}

/// Milliseconds between two clock readings, saturating at zero when the
/// clock reports an earlier time than before.
pub fn elapsed_ms(earlier: Duration, later: Duration) -> u64 {
    let ms = later.checked_sub(earlier).unwrap_or_default().as_millis();
    u64::try_from(ms).unwrap_or(u64::MAX)
}
