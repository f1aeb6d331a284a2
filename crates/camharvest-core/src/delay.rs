//! Request throttling.

use std::time::Duration;

use rand::Rng;
use tracing::trace;

/// Paces outbound requests. Called once after every request.
pub trait DelayStrategy {
    fn wait_before_next_request(&self);
}

/// Sleeps a uniformly random duration in `[0, max)`.
#[derive(Debug, Clone, Copy)]
pub struct RandomDelay {
    max: Duration,
}

impl RandomDelay {
    pub fn new(max: Duration) -> Self {
        Self { max }
    }

    /// Draw the next sleep duration without sleeping.
    pub fn sample(&self) -> Duration {
        if self.max.is_zero() {
            return Duration::ZERO;
        }
        let max_nanos = u64::try_from(self.max.as_nanos()).unwrap_or(u64::MAX);
        Duration::from_nanos(rand::rng().random_range(0..max_nanos))
    }
}

impl DelayStrategy for RandomDelay {
    fn wait_before_next_request(&self) {
        let pause = self.sample();
        if !pause.is_zero() {
            trace!(pause_ms = pause.as_millis() as u64, "throttling");
            std::thread::sleep(pause);
        }
    }
}

/// Never sleeps.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl DelayStrategy for NoDelay {
    fn wait_before_next_request(&self) {}
}

impl<D: DelayStrategy + ?Sized> DelayStrategy for &D {
    fn wait_before_next_request(&self) {
        (**self).wait_before_next_request()
    }
}
