use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Monotonic time source polled by the loop driver.
///
/// All timestamps are seconds relative to the moment `init()` was called.
/// `elapsed()` mutates the clock and must be called from exactly one place per
/// loop iteration.
pub trait Clock {
    /// Captures the time origin. Called once, before the first `elapsed()`.
    fn init(&mut self);

    /// Seconds since the previous `elapsed()` call (or since `init()`).
    ///
    /// Records the current time as the new poll reference. Never negative.
    fn elapsed(&mut self) -> f64;

    /// Seconds since `init()`. Does not touch the poll reference.
    fn now(&self) -> f64;

    /// Timestamp recorded by the most recent `elapsed()` call.
    fn last_poll_time(&self) -> f64;

    /// Blocks for roughly `duration`.
    ///
    /// Callers must re-check `now()` after waking rather than trusting the duration.
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// `Instant`-backed clock used by the real loop.
#[derive(Debug, Clone, Default)]
pub struct MonotonicClock {
    origin: Option<Instant>,
    last_poll: Duration,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    fn origin(&mut self) -> Instant {
        *self.origin.get_or_insert_with(Instant::now)
    }
}

impl Clock for MonotonicClock {
    fn init(&mut self) {
        self.origin = Some(Instant::now());
        self.last_poll = Duration::ZERO;
    }

    fn elapsed(&mut self) -> f64 {
        let now = self.origin().elapsed();
        let dt = now.saturating_sub(self.last_poll);
        self.last_poll = now;
        dt.as_secs_f64()
    }

    fn now(&self) -> f64 {
        self.origin
            .map(|origin| origin.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn last_poll_time(&self) -> f64 {
        self.last_poll.as_secs_f64()
    }
}

/// Hand-driven clock for deterministic loops.
///
/// Time only moves when told to: through `advance()`, through `sleep()`, or by
/// consuming the next scripted step on each `elapsed()` poll.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: f64,
    last_poll: f64,
    steps: VecDeque<f64>,
    sleeps: u32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock that advances by the next value of `steps` on every `elapsed()`
    /// poll. Once the script runs out, polls only see time added by `advance`/`sleep`.
    pub fn scripted(steps: impl IntoIterator<Item = f64>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Moves time forward. Negative amounts are ignored.
    pub fn advance(&mut self, seconds: f64) {
        self.now += seconds.max(0.0);
    }

    /// Number of `sleep` calls observed so far.
    pub fn sleeps(&self) -> u32 {
        self.sleeps
    }
}

impl Clock for ManualClock {
    fn init(&mut self) {
        self.now = 0.0;
        self.last_poll = 0.0;
    }

    fn elapsed(&mut self) -> f64 {
        if let Some(step) = self.steps.pop_front() {
            self.advance(step);
        }
        let dt = self.now - self.last_poll;
        self.last_poll = self.now;
        dt
    }

    fn now(&self) -> f64 {
        self.now
    }

    fn last_poll_time(&self) -> f64 {
        self.last_poll
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps += 1;
        self.advance(duration.as_secs_f64());
    }
}
