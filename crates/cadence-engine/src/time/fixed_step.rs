/// Fixed-timestep accumulator.
///
/// Elapsed wall time is added with `accumulate`; `consume` hands it back out in
/// whole `interval`-sized steps. A partial step is never consumed, so after a full
/// drain `0 <= accumulator < interval`.
#[derive(Debug, Clone)]
pub struct FixedStep {
    interval: f64,
    accumulator: f64,
}

impl FixedStep {
    pub fn new(interval: f64) -> Self {
        debug_assert!(interval > 0.0, "fixed step interval must be positive");
        Self {
            interval,
            accumulator: 0.0,
        }
    }

    /// Creates an accumulator stepping `rate` times per simulated second.
    pub fn per_second(rate: u32) -> Self {
        debug_assert!(rate > 0, "fixed step rate must be positive");
        Self::new(1.0 / f64::from(rate))
    }

    /// Adds elapsed time. Negative input is treated as zero.
    pub fn accumulate(&mut self, dt: f64) {
        self.accumulator += dt.max(0.0);
    }

    /// Takes one step out of the accumulator if a whole one is available.
    pub fn consume(&mut self) -> bool {
        if self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            true
        } else {
            false
        }
    }

    /// Drains every whole step, calling `step` with the fixed interval for each.
    ///
    /// Stops at the first error; the failing step is already consumed.
    pub fn drain<E>(&mut self, mut step: impl FnMut(f64) -> Result<(), E>) -> Result<u32, E> {
        let mut steps = 0;
        while self.consume() {
            steps += 1;
            step(self.interval)?;
        }
        Ok(steps)
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Simulated time not yet consumed.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn drain_count(fixed: &mut FixedStep) -> u32 {
        fixed
            .drain(|_| Ok::<_, ()>(()))
            .unwrap()
    }

    fn run(samples: &[f64]) -> (u32, f64) {
        let mut fixed = FixedStep::per_second(30);
        let mut total = 0;
        for &dt in samples {
            fixed.accumulate(dt);
            total += drain_count(&mut fixed);
        }
        (total, fixed.accumulator())
    }

    // ── scenarios ─────────────────────────────────────────────────────────

    #[test]
    fn staggered_samples_step_once_each() {
        let mut fixed = FixedStep::per_second(30);
        let mut counts = Vec::new();
        for dt in [0.05, 0.02, 0.04] {
            fixed.accumulate(dt);
            counts.push(drain_count(&mut fixed));
        }
        assert_eq!(counts, vec![1, 1, 1]);

        let expected = 0.05 + 0.02 + 0.04 - 3.0 / 30.0;
        assert!((fixed.accumulator() - expected).abs() < EPS);
    }

    #[test]
    fn long_frame_catches_up() {
        let mut fixed = FixedStep::per_second(30);
        fixed.accumulate(0.10);
        assert_eq!(drain_count(&mut fixed), 3);
        assert!(fixed.accumulator() < fixed.interval());
        assert!(fixed.accumulator().abs() < EPS);
    }

    #[test]
    fn short_frame_steps_zero_times() {
        let mut fixed = FixedStep::per_second(30);
        fixed.accumulate(0.01);
        assert_eq!(drain_count(&mut fixed), 0);
        assert!((fixed.accumulator() - 0.01).abs() < EPS);
    }

    #[test]
    fn exact_interval_is_consumed() {
        let mut fixed = FixedStep::new(0.25);
        fixed.accumulate(0.25);
        assert!(fixed.consume());
        assert!(!fixed.consume());
        assert_eq!(fixed.accumulator(), 0.0);
    }

    // ── invariants ────────────────────────────────────────────────────────

    #[test]
    fn step_count_ignores_chunking() {
        let whole = run(&[0.25]);
        let halves = run(&[0.125, 0.125]);
        let fifths = run(&[0.05; 5]);
        let tiny = run(&[0.01; 25]);

        assert_eq!(whole.0, 7);
        for (count, left) in [halves, fifths, tiny] {
            assert_eq!(count, whole.0);
            assert!((left - whole.1).abs() < EPS);
        }
    }

    #[test]
    fn accumulator_stays_below_interval() {
        let mut fixed = FixedStep::per_second(60);
        for i in 0..500 {
            fixed.accumulate(f64::from(i % 7) * 0.009);
            drain_count(&mut fixed);
            assert!(fixed.accumulator() >= 0.0);
            assert!(fixed.accumulator() < fixed.interval());
        }
    }

    #[test]
    fn steps_are_always_the_fixed_interval() {
        let mut fixed = FixedStep::per_second(30);
        fixed.accumulate(0.2);
        let mut seen = Vec::new();
        fixed
            .drain(|dt| {
                seen.push(dt);
                Ok::<_, ()>(())
            })
            .unwrap();
        assert!(!seen.is_empty());
        assert!(seen.iter().all(|&dt| dt == 1.0 / 30.0));
    }

    #[test]
    fn drain_stops_at_first_error() {
        let mut fixed = FixedStep::new(0.1);
        fixed.accumulate(0.35);
        let mut calls = 0;
        let res = fixed.drain(|_| {
            calls += 1;
            if calls == 2 { Err("boom") } else { Ok(()) }
        });
        assert_eq!(res, Err("boom"));
        assert_eq!(calls, 2);
        assert!(fixed.consume());
    }

    #[test]
    fn negative_time_is_ignored() {
        let mut fixed = FixedStep::new(0.1);
        fixed.accumulate(-1.0);
        assert_eq!(fixed.accumulator(), 0.0);
    }
}
