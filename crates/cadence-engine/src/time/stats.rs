/// Rates measured over one reporting window.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StatsSnapshot {
    /// Loop iterations (rendered frames) per second.
    pub fps: f64,
    /// Fixed updates per second.
    pub ups: f64,
}

/// Frame/update rate meter.
///
/// Fed once per loop iteration with the clock time and the number of fixed
/// updates that iteration ran. Produces a snapshot each time a full window has
/// elapsed; the window start advances by whole windows so rates do not drift.
#[derive(Debug, Clone)]
pub struct LoopStats {
    window: f64,
    window_start: f64,
    frames: u32,
    updates: u32,
    last: Option<StatsSnapshot>,
}

impl LoopStats {
    pub fn new(window: f64) -> Self {
        debug_assert!(window > 0.0);
        Self {
            window,
            window_start: 0.0,
            frames: 0,
            updates: 0,
            last: None,
        }
    }

    /// Records one iteration ending at `now`.
    ///
    /// Returns a snapshot when this iteration closed a reporting window.
    pub fn record(&mut self, now: f64, updates: u32) -> Option<StatsSnapshot> {
        self.frames += 1;
        self.updates += updates;

        let span = now - self.window_start;
        if span < self.window {
            return None;
        }

        let snapshot = StatsSnapshot {
            fps: f64::from(self.frames) / span,
            ups: f64::from(self.updates) / span,
        };

        // Skip whole windows that passed without an iteration (e.g. a stall).
        let windows = (span / self.window).floor();
        self.window_start += windows * self.window;
        self.frames = 0;
        self.updates = 0;
        self.last = Some(snapshot);

        Some(snapshot)
    }

    /// Most recently completed snapshot.
    pub fn last(&self) -> Option<StatsSnapshot> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_snapshot_inside_window() {
        let mut stats = LoopStats::new(1.0);
        assert_eq!(stats.record(0.5, 15), None);
        assert_eq!(stats.last(), None);
    }

    #[test]
    fn reports_rates_at_window_boundary() {
        let mut stats = LoopStats::new(1.0);
        for i in 1..=60 {
            let snap = stats.record(f64::from(i) / 60.0, if i % 2 == 0 { 1 } else { 0 });
            if i < 60 {
                assert!(snap.is_none());
            } else {
                let snap = snap.unwrap();
                assert!((snap.fps - 60.0).abs() < 1e-6);
                assert!((snap.ups - 30.0).abs() < 1e-6);
            }
        }
        assert!(stats.last().is_some());
    }

    #[test]
    fn stall_skips_whole_windows() {
        let mut stats = LoopStats::new(1.0);
        let snap = stats.record(3.5, 10).unwrap();
        assert!((snap.fps - 1.0 / 3.5).abs() < 1e-9);
        // Next window starts at 3.0, so 3.9 is still inside it.
        assert_eq!(stats.record(3.9, 1), None);
        assert!(stats.record(4.0, 1).is_some());
    }
}
