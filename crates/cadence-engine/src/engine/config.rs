use anyhow::{Result, ensure};

/// Loop cadence constants.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LoopConfig {
    /// Fixed simulation steps per second.
    pub updates_per_second: u32,

    /// Frame cap applied only when the surface does not sync presentation itself.
    pub frames_per_second: u32,
}

impl LoopConfig {
    /// Rejects rates the loop cannot run at.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.updates_per_second > 0, "updates per second must be positive");
        ensure!(self.frames_per_second > 0, "frames per second must be positive");
        Ok(())
    }

    /// Simulated seconds advanced by each `update` call.
    pub fn update_interval(&self) -> f64 {
        1.0 / f64::from(self.updates_per_second)
    }

    /// Wall-clock budget of one throttled iteration.
    pub fn frame_slot(&self) -> f64 {
        1.0 / f64::from(self.frames_per_second)
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            updates_per_second: 30,
            frames_per_second: 75,
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub loop_config: LoopConfig,

    /// Run the loop on the thread calling `start()` instead of a spawned one.
    ///
    /// Needed where the windowing system only works on the main thread (macOS).
    pub run_on_calling_thread: bool,

    /// Seconds between frame/update rate reports at `debug` level; `None` disables them.
    pub stats_interval: Option<f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            loop_config: LoopConfig::default(),
            run_on_calling_thread: false,
            stats_interval: Some(1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cadence() {
        let cfg = LoopConfig::default();
        assert!((cfg.update_interval() - 1.0 / 30.0).abs() < 1e-12);
        assert!((cfg.frame_slot() - 1.0 / 75.0).abs() < 1e-12);
    }

    #[test]
    fn zero_rates_are_rejected() {
        assert!(LoopConfig::default().validate().is_ok());

        let no_updates = LoopConfig { updates_per_second: 0, ..LoopConfig::default() };
        let err = no_updates.validate().unwrap_err();
        assert!(err.to_string().contains("updates per second"));

        let no_frames = LoopConfig { frames_per_second: 0, ..LoopConfig::default() };
        assert!(no_frames.validate().is_err());
    }
}
