use anyhow::Result;

/// Pluggable game logic driven by the loop.
///
/// Generic over the surface type so a simulation can be written against the real
/// window surface or a scripted one under test.
///
/// Call order per run: `init` once, then per iteration `input` once, `update`
/// zero or more times, `render` once; finally `cleanup` once, even when `init`
/// or an iteration failed.
pub trait Simulation<S> {
    /// One-time setup. An error aborts startup.
    fn init(&mut self, surface: &mut S) -> Result<()> {
        let _ = surface;
        Ok(())
    }

    /// Polls current input state. Must not block.
    fn input(&mut self, surface: &S) -> Result<()>;

    /// Advances state by exactly `interval` seconds.
    ///
    /// Always receives the fixed update interval, never the measured frame time.
    fn update(&mut self, interval: f64) -> Result<()>;

    /// Produces a frame from the current state.
    fn render(&self, surface: &mut S) -> Result<()>;

    /// Releases owned resources.
    fn cleanup(&mut self) -> Result<()> {
        Ok(())
    }
}
