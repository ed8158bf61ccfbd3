use anyhow::Result;

use crate::input::{InputState, Key};

use super::Color;

/// Window/presentation boundary consumed by the loop driver and simulations.
///
/// A surface is opened on the loop thread from its `Config`, polled and presented
/// once per iteration, and torn down once at shutdown.
pub trait Surface: Sized {
    /// Everything needed to open the surface. Moved to the loop thread.
    type Config;

    /// Opens the surface (window, context, event source).
    fn open(config: Self::Config) -> Result<Self>;

    /// True once the user or platform asked the surface to close.
    fn close_requested(&self) -> bool;

    /// Asks the surface to close; the driver stops after the current iteration.
    fn request_close(&mut self);

    /// Current input snapshot.
    fn input(&self) -> &InputState;

    /// Whether `key` is currently held.
    fn is_key_pressed(&self, key: Key) -> bool {
        self.input().key_down(key)
    }

    /// Shows the rendered frame and pumps pending platform events.
    ///
    /// Called by the driver exactly once per iteration, right after render.
    fn present(&mut self) -> Result<()>;

    /// True when presentation itself paces the loop (e.g. vsync).
    ///
    /// When false the driver throttles to its target frame rate.
    fn syncs_presentation(&self) -> bool;

    /// Drawable size in physical pixels.
    fn size(&self) -> (u32, u32);

    /// Set when the drawable size changed; cleared by whoever handled it.
    fn is_resized(&self) -> bool;
    fn set_resized(&mut self, resized: bool);

    /// Color used to clear the next presented frame.
    fn set_clear_color(&mut self, color: Color);

    /// Releases the surface. Called once during shutdown, after simulation cleanup.
    fn teardown(&mut self) -> Result<()> {
        Ok(())
    }
}
