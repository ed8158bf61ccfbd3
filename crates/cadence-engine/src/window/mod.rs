//! Window surface.
//!
//! Owns the `winit` EventLoop and Window, wires them to the GPU layer, and
//! exposes the pair to the loop driver as a `core::Surface`.

mod surface;

pub use surface::{WindowConfig, WindowSurface};
