//! Core engine-facing contracts.
//!
//! Defines the two seams the loop driver is generic over: the `Surface` it
//! presents to and polls, and the `Simulation` it steps. Neither leaks winit or
//! wgpu types.

mod color;
mod simulation;
mod surface;

pub use color::Color;
pub use simulation::Simulation;
pub use surface::Surface;
