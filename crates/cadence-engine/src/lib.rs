//! Cadence engine crate.
//!
//! A fixed-update / variable-render loop driver plus the platform pieces it
//! runs against: a winit + wgpu window surface, input polling, and timing.

pub mod core;
pub mod device;
pub mod engine;
pub mod input;
pub mod logging;
pub mod time;
pub mod window;

pub use crate::core::{Color, Simulation, Surface};
pub use crate::engine::{EngineConfig, EngineError, GameEngine, LoopConfig, LoopState};
