//! Loop driver.
//!
//! `GameEngine` ties a `Surface`, a `Simulation` and a `Clock` together and runs
//! the fixed-update / variable-render loop on a single thread.

mod config;
mod driver;
mod error;
mod state;

pub use config::{EngineConfig, LoopConfig};
pub use driver::GameEngine;
pub use error::EngineError;
pub use state::LoopState;
