//! Time subsystem.
//!
//! Provides the loop's time source and the fixed-step accumulator, decoupled from
//! the runtime so both can be driven deterministically in tests.
//! Intended usage:
//! - one `Clock` per loop, polled with `elapsed()` exactly once per iteration
//! - one `FixedStep` per loop, fed with that elapsed time and drained with `consume()`

mod clock;
mod fixed_step;
mod stats;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use fixed_step::FixedStep;
pub use stats::{LoopStats, StatsSnapshot};
