//! Logging utilities.
//!
//! Centralizes logger setup so binaries get one consistent `env_logger` backend
//! behind the `log` facade used throughout the engine.

mod init;

pub use init::{init_logging, LoggingConfig};
