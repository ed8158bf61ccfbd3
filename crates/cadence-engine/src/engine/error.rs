use thiserror::Error;

/// Why a run of the engine ended abnormally.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Surface, clock or simulation setup failed; the loop never ran.
    #[error("startup failed: {0:#}")]
    Startup(#[source] anyhow::Error),

    /// input/update/render/present failed while running.
    #[error("game loop failed: {0:#}")]
    Runtime(#[source] anyhow::Error),

    /// Simulation cleanup or surface teardown failed after an otherwise clean run.
    #[error("cleanup failed: {0:#}")]
    Cleanup(#[source] anyhow::Error),

    /// The loop thread could not be spawned, or the loop panicked.
    #[error("game loop thread: {0}")]
    Thread(String),
}

impl EngineError {
    pub fn is_startup(&self) -> bool {
        matches!(self, Self::Startup(_))
    }

    pub fn is_runtime(&self) -> bool {
        matches!(self, Self::Runtime(_))
    }

    pub fn is_cleanup(&self) -> bool {
        matches!(self, Self::Cleanup(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn message_includes_cause_chain() {
        let cause = anyhow::anyhow!("no adapter").context("opening window");
        let err = EngineError::Startup(cause);
        assert_eq!(err.to_string(), "startup failed: opening window: no adapter");
        assert!(err.source().is_some());
        assert!(err.is_startup());
    }
}
