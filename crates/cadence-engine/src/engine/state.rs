use std::fmt;

/// Lifecycle of one engine run.
///
/// `Uninitialized → Initializing → Running → ShuttingDown → Terminated`, with
/// `Initializing → ShuttingDown` on a startup failure.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Uninitialized,
    Initializing,
    Running,
    ShuttingDown,
    Terminated,
}

impl LoopState {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(self, next: LoopState) -> bool {
        use LoopState::*;
        matches!(
            (self, next),
            (Uninitialized, Initializing)
                | (Initializing, Running)
                | (Initializing, ShuttingDown)
                | (Running, ShuttingDown)
                | (ShuttingDown, Terminated)
        )
    }
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoopState::Uninitialized => "uninitialized",
            LoopState::Initializing => "initializing",
            LoopState::Running => "running",
            LoopState::ShuttingDown => "shutting down",
            LoopState::Terminated => "terminated",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::LoopState::*;

    #[test]
    fn startup_failure_skips_running() {
        assert!(Initializing.can_transition_to(ShuttingDown));
        assert!(!Initializing.can_transition_to(Terminated));
    }

    #[test]
    fn no_way_back() {
        assert!(!Running.can_transition_to(Initializing));
        assert!(!Terminated.can_transition_to(Uninitialized));
        assert!(!ShuttingDown.can_transition_to(Running));
    }
}
