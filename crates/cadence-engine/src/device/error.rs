/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; presentation resumes next iteration.
    Reconfigured,
    /// Transient error; this iteration presents nothing.
    SkipFrame,
    /// Unrecoverable (commonly OOM); the loop must stop.
    Fatal,
}
