use thiserror::Error;

/// Failure of a running program. Always fatal: execution stops immediately.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime error: I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("runtime error: cell access at {position} is outside the {cells}-cell tape")]
    TapeOutOfBounds { position: isize, cells: usize },

    #[error("runtime error: execution step limit exceeded ({0})")]
    StepLimit(u64),

    #[error("runtime error: cannot lower graph: {0}")]
    InvalidProgram(String),
}

impl RuntimeError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        RuntimeError::InvalidProgram(msg.into())
    }
}
