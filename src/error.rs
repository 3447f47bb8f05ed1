use std::error::Error;
use std::fmt;

/// Errors surfaced by the math engine and the model.
///
/// Every variant corresponds to one violated precondition, detected at the
/// first operation that observes it. None of these are transient: callers
/// that want to recover (e.g. skip a malformed batch) do so above this crate.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Operand dimensions disagree for a binary matrix operation.
    ShapeMismatch {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
    /// A row range or class index falls outside its container.
    InvalidRange {
        start: usize,
        end: usize,
        limit: usize,
    },
    /// A zero-row batch was passed to a training step.
    InvalidBatch,
    /// A configuration value is unusable (e.g. non-positive init std).
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::ShapeMismatch { op, lhs, rhs } => write!(
                f,
                "{}: operand shapes disagree: lhs = ({}, {}), rhs = ({}, {})",
                op, lhs.0, lhs.1, rhs.0, rhs.1
            ),
            ModelError::InvalidRange { start, end, limit } => {
                write!(f, "invalid range [{}, {}): exceeds limit {}", start, end, limit)
            }
            ModelError::InvalidBatch => write!(f, "training step received an empty batch"),
            ModelError::InvalidConfig(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl Error for ModelError {}
