//! Error types for cvxgraph.

use thiserror::Error;

/// Error type for cvxgraph operations.
#[derive(Debug, Error)]
pub enum CvxError {
    /// Operand shape rules out the requested operation.
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// Axis outside the valid range for the declared subsystems.
    #[error("Invalid axis: expected 0 <= axis < {len}, got {axis}")]
    InvalidAxis {
        /// The offending axis argument.
        axis: isize,
        /// Number of declared subsystems.
        len: usize,
    },

    /// Declared subsystem dimensions disagree with the operand.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Operand shapes are incompatible.
    #[error("Shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },

    /// Expression has no numeric value.
    #[error("Missing value: {0}")]
    MissingValue(String),
}

/// Result type for cvxgraph operations.
pub type Result<T> = std::result::Result<T, CvxError>;
