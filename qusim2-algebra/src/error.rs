//! Error types for the QuSim2 algebra module

use thiserror::Error;

/// Algebra error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgebraError {
    /// Operand dimensions incompatible with the requested operation
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
}

/// Result type for algebra operations
pub type AlgebraResult<T> = Result<T, AlgebraError>;
