//! Error types for the QuSim2 circuit module

use qusim2_algebra::AlgebraError;
use thiserror::Error;

/// Circuit error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CircuitError {
    /// Input dimensions incompatible with the requested gate or circuit
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A qubit or state amplitude pair is not normalised, or a gate matrix
    /// is not unitary
    #[error("Norm violation: {0}")]
    NormViolation(String),

    /// An underlying algebra factory rejected its operands
    #[error(transparent)]
    Algebra(#[from] AlgebraError),
}

/// Result type for circuit operations
pub type CircuitResult<T> = Result<T, CircuitError>;
