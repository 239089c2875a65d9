//! Error types for the QuSim2 core module

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Shape mismatch error (incompatible construction dimensions)
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;
