//! Core numeric types for QuSim2
//!
//! This crate provides the data layer shared by the lazy algebra engine and
//! the circuit layer:
//!
//! * Single-precision complex scalars and tolerance-based comparison
//! * [`SplitVector`] - a complex vector stored as separate real and
//!   imaginary sequences, the layout every arithmetic kernel consumes
//! * [`simd`] - element-wise kernels over real arrays and split vectors,
//!   with a `wide`-accelerated backend and a scalar fallback
//! * [`DenseMatrix`] - a row-major contiguous complex matrix with a library
//!   of constant gates and kets
//!
//! ## Examples
//!
//! ```
//! use qusim2_core::{DenseMatrix, approx_equal};
//! use num_complex::Complex32;
//!
//! let h = DenseMatrix::hadamard2();
//! assert_eq!(h.rows(), 2);
//! assert!(approx_equal(h.get(0, 0), Complex32::new(std::f32::consts::FRAC_1_SQRT_2, 0.0)));
//! ```

pub mod error;
pub use error::{CoreError, CoreResult};

mod scalar;
pub use scalar::{approx_equal, approx_equal_tol, norm_sq, DEFAULT_TOLERANCE};

mod split;
pub use split::SplitVector;

pub mod simd;

mod matrix;
pub use matrix::DenseMatrix;

// Re-export the scalar type used throughout the workspace.
pub use num_complex::Complex32;
