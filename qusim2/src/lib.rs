//! QuSim2: a lazy-evaluation quantum computing simulator library
//!
//! The library is layered as three crates, re-exported here:
//!
//! * `qusim2-core` - split complex vectors, SIMD kernels and the dense
//!   vectorised matrix with its gate/ket constants
//! * `qusim2-algebra` - the lazy algebra engine: deferred computation
//!   graphs over dense matrices with per-element, per-row and parallel
//!   whole-matrix evaluation
//! * `qusim2-circuit` - qubits, state vectors and the gate layer
//!   (controlled-U, QFT, inverse QFT, quantum phase estimation)
//!
//! ## Examples
//!
//! Deferred algebra:
//!
//! ```
//! use qusim2::prelude::*;
//!
//! let h = DenseMatrix::hadamard2();
//! let graph = engine::matmul(&h, &h).unwrap();
//! assert_eq!(graph.to_matrix(), DenseMatrix::identity2());
//! ```
//!
//! Circuits:
//!
//! ```
//! use qusim2::prelude::*;
//!
//! let register = StateVector::zeros(2).unwrap();
//! let transformed = circuit::qft(&register).unwrap();
//! let restored = circuit::inverse_qft(&transformed).unwrap();
//! assert_eq!(restored, register);
//! ```

// Re-exports for user convenience
pub use qusim2_algebra::{engine, AlgebraError, AlgebraResult, LazyOperation, NodeRef, Operand};
pub use qusim2_circuit::{circuit, gate, CircuitError, CircuitResult, Qubit, StateVector};
pub use qusim2_core::{
    approx_equal, approx_equal_tol, norm_sq, simd, Complex32, CoreError, CoreResult, DenseMatrix,
    SplitVector, DEFAULT_TOLERANCE,
};

// Prelude module for convenient imports
pub mod prelude {
    //! Common QuSim2 types and operations for convenient importing
    //!
    //! ```
    //! use qusim2::prelude::*;
    //! ```

    pub use qusim2_algebra::{engine, LazyOperation};
    pub use qusim2_circuit::{circuit, gate, Qubit, StateVector};
    pub use qusim2_core::{approx_equal, Complex32, DenseMatrix, SplitVector};
}
