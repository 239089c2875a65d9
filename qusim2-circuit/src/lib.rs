//! Quantum gate and circuit layer
//!
//! A thin layer over the lazy algebra engine: qubits and state vectors as
//! data, gate application as deferred matrix-vector products, and the
//! textbook circuits (QFT, inverse QFT, quantum phase estimation) chained
//! from Hadamard and controlled-phase primitives.
//!
//! ## Examples
//!
//! ```
//! use qusim2_circuit::{gate, Qubit};
//!
//! let plus = gate::hadamard(&Qubit::ket_zero()).unwrap();
//! let h = std::f32::consts::FRAC_1_SQRT_2;
//! assert!((plus.alpha().re - h).abs() < 1e-6);
//! assert!((plus.beta().re - h).abs() < 1e-6);
//! ```

pub mod error;
pub use error::{CircuitError, CircuitResult};

mod qubit;
pub use qubit::Qubit;

mod state_vector;
pub use state_vector::StateVector;

pub mod gate;

pub mod circuit;
