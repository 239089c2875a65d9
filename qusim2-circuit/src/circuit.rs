//! Circuit assembly
//!
//! The quantum Fourier transform, its inverse and quantum phase estimation,
//! chained from the Hadamard and controlled-R_k primitives in the iterative
//! textbook pattern. Circuits consume and produce qubit registers; every
//! two-qubit interaction collapses back to single qubits through the
//! partial-trace extraction, so the register stays a product state
//! throughout.

use qusim2_algebra::engine;
use qusim2_core::DenseMatrix;

use crate::error::{CircuitError, CircuitResult};
use crate::gate;
use crate::qubit::Qubit;
use crate::state_vector::StateVector;

/// The quantum Fourier transform of a qubit register.
///
/// Qubit `i` is put through a Hadamard and then controlled-R_k rotations
/// conditioned on each later qubit; the transformed qubit lands at the
/// mirrored register position.
pub fn qft(state: &StateVector) -> CircuitResult<StateVector> {
    let n = state.len();
    let mut result = vec![Qubit::ket_zero(); n];

    let last = n - 1;
    for i in 0..n {
        let mut j_k = gate::hadamard(&state.qubit(i)?)?;
        for k_next in (i + 1)..n {
            let rotation = gate::r_k((k_next + 1) as u32, false);
            j_k = gate::controlled_u(&j_k, &state.qubit(k_next)?, &rotation)?;
        }
        result[last - i] = j_k;
    }

    StateVector::from_qubits(result)
}

/// The inverse quantum Fourier transform: the mirror circuit of [`qft`]
/// with inverted rotations, undoing it qubit-wise.
pub fn inverse_qft(state: &StateVector) -> CircuitResult<StateVector> {
    let n = state.len();
    let mut swapped = Vec::with_capacity(n);
    for i in 0..n {
        swapped.push(state.qubit(i)?);
    }
    swapped.reverse();

    let mut result = vec![Qubit::ket_zero(); n];
    let last = n - 1;
    for i in (0..n).rev() {
        let mut k_i = swapped[i];
        for j in ((i + 1)..=last).rev() {
            let rotation = gate::r_k((j + 1) as u32, true);
            k_i = gate::controlled_u(&k_i, &result[j], &rotation)?;
        }
        result[i] = gate::hadamard(&k_i)?;
    }

    StateVector::from_qubits(result)
}

/// Quantum phase estimation.
///
/// Estimates the eigenphase of `u` on `eigenstate` with a `t`-qubit
/// register: each register qubit is put through a Hadamard, picks up the
/// phase of `u^(2^i)` by kickback through a controlled application, and the
/// register is read back through the inverse QFT. Returns the post-circuit
/// register; [`estimate_phase`] converts it to a number.
pub fn qpe(eigenstate: &Qubit, u: &DenseMatrix, t: usize) -> CircuitResult<StateVector> {
    if t == 0 {
        return Err(CircuitError::ShapeMismatch(
            "phase estimation requires at least one register qubit".to_string(),
        ));
    }

    let mut register = vec![Qubit::ket_zero(); t];
    for (i, slot) in register.iter_mut().enumerate() {
        let control = gate::hadamard(slot)?;
        let u_k = engine::matrix_exp(u, 1 << i)?.to_matrix();
        let state = gate::controlled_u_state(eigenstate, &control, &u_k)?;
        *slot = gate::trace_out_control(&state)?;
    }

    inverse_qft(&StateVector::from_qubits(register)?)
}

/// Reads the binary fraction 0.b1 b2 ... bt out of a phase-estimation
/// register: bit `i` is set when qubit `i` is closer to |1> than to |0>.
pub fn estimate_phase(register: &StateVector) -> CircuitResult<f32> {
    let mut phase = 0.0f32;
    for i in 0..register.len() {
        let qubit = register.qubit(i)?;
        if qubit.beta().norm_sqr() > 0.5 {
            phase += 1.0 / 2f32.powi(i as i32 + 1);
        }
    }
    Ok(phase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex32;

    fn c(re: f32, im: f32) -> Complex32 {
        Complex32::new(re, im)
    }

    #[test]
    fn test_qft_on_two_zeros() {
        let h = std::f32::consts::FRAC_1_SQRT_2;
        let state = StateVector::zeros(2).unwrap();
        let result = qft(&state).unwrap();
        let plus = Qubit::new(c(h, 0.0), c(h, 0.0)).unwrap();
        let expected = StateVector::from_qubits(vec![plus, plus]).unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_qft_on_zero_one() {
        let h = std::f32::consts::FRAC_1_SQRT_2;
        let state =
            StateVector::from_qubits(vec![Qubit::ket_zero(), Qubit::ket_one()]).unwrap();
        let result = qft(&state).unwrap();
        let expected = StateVector::from_qubits(vec![
            Qubit::new(c(h, 0.0), c(-h, 0.0)).unwrap(),
            Qubit::new(c(h, 0.0), c(0.0, h)).unwrap(),
        ])
        .unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_qft_inverse_qft_roundtrip() {
        // |01001>
        let state = StateVector::from_qubits(vec![
            Qubit::ket_zero(),
            Qubit::ket_one(),
            Qubit::ket_zero(),
            Qubit::ket_zero(),
            Qubit::ket_one(),
        ])
        .unwrap();
        let transformed = qft(&state).unwrap();
        let restored = inverse_qft(&transformed).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_qpe_reads_a_half_turn_phase() {
        // diag(1, e^(i pi)) has eigenphase 0.5 (of a full turn) on |1>.
        let u = gate::phase_shift(std::f32::consts::PI);
        let register = qpe(&Qubit::ket_one(), &u, 1).unwrap();
        assert_eq!(register.len(), 1);
        assert_eq!(register.qubit(0).unwrap(), Qubit::ket_one());
        assert!((estimate_phase(&register).unwrap() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_qpe_reads_a_zero_phase() {
        let register = qpe(&Qubit::ket_one(), &DenseMatrix::identity2(), 1).unwrap();
        assert_eq!(register.qubit(0).unwrap(), Qubit::ket_zero());
        assert!(estimate_phase(&register).unwrap().abs() < 1e-6);
    }

    #[test]
    fn test_qpe_rejects_empty_register() {
        let u = DenseMatrix::identity2();
        assert!(matches!(
            qpe(&Qubit::ket_one(), &u, 0),
            Err(CircuitError::ShapeMismatch(_))
        ));
    }
}
