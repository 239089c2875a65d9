//! Gate primitives
//!
//! Gate application is a deferred matrix-vector product; the controlled-U
//! construction is the block-diagonal sum P0 (x) I + P1 (x) U built as two
//! tensor-product graphs. Two-qubit results are collapsed back to single
//! qubits through the closed-form reduced density matrices of the 2-qubit
//! case; only that case is supported.

use num_complex::Complex32;
use qusim2_algebra::{engine, LazyOperation};
use qusim2_core::{approx_equal, norm_sq, DenseMatrix};

use crate::error::{CircuitError, CircuitResult};
use crate::qubit::Qubit;

/// Applies `gate` to `state` as a deferred matrix-vector product.
pub fn apply_gate(gate: &DenseMatrix, state: &DenseMatrix) -> CircuitResult<LazyOperation> {
    Ok(engine::matvec(gate, state)?)
}

/// The Hadamard gate applied to a single qubit.
pub fn hadamard(qubit: &Qubit) -> CircuitResult<Qubit> {
    let vect = qubit.to_vector();
    let result = engine::matvec(&DenseMatrix::hadamard2(), &vect)?;
    Qubit::from_lazy(&result)
}

/// The phase-shift gate diag(1, e^(i theta)).
pub fn phase_shift(theta: f32) -> DenseMatrix {
    let rows = [
        vec![Complex32::new(1.0, 0.0), Complex32::new(0.0, 0.0)],
        vec![Complex32::new(0.0, 0.0), Complex32::cis(theta)],
    ];
    match DenseMatrix::from_rows(&rows) {
        Ok(mat) => mat,
        Err(_) => unreachable!("phase-shift rows are rectangular"),
    }
}

/// The controlled-phase rotation gate R_k, diag(1, e^(2 pi i / 2^k)),
/// negated when `inverse` is set.
pub fn r_k(k: u32, inverse: bool) -> DenseMatrix {
    let theta = 2.0 * std::f32::consts::PI / 2f32.powi(k as i32);
    phase_shift(if inverse { -theta } else { theta })
}

/// Builds the controlled-U matrix for a single-qubit `u` as the graph
/// P0 (x) I + P1 (x) U.
pub fn make_controlled_u(u: &DenseMatrix) -> CircuitResult<LazyOperation> {
    let identity = LazyOperation::identity(u.rows());
    let idle = engine::tensor_product(&DenseMatrix::proj_zero(), &identity)?;
    let active = engine::tensor_product(&DenseMatrix::proj_one(), u)?;
    Ok(engine::matsum(&idle, &active)?)
}

fn verify_square2(u: &DenseMatrix) -> CircuitResult<()> {
    if u.rows() != 2 || u.cols() != 2 {
        return Err(CircuitError::ShapeMismatch(format!(
            "controlled-U takes a 2x2 gate, got {}x{}",
            u.rows(),
            u.cols()
        )));
    }
    Ok(())
}

fn verify_unitary(u: &DenseMatrix) -> CircuitResult<()> {
    if !engine::is_unitary(u) {
        return Err(CircuitError::NormViolation(
            "gate matrix is not unitary".to_string(),
        ));
    }
    Ok(())
}

/// Applies controlled-U to `|control> (x) |target>` and returns the
/// transformed target qubit, extracted through its reduced density matrix.
///
/// # Errors
///
/// Rejects a non-2x2 or non-unitary `u`.
pub fn controlled_u(target: &Qubit, control: &Qubit, u: &DenseMatrix) -> CircuitResult<Qubit> {
    let state = controlled_u_state(target, control, u)?;
    trace_out_target(&state)
}

/// Applies controlled-U to `|control> (x) |target>` and returns the full
/// 1x4 joint state graph.
pub fn controlled_u_state(
    target: &Qubit,
    control: &Qubit,
    u: &DenseMatrix,
) -> CircuitResult<LazyOperation> {
    verify_square2(u)?;
    verify_unitary(u)?;
    let controlled = make_controlled_u(u)?;
    let control_vect = control.to_vector();
    let target_vect = target.to_vector();
    let state = engine::tensor_product(&control_vect, &target_vect)?;
    Ok(engine::matvec(&controlled, &state)?)
}

fn verify_joint_state(s: &LazyOperation) -> CircuitResult<()> {
    if s.rows() != 1 || s.cols() != 4 {
        return Err(CircuitError::ShapeMismatch(format!(
            "cannot compute a reduced density matrix for a state of size ({}x{}) != (1, 4)",
            s.rows(),
            s.cols()
        )));
    }
    Ok(())
}

fn density_matrix(rows: [[Complex32; 2]; 2]) -> DenseMatrix {
    match DenseMatrix::from_rows(&[rows[0].to_vec(), rows[1].to_vec()]) {
        Ok(mat) => mat,
        Err(_) => unreachable!("density-matrix rows are rectangular"),
    }
}

/// Reduced density matrix of the control qubit of a 1x4 joint state.
fn reduced_density_control(s: &LazyOperation) -> CircuitResult<DenseMatrix> {
    verify_joint_state(s)?;
    let alpha = s.get(0, 0);
    let beta = s.get(0, 1);
    let gamma = s.get(0, 2);
    let delta = s.get(0, 3);
    Ok(density_matrix([
        [
            Complex32::new(alpha.norm_sqr() + beta.norm_sqr(), 0.0),
            alpha * gamma.conj() + beta * delta.conj(),
        ],
        [
            gamma * alpha.conj() + delta * beta.conj(),
            Complex32::new(gamma.norm_sqr() + delta.norm_sqr(), 0.0),
        ],
    ]))
}

/// Reduced density matrix of the target qubit of a 1x4 joint state.
fn reduced_density_target(s: &LazyOperation) -> CircuitResult<DenseMatrix> {
    verify_joint_state(s)?;
    let alpha = s.get(0, 0);
    let beta = s.get(0, 1);
    let gamma = s.get(0, 2);
    let delta = s.get(0, 3);
    Ok(density_matrix([
        [
            Complex32::new(alpha.norm_sqr() + gamma.norm_sqr(), 0.0),
            alpha * beta.conj() + gamma * delta.conj(),
        ],
        [
            beta * alpha.conj() + delta * gamma.conj(),
            Complex32::new(beta.norm_sqr() + delta.norm_sqr(), 0.0),
        ],
    ]))
}

/// Recovers the qubit a reduced density matrix describes, solving
/// (rho - I) v = 0 and renormalising.
fn collapse(reduced: &DenseMatrix) -> CircuitResult<Qubit> {
    let zero = Complex32::new(0.0, 0.0);
    let one = Complex32::new(1.0, 0.0);

    let mut alpha = reduced.get(0, 0) - one;
    let mut beta = reduced.get(0, 1);
    if approx_equal(alpha, zero) && approx_equal(beta, zero) {
        alpha = reduced.get(1, 0);
        beta = reduced.get(1, 1) - one;
    }

    if approx_equal(alpha, zero) {
        alpha = one;
        beta = zero;
    } else if approx_equal(beta, zero) {
        alpha = zero;
        beta = one;
    } else {
        beta = (-alpha) / beta;
        alpha = one;
        let norm = norm_sq(alpha, beta).sqrt();
        alpha /= norm;
        beta /= norm;
    }

    Qubit::new(alpha, beta)
}

/// Extracts the control qubit of a 1x4 joint state.
pub fn trace_out_control(s: &LazyOperation) -> CircuitResult<Qubit> {
    collapse(&reduced_density_control(s)?)
}

/// Extracts the target qubit of a 1x4 joint state.
pub fn trace_out_target(s: &LazyOperation) -> CircuitResult<Qubit> {
    collapse(&reduced_density_target(s)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f32, im: f32) -> Complex32 {
        Complex32::new(re, im)
    }

    #[test]
    fn test_hadamard_on_ket_zero() {
        let h = std::f32::consts::FRAC_1_SQRT_2;
        let result = hadamard(&Qubit::ket_zero()).unwrap();
        let expected = Qubit::new(c(h, 0.0), c(h, 0.0)).unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_hadamard_twice_restores_the_state() {
        let q = Qubit::ket_one();
        let back = hadamard(&hadamard(&q).unwrap()).unwrap();
        assert_eq!(back, q);
    }

    #[test]
    fn test_phase_shift_diagonal() {
        let theta = std::f32::consts::FRAC_PI_2;
        let gate = phase_shift(theta);
        assert!(approx_equal(gate.get(0, 0), c(1.0, 0.0)));
        assert!(approx_equal(gate.get(0, 1), c(0.0, 0.0)));
        assert!(approx_equal(gate.get(1, 1), c(0.0, 1.0)));
    }

    #[test]
    fn test_r_k_and_its_inverse_cancel() {
        let forward = r_k(3, false);
        let backward = r_k(3, true);
        let product = engine::matmul(&forward, &backward).unwrap().to_matrix();
        assert_eq!(product, DenseMatrix::identity2());
    }

    #[test]
    fn test_make_controlled_u_of_x_is_cnot() {
        let cnot = make_controlled_u(&DenseMatrix::pauli_x())
            .unwrap()
            .to_matrix();
        let expected = DenseMatrix::from_rows(&[
            vec![c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.0, 0.0)],
            vec![c(0.0, 0.0), c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0)],
            vec![c(0.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(1.0, 0.0)],
            vec![c(0.0, 0.0), c(0.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)],
        ])
        .unwrap();
        assert_eq!(cnot, expected);
    }

    #[test]
    fn test_controlled_x_flips_target_when_control_is_one() {
        let result = controlled_u(&Qubit::ket_zero(), &Qubit::ket_one(), &DenseMatrix::pauli_x())
            .unwrap();
        assert_eq!(result, Qubit::ket_one());
    }

    #[test]
    fn test_controlled_x_leaves_target_when_control_is_zero() {
        let result = controlled_u(&Qubit::ket_zero(), &Qubit::ket_zero(), &DenseMatrix::pauli_x())
            .unwrap();
        assert_eq!(result, Qubit::ket_zero());
    }

    #[test]
    fn test_controlled_u_rejects_non_unitary_gate() {
        let scaled = engine::scalar_product(&DenseMatrix::pauli_x(), c(2.0, 0.0))
            .unwrap()
            .to_matrix();
        let result = controlled_u(&Qubit::ket_zero(), &Qubit::ket_one(), &scaled);
        assert!(matches!(result, Err(CircuitError::NormViolation(_))));
    }

    #[test]
    fn test_controlled_u_rejects_wrong_shape() {
        let big = LazyOperation::identity(4).to_matrix();
        let result = controlled_u(&Qubit::ket_zero(), &Qubit::ket_one(), &big);
        assert!(matches!(result, Err(CircuitError::ShapeMismatch(_))));
    }

    #[test]
    fn test_trace_out_recovers_product_state_factors() {
        // |1> (x) |0>: control traces to |1>, target to |0>.
        let control = Qubit::ket_one();
        let target = Qubit::ket_zero();
        let control_vect = control.to_vector();
        let target_vect = target.to_vector();
        let state = engine::tensor_product(&control_vect, &target_vect).unwrap();
        assert_eq!(trace_out_control(&state).unwrap(), control);
        assert_eq!(trace_out_target(&state).unwrap(), target);
    }

    #[test]
    fn test_trace_out_rejects_wrong_size() {
        let not_joint = LazyOperation::wrap(DenseMatrix::ket_zero());
        assert!(matches!(
            trace_out_control(&not_joint),
            Err(CircuitError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_apply_gate_matches_matvec() {
        let state = DenseMatrix::ket_zero();
        let applied = apply_gate(&DenseMatrix::pauli_x(), &state).unwrap();
        assert!(approx_equal(applied.get(0, 0), c(0.0, 0.0)));
        assert!(approx_equal(applied.get(0, 1), c(1.0, 0.0)));
    }
}
