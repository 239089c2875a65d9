//! Qubit representation

use num_complex::Complex32;
use qusim2_algebra::LazyOperation;
use qusim2_core::{approx_equal, norm_sq, DenseMatrix, DEFAULT_TOLERANCE};

use crate::error::{CircuitError, CircuitResult};

/// A unit vector in C^2, held as its amplitude pair.
///
/// The normalisation invariant |alpha|^2 + |beta|^2 = 1 is enforced at
/// every constructor; instances are immutable afterwards.
///
/// # Examples
///
/// ```
/// use qusim2_circuit::Qubit;
/// use num_complex::Complex32;
///
/// let h = std::f32::consts::FRAC_1_SQRT_2;
/// let plus = Qubit::new(Complex32::new(h, 0.0), Complex32::new(h, 0.0)).unwrap();
/// assert_eq!(plus.to_vector().cols(), 2);
///
/// // Unnormalised amplitudes are rejected.
/// assert!(Qubit::new(Complex32::new(1.0, 0.0), Complex32::new(1.0, 0.0)).is_err());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Qubit {
    alpha: Complex32,
    beta: Complex32,
}

impl Qubit {
    /// Creates a qubit from its amplitude pair.
    ///
    /// # Errors
    ///
    /// Returns [`CircuitError::NormViolation`] if the squared amplitudes do
    /// not sum to 1 within the default tolerance.
    pub fn new(alpha: Complex32, beta: Complex32) -> CircuitResult<Self> {
        let norm = norm_sq(alpha, beta);
        if (norm - 1.0).abs() >= DEFAULT_TOLERANCE {
            return Err(CircuitError::NormViolation(format!(
                "qubit must be normalised, got |alpha|^2 + |beta|^2 = {norm}"
            )));
        }
        Ok(Self { alpha, beta })
    }

    /// Reads a qubit out of a 1x2 vector.
    ///
    /// # Errors
    ///
    /// Returns [`CircuitError::ShapeMismatch`] if the matrix is not 1x2 and
    /// [`CircuitError::NormViolation`] if the amplitudes are not
    /// normalised.
    pub fn from_matrix(vect: &DenseMatrix) -> CircuitResult<Self> {
        if vect.rows() != 1 || vect.cols() != 2 {
            return Err(CircuitError::ShapeMismatch(format!(
                "a qubit is a 1x2 vector, got {}x{}",
                vect.rows(),
                vect.cols()
            )));
        }
        Self::new(vect.get(0, 0), vect.get(0, 1))
    }

    /// Reads a qubit out of a graph's root, element by element.
    ///
    /// # Errors
    ///
    /// Same contract as [`Qubit::from_matrix`].
    pub fn from_lazy(op: &LazyOperation) -> CircuitResult<Self> {
        if op.rows() != 1 || op.cols() != 2 {
            return Err(CircuitError::ShapeMismatch(format!(
                "a qubit is a 1x2 vector, got {}x{}",
                op.rows(),
                op.cols()
            )));
        }
        Self::new(op.get(0, 0), op.get(0, 1))
    }

    /// The |0> basis state.
    pub fn ket_zero() -> Self {
        Self {
            alpha: Complex32::new(1.0, 0.0),
            beta: Complex32::new(0.0, 0.0),
        }
    }

    /// The |1> basis state.
    pub fn ket_one() -> Self {
        Self {
            alpha: Complex32::new(0.0, 0.0),
            beta: Complex32::new(1.0, 0.0),
        }
    }

    /// Amplitude of |0>.
    pub fn alpha(&self) -> Complex32 {
        self.alpha
    }

    /// Amplitude of |1>.
    pub fn beta(&self) -> Complex32 {
        self.beta
    }

    /// The qubit as a 1x2 row vector.
    pub fn to_vector(&self) -> DenseMatrix {
        DenseMatrix::from_vector(&[self.alpha, self.beta])
    }
}

/// Amplitude-wise equality within the default tolerance.
impl PartialEq for Qubit {
    fn eq(&self, other: &Self) -> bool {
        approx_equal(self.alpha, other.alpha) && approx_equal(self.beta, other.beta)
    }
}
