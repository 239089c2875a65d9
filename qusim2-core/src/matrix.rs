//! Dense vectorised matrix
//!
//! A complex matrix held as one row-major contiguous buffer with explicit
//! row and column counts, so that whole rows feed the SIMD kernels without
//! gathering. Includes the library of constant gates and kets the circuit
//! layer builds on.

use ndarray::Array2;
use num_complex::Complex32;

use crate::error::{CoreError, CoreResult};
use crate::scalar::DEFAULT_TOLERANCE;
use crate::simd;
use crate::split::SplitVector;

/// A dense complex matrix in row-major vectorised form.
///
/// Valid shapes include empty (0x0), scalar (1x1), vector (1xn) and general
/// (mxn). Instances are immutable after construction.
///
/// # Examples
///
/// ```
/// use qusim2_core::DenseMatrix;
/// use num_complex::Complex32;
///
/// let m = DenseMatrix::from_rows(&[
///     vec![Complex32::new(1.0, 0.0), Complex32::new(2.0, 0.0)],
///     vec![Complex32::new(3.0, 0.0), Complex32::new(4.0, 0.0)],
/// ]).unwrap();
/// assert_eq!(m.get(1, 0), Complex32::new(3.0, 0.0));
/// assert_eq!(m.row(0).len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<Complex32>,
}

impl DenseMatrix {
    /// Builds a matrix from a 2-D sequence of rows.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ShapeMismatch`] if the rows are ragged.
    pub fn from_rows(rows: &[Vec<Complex32>]) -> CoreResult<Self> {
        let row_count = rows.len();
        let col_count = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(row_count * col_count);
        for (m, row) in rows.iter().enumerate() {
            if row.len() != col_count {
                return Err(CoreError::ShapeMismatch(format!(
                    "row {} has {} columns, expected {}",
                    m,
                    row.len(),
                    col_count
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: row_count,
            cols: col_count,
            data,
        })
    }

    /// Builds a matrix from a flat row-major buffer and an explicit shape.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ShapeMismatch`] if the buffer length is not
    /// `rows * cols`.
    pub fn from_vec(data: Vec<Complex32>, rows: usize, cols: usize) -> CoreResult<Self> {
        if data.len() != rows * cols {
            return Err(CoreError::ShapeMismatch(format!(
                "buffer of {} elements cannot form a {}x{} matrix",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a 1xn row vector.
    pub fn from_vector(values: &[Complex32]) -> Self {
        Self {
            rows: 1,
            cols: values.len(),
            data: values.to_vec(),
        }
    }

    /// Builds a 1x1 scalar matrix.
    pub fn from_scalar(value: Complex32) -> Self {
        Self {
            rows: 1,
            cols: 1,
            data: vec![value],
        }
    }

    /// The empty 0x0 matrix, used as a placeholder operand.
    pub fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            data: Vec::new(),
        }
    }

    /// Builds a matrix from an `ndarray` 2-D array.
    pub fn from_array2(array: &Array2<Complex32>) -> Self {
        let (rows, cols) = array.dim();
        let data = array.iter().copied().collect();
        Self { rows, cols, data }
    }

    /// Converts into an `ndarray` 2-D array.
    pub fn to_array2(&self) -> Array2<Complex32> {
        Array2::from_shape_fn((self.rows, self.cols), |(m, n)| self.get(m, n))
    }

    /// Element at `(m, n)`. Panics if out of range.
    pub fn get(&self, m: usize, n: usize) -> Complex32 {
        assert!(
            m < self.rows && n < self.cols,
            "index ({m}, {n}) out of range for {}x{} matrix",
            self.rows,
            self.cols
        );
        self.data[m * self.cols + n]
    }

    /// Row `m` as a split vector of length `cols`. Panics if out of range.
    pub fn row(&self, m: usize) -> SplitVector {
        assert!(
            m < self.rows,
            "row {m} out of range for {}x{} matrix",
            self.rows,
            self.cols
        );
        let start = m * self.cols;
        SplitVector::from_complex(&self.data[start..start + self.cols])
    }

    /// Column `n` as a split vector of length `rows`, gathered by strided
    /// access. Panics if out of range.
    pub fn column(&self, n: usize) -> SplitVector {
        assert!(
            n < self.cols,
            "column {n} out of range for {}x{} matrix",
            self.rows,
            self.cols
        );
        let mut result = SplitVector::with_capacity(self.rows);
        for m in 0..self.rows {
            result.push(self.data[m * self.cols + n]);
        }
        result
    }

    /// The whole matrix flattened row-major into a single split vector.
    pub fn split(&self) -> SplitVector {
        SplitVector::from_complex(&self.data)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }
}

/// Element-wise equality within the default tolerance: dimensions must
/// match and the summed element difference must vanish.
impl PartialEq for DenseMatrix {
    fn eq(&self, other: &Self) -> bool {
        if self.rows != other.rows || self.cols != other.cols {
            return false;
        }
        let diff = simd::cvsub(&self.split(), &other.split());
        simd::cvsve(&diff).norm() < DEFAULT_TOLERANCE
    }
}

/// Constant gates, kets and projectors.
///
/// Each factory returns a fresh owned value; there is no shared instance to
/// alias or mutate.
impl DenseMatrix {
    /// |0> as a 1x2 row vector.
    pub fn ket_zero() -> Self {
        Self::from_vector(&[Complex32::new(1.0, 0.0), Complex32::new(0.0, 0.0)])
    }

    /// |1> as a 1x2 row vector.
    pub fn ket_one() -> Self {
        Self::from_vector(&[Complex32::new(0.0, 0.0), Complex32::new(1.0, 0.0)])
    }

    /// |+> = (|0> + |1>) / sqrt(2).
    pub fn ket_plus() -> Self {
        let h = std::f32::consts::FRAC_1_SQRT_2;
        Self::from_vector(&[Complex32::new(h, 0.0), Complex32::new(h, 0.0)])
    }

    /// |-> = (|0> - |1>) / sqrt(2).
    pub fn ket_minus() -> Self {
        let h = std::f32::consts::FRAC_1_SQRT_2;
        Self::from_vector(&[Complex32::new(h, 0.0), Complex32::new(-h, 0.0)])
    }

    /// The 2x2 identity.
    pub fn identity2() -> Self {
        Self {
            rows: 2,
            cols: 2,
            data: vec![
                Complex32::new(1.0, 0.0),
                Complex32::new(0.0, 0.0),
                Complex32::new(0.0, 0.0),
                Complex32::new(1.0, 0.0),
            ],
        }
    }

    /// The 2x2 Hadamard gate.
    pub fn hadamard2() -> Self {
        let h = std::f32::consts::FRAC_1_SQRT_2;
        Self {
            rows: 2,
            cols: 2,
            data: vec![
                Complex32::new(h, 0.0),
                Complex32::new(h, 0.0),
                Complex32::new(h, 0.0),
                Complex32::new(-h, 0.0),
            ],
        }
    }

    /// The Pauli X gate.
    pub fn pauli_x() -> Self {
        Self {
            rows: 2,
            cols: 2,
            data: vec![
                Complex32::new(0.0, 0.0),
                Complex32::new(1.0, 0.0),
                Complex32::new(1.0, 0.0),
                Complex32::new(0.0, 0.0),
            ],
        }
    }

    /// The Pauli Y gate.
    pub fn pauli_y() -> Self {
        Self {
            rows: 2,
            cols: 2,
            data: vec![
                Complex32::new(0.0, 0.0),
                Complex32::new(0.0, -1.0),
                Complex32::new(0.0, 1.0),
                Complex32::new(0.0, 0.0),
            ],
        }
    }

    /// The Pauli Z gate.
    pub fn pauli_z() -> Self {
        Self {
            rows: 2,
            cols: 2,
            data: vec![
                Complex32::new(1.0, 0.0),
                Complex32::new(0.0, 0.0),
                Complex32::new(0.0, 0.0),
                Complex32::new(-1.0, 0.0),
            ],
        }
    }

    /// The projector |0><0|.
    pub fn proj_zero() -> Self {
        Self {
            rows: 2,
            cols: 2,
            data: vec![
                Complex32::new(1.0, 0.0),
                Complex32::new(0.0, 0.0),
                Complex32::new(0.0, 0.0),
                Complex32::new(0.0, 0.0),
            ],
        }
    }

    /// The projector |1><1|.
    pub fn proj_one() -> Self {
        Self {
            rows: 2,
            cols: 2,
            data: vec![
                Complex32::new(0.0, 0.0),
                Complex32::new(0.0, 0.0),
                Complex32::new(0.0, 0.0),
                Complex32::new(1.0, 0.0),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f32, im: f32) -> Complex32 {
        Complex32::new(re, im)
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let result = DenseMatrix::from_rows(&[vec![c(1.0, 0.0), c(2.0, 0.0)], vec![c(3.0, 0.0)]]);
        assert!(matches!(result, Err(CoreError::ShapeMismatch(_))));
    }

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        let result = DenseMatrix::from_vec(vec![c(1.0, 0.0); 5], 2, 3);
        assert!(matches!(result, Err(CoreError::ShapeMismatch(_))));
    }

    #[test]
    fn test_get_row_major_layout() {
        let m = DenseMatrix::from_vec(
            vec![c(1.0, 0.0), c(2.0, 0.0), c(3.0, 0.0), c(4.0, 0.0), c(5.0, 0.0), c(6.0, 0.0)],
            2,
            3,
        )
        .unwrap();
        assert_eq!(m.get(0, 2), c(3.0, 0.0));
        assert_eq!(m.get(1, 0), c(4.0, 0.0));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_get_out_of_range_panics() {
        let m = DenseMatrix::identity2();
        m.get(2, 0);
    }

    #[test]
    fn test_row_and_column_accessors() {
        let m = DenseMatrix::from_rows(&[
            vec![c(1.0, 0.0), c(2.0, 0.0)],
            vec![c(3.0, 0.0), c(4.0, 0.0)],
            vec![c(5.0, 0.0), c(6.0, 0.0)],
        ])
        .unwrap();
        let row = m.row(1);
        assert_eq!(row.to_complex(), vec![c(3.0, 0.0), c(4.0, 0.0)]);
        let col = m.column(1);
        assert_eq!(col.to_complex(), vec![c(2.0, 0.0), c(4.0, 0.0), c(6.0, 0.0)]);
    }

    #[test]
    fn test_split_flattens_row_major() {
        let m = DenseMatrix::from_rows(&[
            vec![c(1.0, 0.0), c(2.0, 0.0)],
            vec![c(3.0, 0.0), c(4.0, 0.0)],
        ])
        .unwrap();
        let flat = m.split();
        assert_eq!(
            flat.to_complex(),
            vec![c(1.0, 0.0), c(2.0, 0.0), c(3.0, 0.0), c(4.0, 0.0)]
        );
    }

    #[test]
    fn test_equality_within_tolerance() {
        let a = DenseMatrix::hadamard2();
        let mut data = a.split().to_complex();
        data[0] += c(1e-7, 0.0);
        let b = DenseMatrix::from_vec(data, 2, 2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_rejects_different_shapes() {
        assert_ne!(DenseMatrix::ket_zero(), DenseMatrix::identity2());
    }

    #[test]
    fn test_equality_rejects_different_values() {
        assert_ne!(DenseMatrix::pauli_x(), DenseMatrix::pauli_z());
    }

    #[test]
    fn test_array2_interop_roundtrip() {
        let m = DenseMatrix::pauli_y();
        let a = m.to_array2();
        assert_eq!(a[(0, 1)], c(0.0, -1.0));
        let back = DenseMatrix::from_array2(&a);
        assert_eq!(m, back);
    }

    #[test]
    fn test_constants_are_fresh_instances() {
        let a = DenseMatrix::identity2();
        let b = DenseMatrix::identity2();
        assert_eq!(a, b);
        assert_ne!(a.data.as_ptr(), b.data.as_ptr());
    }

    #[test]
    fn test_kets_are_normalised() {
        for ket in [
            DenseMatrix::ket_zero(),
            DenseMatrix::ket_one(),
            DenseMatrix::ket_plus(),
            DenseMatrix::ket_minus(),
        ] {
            assert_eq!(ket.rows(), 1);
            assert_eq!(ket.cols(), 2);
            let norm = ket.get(0, 0).norm_sqr() + ket.get(0, 1).norm_sqr();
            assert!((norm - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_empty_matrix() {
        let e = DenseMatrix::empty();
        assert_eq!(e.rows(), 0);
        assert_eq!(e.cols(), 0);
        assert!(e.split().is_empty());
    }
}
