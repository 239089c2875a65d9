//! Graph factories
//!
//! One factory per algebraic operation. Each validates operand shapes up
//! front, then returns a freshly allocated [`LazyOperation`] owning its
//! data; nothing is computed until the graph is read. Operands may be dense
//! matrices or existing graphs wherever that combination is meaningful -
//! pass either, the [`Operand`] conversion covers both.

use std::sync::Arc;

use num_complex::Complex32;
use qusim2_core::{approx_equal, simd, DenseMatrix};

use crate::error::{AlgebraError, AlgebraResult};
use crate::kernels;
use crate::lazy::LazyOperation;
use crate::node::{MatMatRow, OpMatRow, OpOpRow};

/// Either operand form accepted by the polymorphic factories.
#[derive(Clone, Copy, Debug)]
pub enum Operand<'a> {
    /// A materialised matrix leaf.
    Dense(&'a DenseMatrix),
    /// An existing deferred graph.
    Lazy(&'a LazyOperation),
}

impl Operand<'_> {
    /// Row count of the operand's value.
    pub fn rows(&self) -> usize {
        match self {
            Operand::Dense(m) => m.rows(),
            Operand::Lazy(g) => g.rows(),
        }
    }

    /// Column count of the operand's value.
    pub fn cols(&self) -> usize {
        match self {
            Operand::Dense(m) => m.cols(),
            Operand::Lazy(g) => g.cols(),
        }
    }
}

impl<'a> From<&'a DenseMatrix> for Operand<'a> {
    fn from(mat: &'a DenseMatrix) -> Self {
        Operand::Dense(mat)
    }
}

impl<'a> From<&'a LazyOperation> for Operand<'a> {
    fn from(graph: &'a LazyOperation) -> Self {
        Operand::Lazy(graph)
    }
}

fn require_vector(operand: Operand<'_>, name: &str) -> AlgebraResult<()> {
    if operand.rows() != 1 {
        return Err(AlgebraError::ShapeMismatch(format!(
            "{} must be a 1xN vector, got {}x{}",
            name,
            operand.rows(),
            operand.cols()
        )));
    }
    Ok(())
}

/// Conjugate transpose of a matrix, `A-dagger`.
///
/// The graph's right operand slot holds an empty placeholder; only the left
/// matrix is read.
pub fn conjugate_transpose(mat: &DenseMatrix) -> AlgebraResult<LazyOperation> {
    Ok(LazyOperation::from_pair(
        mat.clone(),
        DenseMatrix::empty(),
        Arc::new(kernels::conjugate_transpose_elem),
        Arc::new(kernels::conjugate_transpose_row),
        mat.cols(),
        mat.rows(),
    ))
}

/// Inner product of two vectors, `<u, v>` with `u` conjugated.
pub fn inner_product(u: &DenseMatrix, v: &DenseMatrix) -> AlgebraResult<LazyOperation> {
    require_vector(u.into(), "inner product left operand")?;
    require_vector(v.into(), "inner product right operand")?;
    if u.cols() != v.cols() {
        return Err(AlgebraError::ShapeMismatch(format!(
            "inner product operands must have equal length, got {} and {}",
            u.cols(),
            v.cols()
        )));
    }
    Ok(LazyOperation::from_pair(
        u.clone(),
        v.clone(),
        Arc::new(kernels::inner_product_elem),
        Arc::new(kernels::inner_product_row),
        1,
        1,
    ))
}

/// Matrix multiplication, `L * R`.
pub fn matmul<'a>(
    left: impl Into<Operand<'a>>,
    right: impl Into<Operand<'a>>,
) -> AlgebraResult<LazyOperation> {
    let left = left.into();
    let right = right.into();
    if left.cols() != right.rows() {
        return Err(AlgebraError::ShapeMismatch(format!(
            "cannot multiply {}x{} by {}x{}",
            left.rows(),
            left.cols(),
            right.rows(),
            right.cols()
        )));
    }
    let rows = left.rows();
    let cols = right.cols();
    Ok(match (left, right) {
        (Operand::Dense(l), Operand::Dense(r)) => LazyOperation::from_pair(
            l.clone(),
            r.clone(),
            Arc::new(kernels::matmul_mat_mat_elem),
            Arc::new(kernels::matmul_mat_mat_row),
            rows,
            cols,
        ),
        (Operand::Lazy(l), Operand::Dense(r)) => {
            let mut graph = l.clone();
            graph.append_matrix(
                r.clone(),
                Arc::new(kernels::matmul_op_mat_elem),
                Arc::new(kernels::matmul_op_mat_row),
                rows,
                cols,
            );
            graph
        }
        (Operand::Dense(l), Operand::Lazy(r)) => {
            let mut graph = LazyOperation::wrap(l.clone());
            graph.append_lazy(
                r,
                Arc::new(kernels::matmul_op_op_elem),
                Arc::new(kernels::matmul_op_op_row),
                rows,
                cols,
            );
            graph
        }
        (Operand::Lazy(l), Operand::Lazy(r)) => {
            let mut graph = l.clone();
            graph.append_lazy(
                r,
                Arc::new(kernels::matmul_op_op_elem),
                Arc::new(kernels::matmul_op_op_row),
                rows,
                cols,
            );
            graph
        }
    })
}

/// Matrix exponentiation by repeated multiplication, `M^k`.
///
/// Exponent 0 yields the lazy identity of matching size; each further
/// increment appends one multiplication to the graph.
pub fn matrix_exp(mat: &DenseMatrix, k: usize) -> AlgebraResult<LazyOperation> {
    if mat.rows() != mat.cols() {
        return Err(AlgebraError::ShapeMismatch(format!(
            "matrix exponentiation requires a square matrix, got {}x{}",
            mat.rows(),
            mat.cols()
        )));
    }
    if k == 0 {
        return Ok(LazyOperation::identity(mat.rows()));
    }
    let mut graph = LazyOperation::wrap(mat.clone());
    for _ in 1..k {
        graph.append_matrix(
            mat.clone(),
            Arc::new(kernels::matmul_op_mat_elem),
            Arc::new(kernels::matmul_op_mat_row),
            mat.rows(),
            mat.cols(),
        );
    }
    Ok(graph)
}

/// Matrix-vector product, `M * v` with `v` a 1xN row vector. The result is
/// the transformed vector, again 1xN.
pub fn matvec<'a>(
    mat: impl Into<Operand<'a>>,
    vect: impl Into<Operand<'a>>,
) -> AlgebraResult<LazyOperation> {
    let mat = mat.into();
    let vect = vect.into();
    require_vector(vect, "matrix-vector product right operand")?;
    if mat.rows() != mat.cols() || mat.cols() != vect.cols() {
        return Err(AlgebraError::ShapeMismatch(format!(
            "cannot apply {}x{} matrix to a vector of length {}",
            mat.rows(),
            mat.cols(),
            vect.cols()
        )));
    }
    let cols = vect.cols();
    Ok(match (mat, vect) {
        (Operand::Dense(m), Operand::Dense(v)) => LazyOperation::from_pair(
            m.clone(),
            v.clone(),
            Arc::new(kernels::matvec_mat_mat_elem),
            Arc::new(kernels::matvec_mat_mat_row),
            1,
            cols,
        ),
        (Operand::Lazy(m), Operand::Dense(v)) => {
            let mut graph = m.clone();
            graph.append_matrix(
                v.clone(),
                Arc::new(kernels::matvec_op_mat_elem),
                Arc::new(kernels::matvec_op_mat_row),
                1,
                cols,
            );
            graph
        }
        (Operand::Dense(m), Operand::Lazy(v)) => {
            let mut graph = LazyOperation::wrap(m.clone());
            graph.append_lazy(
                v,
                Arc::new(kernels::matvec_op_op_elem),
                Arc::new(kernels::matvec_op_op_row),
                1,
                cols,
            );
            graph
        }
        (Operand::Lazy(m), Operand::Lazy(v)) => {
            let mut graph = m.clone();
            graph.append_lazy(
                v,
                Arc::new(kernels::matvec_op_op_elem),
                Arc::new(kernels::matvec_op_op_row),
                1,
                cols,
            );
            graph
        }
    })
}

/// Outer product of two vectors, `u * v-dagger`.
pub fn outer_product(u: &DenseMatrix, v: &DenseMatrix) -> AlgebraResult<LazyOperation> {
    require_vector(u.into(), "outer product left operand")?;
    require_vector(v.into(), "outer product right operand")?;
    Ok(LazyOperation::from_pair(
        u.clone(),
        v.clone(),
        Arc::new(kernels::outer_product_elem),
        Arc::new(kernels::outer_product_row),
        u.cols(),
        v.cols(),
    ))
}

/// Scalar product, `k * M`. The scalar rides in the graph as a 1x1 matrix.
pub fn scalar_product(mat: &DenseMatrix, k: Complex32) -> AlgebraResult<LazyOperation> {
    Ok(LazyOperation::from_pair(
        mat.clone(),
        DenseMatrix::from_scalar(k),
        Arc::new(kernels::scalar_product_elem),
        Arc::new(kernels::scalar_product_row),
        mat.rows(),
        mat.cols(),
    ))
}

/// Element-wise sum, `L + R`. Dimensions must match exactly.
pub fn matsum<'a>(
    left: impl Into<Operand<'a>>,
    right: impl Into<Operand<'a>>,
) -> AlgebraResult<LazyOperation> {
    let left = left.into();
    let right = right.into();
    if left.rows() != right.rows() || left.cols() != right.cols() {
        return Err(AlgebraError::ShapeMismatch(format!(
            "cannot sum {}x{} and {}x{}",
            left.rows(),
            left.cols(),
            right.rows(),
            right.cols()
        )));
    }
    let rows = left.rows();
    let cols = left.cols();
    Ok(match (left, right) {
        (Operand::Dense(l), Operand::Dense(r)) => LazyOperation::from_pair(
            l.clone(),
            r.clone(),
            Arc::new(kernels::sum_mat_mat_elem),
            Arc::new(kernels::sum_mat_mat_row),
            rows,
            cols,
        ),
        (Operand::Lazy(l), Operand::Dense(r)) => {
            let mut graph = l.clone();
            graph.append_matrix(
                r.clone(),
                Arc::new(kernels::sum_op_mat_elem),
                Arc::new(kernels::sum_op_mat_row),
                rows,
                cols,
            );
            graph
        }
        (Operand::Dense(l), Operand::Lazy(r)) => {
            let mut graph = LazyOperation::wrap(l.clone());
            graph.append_lazy(
                r,
                Arc::new(kernels::sum_op_op_elem),
                Arc::new(kernels::sum_op_op_row),
                rows,
                cols,
            );
            graph
        }
        (Operand::Lazy(l), Operand::Lazy(r)) => {
            let mut graph = l.clone();
            graph.append_lazy(
                r,
                Arc::new(kernels::sum_op_op_elem),
                Arc::new(kernels::sum_op_op_row),
                rows,
                cols,
            );
            graph
        }
    })
}

/// Tensor (Kronecker) product, `L (x) R`.
///
/// When both operands are 1xN vectors a specialised row kernel computes the
/// output row in a single scaled-concatenation pass.
pub fn tensor_product<'a>(
    left: impl Into<Operand<'a>>,
    right: impl Into<Operand<'a>>,
) -> AlgebraResult<LazyOperation> {
    let left = left.into();
    let right = right.into();
    let vector_pair = left.rows() == 1 && right.rows() == 1;
    let rows = left.rows() * right.rows();
    let cols = left.cols() * right.cols();
    Ok(match (left, right) {
        (Operand::Dense(l), Operand::Dense(r)) => {
            let row: MatMatRow = if vector_pair {
                Arc::new(kernels::vv_tensor_mat_mat_row)
            } else {
                Arc::new(kernels::tensor_mat_mat_row)
            };
            LazyOperation::from_pair(
                l.clone(),
                r.clone(),
                Arc::new(kernels::tensor_mat_mat_elem),
                row,
                rows,
                cols,
            )
        }
        (Operand::Lazy(l), Operand::Dense(r)) => {
            let row: OpMatRow = if vector_pair {
                Arc::new(kernels::vv_tensor_op_mat_row)
            } else {
                Arc::new(kernels::tensor_op_mat_row)
            };
            let mut graph = l.clone();
            graph.append_matrix(
                r.clone(),
                Arc::new(kernels::tensor_op_mat_elem),
                row,
                rows,
                cols,
            );
            graph
        }
        (Operand::Dense(l), Operand::Lazy(r)) => {
            let row: OpOpRow = if vector_pair {
                Arc::new(kernels::vv_tensor_op_op_row)
            } else {
                Arc::new(kernels::tensor_op_op_row)
            };
            let mut graph = LazyOperation::wrap(l.clone());
            graph.append_lazy(r, Arc::new(kernels::tensor_op_op_elem), row, rows, cols);
            graph
        }
        (Operand::Lazy(l), Operand::Lazy(r)) => {
            let row: OpOpRow = if vector_pair {
                Arc::new(kernels::vv_tensor_op_op_row)
            } else {
                Arc::new(kernels::tensor_op_op_row)
            };
            let mut graph = l.clone();
            graph.append_lazy(r, Arc::new(kernels::tensor_op_op_elem), row, rows, cols);
            graph
        }
    })
}

/// Repeated tensor product, `M (x) M (x) ... (x) M` with `n` factors.
pub fn tensor_power(mat: &DenseMatrix, n: usize) -> AlgebraResult<LazyOperation> {
    if n == 0 {
        return Err(AlgebraError::ShapeMismatch(
            "tensor power requires at least one factor".to_string(),
        ));
    }
    let mut graph = LazyOperation::wrap(mat.clone());
    for _ in 1..n {
        let rows = graph.rows() * mat.rows();
        let cols = graph.cols() * mat.cols();
        graph.append_matrix(
            mat.clone(),
            Arc::new(kernels::tensor_op_mat_elem),
            Arc::new(kernels::tensor_op_mat_row),
            rows,
            cols,
        );
    }
    Ok(graph)
}

fn unitarity_product(mat: &DenseMatrix) -> Option<LazyOperation> {
    let dagger = conjugate_transpose(mat).ok()?;
    let wrapped = LazyOperation::wrap(mat.clone());
    matmul(&wrapped, &dagger).ok()
}

/// Fast unitarity check.
///
/// Builds the graph `M * M-dagger` and scans its rows: for a unitary `M`
/// each row is a standard basis vector, so both the diagonal element and
/// the row sum must be 1. This is a heuristic - necessary but not
/// sufficient - and a crafted non-unitary matrix can pass it; use
/// [`is_unitary_strict`] when certainty matters more than speed.
pub fn is_unitary(mat: &DenseMatrix) -> bool {
    if mat.rows() != mat.cols() {
        return false;
    }
    let Some(product) = unitarity_product(mat) else {
        return false;
    };
    let one = Complex32::new(1.0, 0.0);
    for m in 0..product.rows() {
        if !approx_equal(product.get(m, m), one) {
            return false;
        }
        if !approx_equal(simd::cvsve(&product.row(m)), one) {
            return false;
        }
    }
    true
}

/// Strict unitarity check: compares every element of `M * M-dagger`
/// against the identity.
pub fn is_unitary_strict(mat: &DenseMatrix) -> bool {
    if mat.rows() != mat.cols() {
        return false;
    }
    let Some(product) = unitarity_product(mat) else {
        return false;
    };
    for m in 0..product.rows() {
        let row = product.row(m);
        for n in 0..product.cols() {
            let expected = if m == n { 1.0 } else { 0.0 };
            if !approx_equal(row.get(n), Complex32::new(expected, 0.0)) {
                return false;
            }
        }
    }
    true
}
