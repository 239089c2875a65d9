//! Kernel catalogue
//!
//! One element kernel and one row kernel per algebraic operation and
//! operand-kind pair. Element kernels answer a single `(m, n)` coordinate;
//! row kernels produce a whole output row as a split vector. All numeric
//! work goes through the SIMD kernel: dot products are
//! `cvsve(cvmul(..))`, scalar rows are `cvsmul`, sums are `cvadd`.

use num_complex::Complex32;
use qusim2_core::{simd, DenseMatrix, SplitVector};

use crate::node::NodeRef;

/*
 * Conjugate transpose. The right operand is an unused placeholder.
 */

pub(crate) fn conjugate_transpose_elem(
    left: &DenseMatrix,
    _right: &DenseMatrix,
    m: usize,
    n: usize,
) -> Complex32 {
    left.get(n, m).conj()
}

pub(crate) fn conjugate_transpose_row(
    left: &DenseMatrix,
    _right: &DenseMatrix,
    row: usize,
) -> SplitVector {
    left.column(row).conj()
}

/*
 * Inner product of two 1xk vectors.
 */

pub(crate) fn inner_product_elem(
    left: &DenseMatrix,
    right: &DenseMatrix,
    _m: usize,
    _n: usize,
) -> Complex32 {
    simd::cvsve(&simd::cvmul(&left.split().conj(), &right.split()))
}

pub(crate) fn inner_product_row(
    left: &DenseMatrix,
    right: &DenseMatrix,
    _row: usize,
) -> SplitVector {
    let mut result = SplitVector::with_capacity(1);
    result.push(inner_product_elem(left, right, 0, 0));
    result
}

/*
 * Matrix multiplication.
 */

pub(crate) fn matmul_mat_mat_elem(
    left: &DenseMatrix,
    right: &DenseMatrix,
    m: usize,
    n: usize,
) -> Complex32 {
    simd::cvsve(&simd::cvmul(&left.row(m), &right.column(n)))
}

pub(crate) fn matmul_mat_mat_row(
    left: &DenseMatrix,
    right: &DenseMatrix,
    row: usize,
) -> SplitVector {
    let row_left = left.row(row);
    let mut result = SplitVector::with_capacity(right.cols());
    for n in 0..right.cols() {
        result.push(simd::cvsve(&simd::cvmul(&row_left, &right.column(n))));
    }
    result
}

pub(crate) fn matmul_op_mat_elem(
    left: NodeRef<'_>,
    right: &DenseMatrix,
    m: usize,
    n: usize,
) -> Complex32 {
    simd::cvsve(&simd::cvmul(&left.row(m), &right.column(n)))
}

pub(crate) fn matmul_op_mat_row(
    left: NodeRef<'_>,
    right: &DenseMatrix,
    row: usize,
) -> SplitVector {
    let row_left = left.row(row);
    let mut result = SplitVector::with_capacity(right.cols());
    for n in 0..right.cols() {
        result.push(simd::cvsve(&simd::cvmul(&row_left, &right.column(n))));
    }
    result
}

fn op_column(node: NodeRef<'_>, n: usize) -> SplitVector {
    let mut column = SplitVector::with_capacity(node.rows());
    for m in 0..node.rows() {
        column.push(node.get(m, n));
    }
    column
}

pub(crate) fn matmul_op_op_elem(
    left: NodeRef<'_>,
    right: NodeRef<'_>,
    m: usize,
    n: usize,
) -> Complex32 {
    simd::cvsve(&simd::cvmul(&left.row(m), &op_column(right, n)))
}

pub(crate) fn matmul_op_op_row(left: NodeRef<'_>, right: NodeRef<'_>, row: usize) -> SplitVector {
    let row_left = left.row(row);
    let mut result = SplitVector::with_capacity(right.cols());
    for n in 0..right.cols() {
        result.push(simd::cvsve(&simd::cvmul(&row_left, &op_column(right, n))));
    }
    result
}

/*
 * Matrix-vector product. The vector is a 1xn row; output element n is the
 * dot product of matrix row n with the vector, so the element kernels key
 * on the column coordinate.
 */

pub(crate) fn matvec_mat_mat_elem(
    left: &DenseMatrix,
    right: &DenseMatrix,
    _m: usize,
    n: usize,
) -> Complex32 {
    simd::cvsve(&simd::cvmul(&left.row(n), &right.split()))
}

pub(crate) fn matvec_mat_mat_row(
    left: &DenseMatrix,
    right: &DenseMatrix,
    _row: usize,
) -> SplitVector {
    let vect = right.split();
    let mut result = SplitVector::with_capacity(right.cols());
    for n in 0..right.cols() {
        result.push(simd::cvsve(&simd::cvmul(&left.row(n), &vect)));
    }
    result
}

pub(crate) fn matvec_op_mat_elem(
    left: NodeRef<'_>,
    right: &DenseMatrix,
    _m: usize,
    n: usize,
) -> Complex32 {
    simd::cvsve(&simd::cvmul(&left.row(n), &right.row(0)))
}

pub(crate) fn matvec_op_mat_row(
    left: NodeRef<'_>,
    right: &DenseMatrix,
    _row: usize,
) -> SplitVector {
    let vect = right.row(0);
    let mut result = SplitVector::with_capacity(right.cols());
    for n in 0..right.cols() {
        result.push(simd::cvsve(&simd::cvmul(&left.row(n), &vect)));
    }
    result
}

pub(crate) fn matvec_op_op_elem(
    left: NodeRef<'_>,
    right: NodeRef<'_>,
    _m: usize,
    n: usize,
) -> Complex32 {
    simd::cvsve(&simd::cvmul(&left.row(n), &right.row(0)))
}

pub(crate) fn matvec_op_op_row(left: NodeRef<'_>, right: NodeRef<'_>, _row: usize) -> SplitVector {
    let vect = right.row(0);
    let mut result = SplitVector::with_capacity(right.cols());
    for n in 0..right.cols() {
        result.push(simd::cvsve(&simd::cvmul(&left.row(n), &vect)));
    }
    result
}

/*
 * Outer product of two 1xk vectors.
 */

pub(crate) fn outer_product_elem(
    left: &DenseMatrix,
    right: &DenseMatrix,
    m: usize,
    n: usize,
) -> Complex32 {
    left.get(0, m) * right.get(0, n).conj()
}

pub(crate) fn outer_product_row(
    left: &DenseMatrix,
    right: &DenseMatrix,
    row: usize,
) -> SplitVector {
    simd::cvsmul(&right.row(0).conj(), left.get(0, row))
}

/*
 * Scalar product. The scalar is stored as a 1x1 matrix operand.
 */

pub(crate) fn scalar_product_elem(
    left: &DenseMatrix,
    right: &DenseMatrix,
    m: usize,
    n: usize,
) -> Complex32 {
    left.get(m, n) * right.get(0, 0)
}

pub(crate) fn scalar_product_row(
    left: &DenseMatrix,
    right: &DenseMatrix,
    row: usize,
) -> SplitVector {
    simd::cvsmul(&left.row(row), right.get(0, 0))
}

/*
 * Sum.
 */

pub(crate) fn sum_mat_mat_elem(
    left: &DenseMatrix,
    right: &DenseMatrix,
    m: usize,
    n: usize,
) -> Complex32 {
    left.get(m, n) + right.get(m, n)
}

pub(crate) fn sum_mat_mat_row(
    left: &DenseMatrix,
    right: &DenseMatrix,
    row: usize,
) -> SplitVector {
    simd::cvadd(&left.row(row), &right.row(row))
}

pub(crate) fn sum_op_mat_elem(
    left: NodeRef<'_>,
    right: &DenseMatrix,
    m: usize,
    n: usize,
) -> Complex32 {
    left.get(m, n) + right.get(m, n)
}

pub(crate) fn sum_op_mat_row(left: NodeRef<'_>, right: &DenseMatrix, row: usize) -> SplitVector {
    simd::cvadd(&left.row(row), &right.row(row))
}

pub(crate) fn sum_op_op_elem(
    left: NodeRef<'_>,
    right: NodeRef<'_>,
    m: usize,
    n: usize,
) -> Complex32 {
    left.get(m, n) + right.get(m, n)
}

pub(crate) fn sum_op_op_row(left: NodeRef<'_>, right: NodeRef<'_>, row: usize) -> SplitVector {
    simd::cvadd(&left.row(row), &right.row(row))
}

/*
 * Tensor (Kronecker) product. Element (m, n) of the output is
 * left[m / p, n / q] * right[m % p, n % q] for a pxq right operand. The row
 * kernels expand the left-hand and right-hand element sequences for a whole
 * row, then multiply them element-wise in one pass.
 */

pub(crate) fn tensor_mat_mat_elem(
    left: &DenseMatrix,
    right: &DenseMatrix,
    m: usize,
    n: usize,
) -> Complex32 {
    left.get(m / right.rows(), n / right.cols()) * right.get(m % right.rows(), n % right.cols())
}

pub(crate) fn tensor_op_mat_elem(
    left: NodeRef<'_>,
    right: &DenseMatrix,
    m: usize,
    n: usize,
) -> Complex32 {
    left.get(m / right.rows(), n / right.cols()) * right.get(m % right.rows(), n % right.cols())
}

pub(crate) fn tensor_op_op_elem(
    left: NodeRef<'_>,
    right: NodeRef<'_>,
    m: usize,
    n: usize,
) -> Complex32 {
    left.get(m / right.rows(), n / right.cols()) * right.get(m % right.rows(), n % right.cols())
}

// Left-hand element expansion: the matching left row, each element repeated
// across one right-operand block.
fn tensor_left_elems(left_row: &SplitVector, row_len: usize, right_cols: usize) -> SplitVector {
    let mut result = SplitVector::with_capacity(row_len);
    for n in 0..row_len {
        result.push(left_row.get(n / right_cols));
    }
    result
}

// Right-hand element expansion: the matching right row, cycled across the
// output row.
fn tensor_right_elems(
    fetch: impl Fn(usize) -> Complex32,
    row_len: usize,
    right_cols: usize,
) -> SplitVector {
    let mut result = SplitVector::with_capacity(row_len);
    for i in 0..row_len {
        result.push(fetch(i % right_cols));
    }
    result
}

pub(crate) fn tensor_mat_mat_row(
    left: &DenseMatrix,
    right: &DenseMatrix,
    row: usize,
) -> SplitVector {
    let row_len = left.cols() * right.cols();
    let left_row = left.row(row / right.rows());
    let m = row % right.rows();
    let lhe = tensor_left_elems(&left_row, row_len, right.cols());
    let rhe = tensor_right_elems(|n| right.get(m, n), row_len, right.cols());
    simd::cvmul(&lhe, &rhe)
}

pub(crate) fn tensor_op_mat_row(
    left: NodeRef<'_>,
    right: &DenseMatrix,
    row: usize,
) -> SplitVector {
    let row_len = left.cols() * right.cols();
    let left_row = left.row(row / right.rows());
    let m = row % right.rows();
    let lhe = tensor_left_elems(&left_row, row_len, right.cols());
    let rhe = tensor_right_elems(|n| right.get(m, n), row_len, right.cols());
    simd::cvmul(&lhe, &rhe)
}

pub(crate) fn tensor_op_op_row(left: NodeRef<'_>, right: NodeRef<'_>, row: usize) -> SplitVector {
    let row_len = left.cols() * right.cols();
    let left_row = left.row(row / right.rows());
    let m = row % right.rows();
    let lhe = tensor_left_elems(&left_row, row_len, right.cols());
    let rhe = tensor_right_elems(|n| right.get(m, n), row_len, right.cols());
    simd::cvmul(&lhe, &rhe)
}

/*
 * Vector-vector tensor specialisation: for 1xk operands the single output
 * row is right's row scaled by each left element, concatenated. Avoids the
 * general index arithmetic.
 */

pub(crate) fn vv_tensor_mat_mat_row(
    left: &DenseMatrix,
    right: &DenseMatrix,
    _row: usize,
) -> SplitVector {
    let right_row = right.row(0);
    let mut result = SplitVector::with_capacity(left.cols() * right.cols());
    for m in 0..left.cols() {
        result.extend(&simd::cvsmul(&right_row, left.get(0, m)));
    }
    result
}

pub(crate) fn vv_tensor_op_mat_row(
    left: NodeRef<'_>,
    right: &DenseMatrix,
    _row: usize,
) -> SplitVector {
    let right_row = right.row(0);
    let mut result = SplitVector::with_capacity(left.cols() * right.cols());
    for m in 0..left.cols() {
        result.extend(&simd::cvsmul(&right_row, left.get(0, m)));
    }
    result
}

pub(crate) fn vv_tensor_op_op_row(
    left: NodeRef<'_>,
    right: NodeRef<'_>,
    _row: usize,
) -> SplitVector {
    let right_row = right.row(0);
    let mut result = SplitVector::with_capacity(left.cols() * right.cols());
    for m in 0..left.cols() {
        result.extend(&simd::cvsmul(&right_row, left.get(0, m)));
    }
    result
}

/*
 * Passthrough kernels for wrapping a single matrix as a graph.
 */

pub(crate) fn wrap_elem(left: &DenseMatrix, _right: &DenseMatrix, m: usize, n: usize) -> Complex32 {
    left.get(m, n)
}

pub(crate) fn wrap_row(left: &DenseMatrix, _right: &DenseMatrix, row: usize) -> SplitVector {
    left.row(row)
}
