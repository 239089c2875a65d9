//! The deferred computation graph
//!
//! A [`LazyOperation`] owns two append-only arenas: one of dense matrices
//! (the leaves) and one of operation nodes (the interior). Nodes refer to
//! operands by index, always strictly earlier in the respective arena, so
//! the arenas are a DAG flattened in evaluation order and the last node is
//! the root. Cloning deep-clones both arenas; two graphs never share arena
//! storage.

use std::sync::Arc;

use num_complex::Complex32;
use qusim2_core::{DenseMatrix, SplitVector};

use crate::kernels;
use crate::node::{MatMatElem, MatMatRow, NodeRef, OpMatElem, OpMatRow, OpNode, OpOpElem, OpOpRow, OperandKind};

/// A deferred algebraic computation over dense complex matrices.
///
/// Built by the [`engine`](crate::engine) factories, optionally extended by
/// the `append_*` methods, then consulted element-by-element, row-by-row or
/// materialised whole with [`to_matrix`](LazyOperation::to_matrix).
///
/// # Examples
///
/// ```
/// use qusim2_algebra::engine;
/// use qusim2_core::DenseMatrix;
///
/// let graph = engine::tensor_power(&DenseMatrix::identity2(), 3).unwrap();
/// assert_eq!(graph.rows(), 8);
/// assert_eq!(graph.get(5, 5).re, 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct LazyOperation {
    mats: Vec<DenseMatrix>,
    ops: Vec<OpNode>,
}

impl LazyOperation {
    /// Base graph over two matrix operands.
    pub fn from_pair(
        left: DenseMatrix,
        right: DenseMatrix,
        elem: MatMatElem,
        row: MatMatRow,
        rows: usize,
        cols: usize,
    ) -> Self {
        Self {
            mats: vec![left, right],
            ops: vec![OpNode::new(
                OperandKind::MatMat {
                    left: 0,
                    right: 1,
                    elem,
                    row,
                },
                rows,
                cols,
            )],
        }
    }

    /// Wraps a single matrix as a passthrough graph.
    pub fn wrap(mat: DenseMatrix) -> Self {
        let rows = mat.rows();
        let cols = mat.cols();
        Self {
            mats: vec![mat],
            ops: vec![OpNode::new(
                OperandKind::MatMat {
                    left: 0,
                    right: 0,
                    elem: Arc::new(kernels::wrap_elem),
                    row: Arc::new(kernels::wrap_row),
                },
                rows,
                cols,
            )],
        }
    }

    /// The lazy identity of the given size.
    ///
    /// No identity matrix is stored: the single node's kernels synthesise
    /// standard basis rows on demand. The matrix arena holds one empty
    /// placeholder so the node's operand indices stay resolvable.
    pub fn identity(size: usize) -> Self {
        let elem: MatMatElem = Arc::new(|_, _, m, n| {
            if m == n {
                Complex32::new(1.0, 0.0)
            } else {
                Complex32::new(0.0, 0.0)
            }
        });
        let row: MatMatRow = Arc::new(move |_, _, row| {
            let mut basis = SplitVector::with_capacity(size);
            for i in 0..size {
                basis.push(if i == row {
                    Complex32::new(1.0, 0.0)
                } else {
                    Complex32::new(0.0, 0.0)
                });
            }
            basis
        });
        Self {
            mats: vec![DenseMatrix::empty()],
            ops: vec![OpNode::new(
                OperandKind::MatMat {
                    left: 0,
                    right: 0,
                    elem,
                    row,
                },
                size,
                size,
            )],
        }
    }

    /// Appends a matrix operand: the new root combines the prior root with
    /// `mat` through the given kernels.
    pub fn append_matrix(
        &mut self,
        mat: DenseMatrix,
        elem: OpMatElem,
        row: OpMatRow,
        rows: usize,
        cols: usize,
    ) {
        let prior_root = self.ops.len() - 1;
        self.mats.push(mat);
        self.ops.push(OpNode::new(
            OperandKind::OpMat {
                left: prior_root,
                right: self.mats.len() - 1,
                elem,
                row,
            },
            rows,
            cols,
        ));
    }

    /// Appends a whole graph: `other`'s nodes are spliced into this graph
    /// with their operand indices relocated, then a new root combines this
    /// graph's prior root with `other`'s spliced root.
    pub fn append_lazy(
        &mut self,
        other: &LazyOperation,
        elem: OpOpElem,
        row: OpOpRow,
        rows: usize,
        cols: usize,
    ) {
        let base_op = self.ops.len();
        let prior_root = base_op - 1;

        for node in &other.ops {
            let kind = match &node.kind {
                OperandKind::MatMat {
                    left,
                    right,
                    elem,
                    row,
                } => {
                    self.mats.push(other.mats[*left].clone());
                    let new_left = self.mats.len() - 1;
                    self.mats.push(other.mats[*right].clone());
                    let new_right = self.mats.len() - 1;
                    OperandKind::MatMat {
                        left: new_left,
                        right: new_right,
                        elem: Arc::clone(elem),
                        row: Arc::clone(row),
                    }
                }
                OperandKind::OpMat {
                    left,
                    right,
                    elem,
                    row,
                } => {
                    self.mats.push(other.mats[*right].clone());
                    OperandKind::OpMat {
                        left: base_op + left,
                        right: self.mats.len() - 1,
                        elem: Arc::clone(elem),
                        row: Arc::clone(row),
                    }
                }
                OperandKind::MatOp {
                    left,
                    right,
                    elem,
                    row,
                } => {
                    self.mats.push(other.mats[*left].clone());
                    OperandKind::MatOp {
                        left: self.mats.len() - 1,
                        right: base_op + right,
                        elem: Arc::clone(elem),
                        row: Arc::clone(row),
                    }
                }
                OperandKind::OpOp {
                    left,
                    right,
                    elem,
                    row,
                } => OperandKind::OpOp {
                    left: base_op + left,
                    right: base_op + right,
                    elem: Arc::clone(elem),
                    row: Arc::clone(row),
                },
            };
            self.ops.push(OpNode::new(kind, node.rows, node.cols));
        }

        let spliced_root = self.ops.len() - 1;
        self.ops.push(OpNode::new(
            OperandKind::OpOp {
                left: prior_root,
                right: spliced_root,
                elem,
                row,
            },
            rows,
            cols,
        ));
    }

    /// Element `(m, n)` of the whole graph's value.
    pub fn get(&self, m: usize, n: usize) -> Complex32 {
        self.node_get(self.ops.len() - 1, m, n)
    }

    /// Row `m` of the whole graph's value.
    pub fn row(&self, m: usize) -> SplitVector {
        self.node_row(self.ops.len() - 1, m)
    }

    /// Output row count of the root.
    pub fn rows(&self) -> usize {
        self.ops[self.ops.len() - 1].rows
    }

    /// Output column count of the root.
    pub fn cols(&self) -> usize {
        self.ops[self.ops.len() - 1].cols
    }

    pub(crate) fn node(&self, index: usize) -> &OpNode {
        &self.ops[index]
    }

    pub(crate) fn node_get(&self, index: usize, m: usize, n: usize) -> Complex32 {
        let node = &self.ops[index];
        match &node.kind {
            OperandKind::MatMat {
                left, right, elem, ..
            } => elem(&self.mats[*left], &self.mats[*right], m, n),
            OperandKind::OpMat {
                left, right, elem, ..
            } => elem(NodeRef::new(self, *left), &self.mats[*right], m, n),
            OperandKind::MatOp {
                left, right, elem, ..
            } => elem(&self.mats[*left], NodeRef::new(self, *right), m, n),
            OperandKind::OpOp {
                left, right, elem, ..
            } => elem(NodeRef::new(self, *left), NodeRef::new(self, *right), m, n),
        }
    }

    pub(crate) fn node_row(&self, index: usize, m: usize) -> SplitVector {
        let node = &self.ops[index];
        match &node.kind {
            OperandKind::MatMat {
                left, right, row, ..
            } => row(&self.mats[*left], &self.mats[*right], m),
            OperandKind::OpMat {
                left, right, row, ..
            } => row(NodeRef::new(self, *left), &self.mats[*right], m),
            OperandKind::MatOp {
                left, right, row, ..
            } => row(&self.mats[*left], NodeRef::new(self, *right), m),
            OperandKind::OpOp {
                left, right, row, ..
            } => row(NodeRef::new(self, *left), NodeRef::new(self, *right), m),
        }
    }

    /// Materialises the graph into a dense matrix by parallel row
    /// evaluation.
    ///
    /// The output rows are partitioned into contiguous stripes, one per
    /// worker (hardware concurrency clamped to the row count); each worker
    /// writes only its own stripe, and reads against the graph are pure, so
    /// no synchronisation is needed.
    pub fn to_matrix(&self) -> DenseMatrix {
        let rows = self.rows();
        let cols = self.cols();
        if rows == 0 || cols == 0 {
            return DenseMatrix::empty();
        }

        let mut data = vec![Complex32::new(0.0, 0.0); rows * cols];
        self.fill_rows(&mut data, rows, cols);
        DenseMatrix::from_vec(data, rows, cols)
            .expect("output buffer sized from the root dimensions")
    }

    #[cfg(feature = "parallel")]
    fn fill_rows(&self, data: &mut [Complex32], rows: usize, cols: usize) {
        use rayon::prelude::*;

        let workers = num_cpus::get().max(1).min(rows);
        let rows_per_worker = rows.div_ceil(workers);
        data.par_chunks_mut(rows_per_worker * cols)
            .enumerate()
            .for_each(|(worker, stripe)| {
                let first_row = worker * rows_per_worker;
                for (i, out_row) in stripe.chunks_mut(cols).enumerate() {
                    self.write_row(first_row + i, out_row);
                }
            });
    }

    #[cfg(not(feature = "parallel"))]
    fn fill_rows(&self, data: &mut [Complex32], rows: usize, cols: usize) {
        for (r, out_row) in data.chunks_mut(cols).enumerate().take(rows) {
            self.write_row(r, out_row);
        }
    }

    fn write_row(&self, r: usize, out: &mut [Complex32]) {
        let row = self.row(r);
        for (n, slot) in out.iter_mut().enumerate() {
            *slot = row.get(n);
        }
    }
}
