//! Operation graph nodes
//!
//! A node pairs two operand indices with the element and row kernels that
//! combine them, plus the output dimensions fixed at construction. The four
//! operand-kind variants each carry their own kernel pair, so dispatch is a
//! flat match on the tag.
//!
//! Interior operands are resolved through [`NodeRef`], a borrowed
//! graph-plus-index handle: nodes never store references into the arenas,
//! only positions, which stay stable as the arenas grow.

use std::fmt;
use std::sync::Arc;

use num_complex::Complex32;
use qusim2_core::{DenseMatrix, SplitVector};

use crate::lazy::LazyOperation;

/// Element kernel over two matrix operands.
pub type MatMatElem =
    Arc<dyn Fn(&DenseMatrix, &DenseMatrix, usize, usize) -> Complex32 + Send + Sync>;
/// Element kernel over an operation and a matrix operand.
pub type OpMatElem =
    Arc<dyn Fn(NodeRef<'_>, &DenseMatrix, usize, usize) -> Complex32 + Send + Sync>;
/// Element kernel over a matrix and an operation operand.
pub type MatOpElem =
    Arc<dyn Fn(&DenseMatrix, NodeRef<'_>, usize, usize) -> Complex32 + Send + Sync>;
/// Element kernel over two operation operands.
pub type OpOpElem =
    Arc<dyn Fn(NodeRef<'_>, NodeRef<'_>, usize, usize) -> Complex32 + Send + Sync>;

/// Row kernel over two matrix operands.
pub type MatMatRow = Arc<dyn Fn(&DenseMatrix, &DenseMatrix, usize) -> SplitVector + Send + Sync>;
/// Row kernel over an operation and a matrix operand.
pub type OpMatRow = Arc<dyn Fn(NodeRef<'_>, &DenseMatrix, usize) -> SplitVector + Send + Sync>;
/// Row kernel over a matrix and an operation operand.
pub type MatOpRow = Arc<dyn Fn(&DenseMatrix, NodeRef<'_>, usize) -> SplitVector + Send + Sync>;
/// Row kernel over two operation operands.
pub type OpOpRow = Arc<dyn Fn(NodeRef<'_>, NodeRef<'_>, usize) -> SplitVector + Send + Sync>;

/// The operand pair of a node: which arenas its indices point into, and the
/// kernel pair matching that combination.
#[derive(Clone)]
pub enum OperandKind {
    /// Both operands in the matrix arena.
    MatMat {
        left: usize,
        right: usize,
        elem: MatMatElem,
        row: MatMatRow,
    },
    /// Left operand in the operation arena, right in the matrix arena.
    OpMat {
        left: usize,
        right: usize,
        elem: OpMatElem,
        row: OpMatRow,
    },
    /// Left operand in the matrix arena, right in the operation arena.
    MatOp {
        left: usize,
        right: usize,
        elem: MatOpElem,
        row: MatOpRow,
    },
    /// Both operands in the operation arena.
    OpOp {
        left: usize,
        right: usize,
        elem: OpOpElem,
        row: OpOpRow,
    },
}

impl OperandKind {
    fn tag(&self) -> &'static str {
        match self {
            OperandKind::MatMat { .. } => "MatMat",
            OperandKind::OpMat { .. } => "OpMat",
            OperandKind::MatOp { .. } => "MatOp",
            OperandKind::OpOp { .. } => "OpOp",
        }
    }

    fn indices(&self) -> (usize, usize) {
        match self {
            OperandKind::MatMat { left, right, .. }
            | OperandKind::OpMat { left, right, .. }
            | OperandKind::MatOp { left, right, .. }
            | OperandKind::OpOp { left, right, .. } => (*left, *right),
        }
    }
}

// Kernels are opaque; show the tag and operand positions.
impl fmt::Debug for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (left, right) = self.indices();
        f.debug_struct(self.tag())
            .field("left", &left)
            .field("right", &right)
            .finish()
    }
}

/// A single interior node of a lazy operation graph.
///
/// Output dimensions are computed at construction and never change. A node
/// evaluates only what is asked of it - one element or one row - and never
/// materialises its own output.
#[derive(Clone, Debug)]
pub struct OpNode {
    pub(crate) kind: OperandKind,
    pub(crate) rows: usize,
    pub(crate) cols: usize,
}

impl OpNode {
    pub(crate) fn new(kind: OperandKind, rows: usize, cols: usize) -> Self {
        Self { kind, rows, cols }
    }

    /// Output row count.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Output column count.
    pub fn cols(&self) -> usize {
        self.cols
    }
}

/// A borrowed handle to an interior node, resolving reads against the
/// owning graph's arenas.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    graph: &'a LazyOperation,
    index: usize,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(graph: &'a LazyOperation, index: usize) -> Self {
        Self { graph, index }
    }

    /// Element `(m, n)` of this node's output.
    pub fn get(&self, m: usize, n: usize) -> Complex32 {
        self.graph.node_get(self.index, m, n)
    }

    /// Row `m` of this node's output.
    pub fn row(&self, m: usize) -> SplitVector {
        self.graph.node_row(self.index, m)
    }

    /// Output row count of this node.
    pub fn rows(&self) -> usize {
        self.graph.node(self.index).rows
    }

    /// Output column count of this node.
    pub fn cols(&self) -> usize {
        self.graph.node(self.index).cols
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef").field("index", &self.index).finish()
    }
}
