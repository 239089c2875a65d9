//! Lazy-evaluation complex matrix algebra engine
//!
//! Algebraic expressions over [`DenseMatrix`](qusim2_core::DenseMatrix)
//! operands are not computed eagerly. Each factory in [`engine`] returns a
//! [`LazyOperation`]: a flat computation graph whose leaves live in a matrix
//! arena and whose interior nodes live in an operation arena, the last node
//! being the root. Graphs can be composed further by appending matrices or
//! whole graphs, consulted element-by-element or row-by-row, and finally
//! materialised into a dense matrix by parallel row evaluation.
//!
//! ## Examples
//!
//! ```
//! use qusim2_algebra::engine;
//! use qusim2_core::DenseMatrix;
//!
//! // H * H stays unevaluated until an element is read.
//! let h = DenseMatrix::hadamard2();
//! let product = engine::matmul(&h, &h).unwrap();
//! assert_eq!(product.to_matrix(), DenseMatrix::identity2());
//! ```

pub mod error;
pub use error::{AlgebraError, AlgebraResult};

mod node;
pub use node::{
    MatMatElem, MatMatRow, MatOpElem, MatOpRow, NodeRef, OpMatElem, OpMatRow, OpNode, OpOpElem,
    OpOpRow, OperandKind,
};

pub(crate) mod kernels;

mod lazy;
pub use lazy::LazyOperation;

pub mod engine;
pub use engine::Operand;
