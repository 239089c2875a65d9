//! Multi-qubit state representation

use qusim2_algebra::{engine, LazyOperation};

use crate::error::{CircuitError, CircuitResult};
use crate::qubit::Qubit;

/// The backing storage: every element is a qubit, or every element is a
/// deferred 1x2^k vector graph. Kinds never mix.
#[derive(Clone, Debug)]
enum Elements {
    Qubits(Vec<Qubit>),
    Graphs(Vec<LazyOperation>),
}

/// An ordered register of quantum states.
///
/// Holds at least one element. [`to_vector`](StateVector::to_vector) folds
/// the register into a single graph over the joint 2^n-dimensional space
/// via repeated tensor products.
///
/// # Examples
///
/// ```
/// use qusim2_circuit::{Qubit, StateVector};
///
/// let register = StateVector::from_qubits(vec![Qubit::ket_zero(), Qubit::ket_one()]).unwrap();
/// let joint = register.to_vector().unwrap();
/// assert_eq!(joint.cols(), 4);
/// // |01> has its single unit amplitude at index 1.
/// assert_eq!(joint.get(0, 1).re, 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct StateVector {
    elements: Elements,
}

impl StateVector {
    /// Creates a register of qubits.
    ///
    /// # Errors
    ///
    /// Returns [`CircuitError::ShapeMismatch`] on an empty register.
    pub fn from_qubits(qubits: Vec<Qubit>) -> CircuitResult<Self> {
        if qubits.is_empty() {
            return Err(CircuitError::ShapeMismatch(
                "a state vector holds at least one qubit".to_string(),
            ));
        }
        Ok(Self {
            elements: Elements::Qubits(qubits),
        })
    }

    /// Creates a register of deferred state graphs.
    ///
    /// # Errors
    ///
    /// Returns [`CircuitError::ShapeMismatch`] on an empty register.
    pub fn from_graphs(graphs: Vec<LazyOperation>) -> CircuitResult<Self> {
        if graphs.is_empty() {
            return Err(CircuitError::ShapeMismatch(
                "a state vector holds at least one element".to_string(),
            ));
        }
        Ok(Self {
            elements: Elements::Graphs(graphs),
        })
    }

    /// The |0...0> register of `n` qubits.
    pub fn zeros(n: usize) -> CircuitResult<Self> {
        Self::from_qubits(vec![Qubit::ket_zero(); n])
    }

    /// Number of register elements.
    pub fn len(&self) -> usize {
        match &self.elements {
            Elements::Qubits(qs) => qs.len(),
            Elements::Graphs(gs) => gs.len(),
        }
    }

    /// Always false: registers hold at least one element.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element `i` as a qubit. Graph elements are read out through their
    /// roots. Panics if `i` is out of range.
    ///
    /// # Errors
    ///
    /// For graph elements, the usual [`Qubit::from_lazy`] contract applies.
    pub fn qubit(&self, i: usize) -> CircuitResult<Qubit> {
        match &self.elements {
            Elements::Qubits(qs) => Ok(qs[i]),
            Elements::Graphs(gs) => Qubit::from_lazy(&gs[i]),
        }
    }

    /// Replaces element `i`. Panics if `i` is out of range.
    ///
    /// # Errors
    ///
    /// Returns [`CircuitError::ShapeMismatch`] for graph-kind registers.
    pub fn set_qubit(&mut self, i: usize, qubit: Qubit) -> CircuitResult<()> {
        match &mut self.elements {
            Elements::Qubits(qs) => {
                qs[i] = qubit;
                Ok(())
            }
            Elements::Graphs(_) => Err(CircuitError::ShapeMismatch(
                "cannot place a qubit into a graph-kind state vector".to_string(),
            )),
        }
    }

    /// Appends a qubit at the tail.
    ///
    /// # Errors
    ///
    /// Returns [`CircuitError::ShapeMismatch`] for graph-kind registers.
    pub fn push_qubit(&mut self, qubit: Qubit) -> CircuitResult<()> {
        match &mut self.elements {
            Elements::Qubits(qs) => {
                qs.push(qubit);
                Ok(())
            }
            Elements::Graphs(_) => Err(CircuitError::ShapeMismatch(
                "cannot place a qubit into a graph-kind state vector".to_string(),
            )),
        }
    }

    /// Inserts a qubit at position `i`, shifting the tail. Panics if `i`
    /// is past the end.
    ///
    /// # Errors
    ///
    /// Returns [`CircuitError::ShapeMismatch`] for graph-kind registers.
    pub fn insert_qubit(&mut self, i: usize, qubit: Qubit) -> CircuitResult<()> {
        match &mut self.elements {
            Elements::Qubits(qs) => {
                qs.insert(i, qubit);
                Ok(())
            }
            Elements::Graphs(_) => Err(CircuitError::ShapeMismatch(
                "cannot place a qubit into a graph-kind state vector".to_string(),
            )),
        }
    }

    /// Appends a graph at the tail.
    ///
    /// # Errors
    ///
    /// Returns [`CircuitError::ShapeMismatch`] for qubit-kind registers.
    pub fn push_graph(&mut self, graph: LazyOperation) -> CircuitResult<()> {
        match &mut self.elements {
            Elements::Graphs(gs) => {
                gs.push(graph);
                Ok(())
            }
            Elements::Qubits(_) => Err(CircuitError::ShapeMismatch(
                "cannot place a graph into a qubit-kind state vector".to_string(),
            )),
        }
    }

    /// Folds the register into a single graph over the joint
    /// 2^n-dimensional space by chaining tensor products left to right.
    pub fn to_vector(&self) -> CircuitResult<LazyOperation> {
        match &self.elements {
            Elements::Qubits(qs) => {
                let mut graph = LazyOperation::wrap(qs[0].to_vector());
                for q in &qs[1..] {
                    let vect = q.to_vector();
                    graph = engine::tensor_product(&graph, &vect)?;
                }
                Ok(graph)
            }
            Elements::Graphs(gs) => {
                let mut graph = gs[0].clone();
                for g in &gs[1..] {
                    graph = engine::tensor_product(&graph, g)?;
                }
                Ok(graph)
            }
        }
    }
}

/// Qubit-kind registers compare element-wise within tolerance; graph-kind
/// registers compare their materialised joint vectors. Mixed kinds are
/// never equal.
impl PartialEq for StateVector {
    fn eq(&self, other: &Self) -> bool {
        match (&self.elements, &other.elements) {
            (Elements::Qubits(a), Elements::Qubits(b)) => a == b,
            (Elements::Graphs(_), Elements::Graphs(_)) => {
                match (self.to_vector(), other.to_vector()) {
                    (Ok(a), Ok(b)) => a.to_matrix() == b.to_matrix(),
                    _ => false,
                }
            }
            _ => false,
        }
    }
}
