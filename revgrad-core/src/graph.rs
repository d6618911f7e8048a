use crate::autograd;
use crate::error::RevGradError;
use crate::payload::{Payload, Shape};
use crate::types::RevNumeric;
use log::debug;

/// Index of a node inside a [`Graph`] arena.
///
/// Ids are only meaningful for the graph that created them. Parent edges are
/// stored as ids, and an edge can only point at an id handed out earlier, so
/// the parent relation is acyclic by construction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// The operation that produced a node, carrying its parent edges and, for
/// `pow`, the constant exponent.
///
/// The backward driver dispatches on this tag; there are no per-node closures.
/// `sub` and `div` are compositions of these primitives and never appear here.
#[derive(Debug, Clone)]
pub(crate) enum Op<T> {
    Leaf,
    Add(NodeId, NodeId),
    Mul(NodeId, NodeId),
    Pow(NodeId, T),
    Neg(NodeId),
    Exp(NodeId),
    Ln(NodeId),
    Tanh(NodeId),
    Softmax(NodeId),
}

impl<T> Op<T> {
    /// Direct parents of the node, duplicate-free (a binary op applied to the
    /// same node twice reports a single parent).
    pub(crate) fn parents(&self) -> Vec<NodeId> {
        match self {
            Op::Leaf => Vec::new(),
            Op::Add(a, b) | Op::Mul(a, b) => {
                if a == b {
                    vec![*a]
                } else {
                    vec![*a, *b]
                }
            }
            Op::Pow(a, _)
            | Op::Neg(a)
            | Op::Exp(a)
            | Op::Ln(a)
            | Op::Tanh(a)
            | Op::Softmax(a) => vec![*a],
        }
    }

    pub(crate) fn tag(&self) -> &'static str {
        match self {
            Op::Leaf => "leaf",
            Op::Add(..) => "add",
            Op::Mul(..) => "mul",
            Op::Pow(..) => "pow",
            Op::Neg(..) => "neg",
            Op::Exp(..) => "exp",
            Op::Ln(..) => "ln",
            Op::Tanh(..) => "tanh",
            Op::Softmax(..) => "softmax",
        }
    }
}

/// A node of the computation graph: value, accumulated gradient, producing
/// operation, and an optional diagnostic label.
///
/// Nodes are immutable after creation except for gradient accumulation.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: Payload<T>,
    pub(crate) grad: Payload<T>,
    pub(crate) op: Op<T>,
    pub(crate) label: Option<String>,
}

/// Growable arena holding every node of a differentiable computation.
///
/// Consumers build expressions solely through the operator methods; each call
/// appends a new node recording its operands as parent ids. Calling
/// [`Graph::backward`] on a terminal node runs the reverse-mode pass over
/// everything reachable from it.
#[derive(Debug, Default)]
pub struct Graph<T> {
    nodes: Vec<Node<T>>,
}

impl<T: RevNumeric> Graph<T> {
    pub fn new() -> Self {
        Graph { nodes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // --- Construction ---

    pub(crate) fn push(&mut self, value: Payload<T>, op: Op<T>, label: Option<String>) -> NodeId {
        let grad = value.zeros_like();
        self.nodes.push(Node {
            value,
            grad,
            op,
            label,
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Creates a leaf (input/parameter) node from a payload.
    pub fn leaf(&mut self, value: Payload<T>) -> NodeId {
        self.push(value, Op::Leaf, None)
    }

    /// Creates a leaf node with a diagnostic label.
    pub fn leaf_labeled(&mut self, value: Payload<T>, label: &str) -> NodeId {
        self.push(value, Op::Leaf, Some(label.to_string()))
    }

    /// Creates a scalar leaf.
    pub fn scalar(&mut self, value: T) -> NodeId {
        self.leaf(Payload::scalar(value))
    }

    /// Creates a vector leaf.
    pub fn vector(&mut self, values: Vec<T>) -> NodeId {
        self.leaf(Payload::vector(values))
    }

    /// The single plain-number-to-node coercion point, labeled with the
    /// literal it came from. Used by [`IntoNode`] at every binary-operator
    /// boundary that accepts a bare number.
    pub fn constant(&mut self, value: T) -> NodeId {
        let label = format!("{:?}", value);
        self.push(Payload::scalar(value), Op::Leaf, Some(label))
    }

    // --- Accessors ---

    /// Validates that `id` belongs to this arena.
    pub(crate) fn check(&self, id: NodeId) -> Result<(), RevGradError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(RevGradError::InvalidNode {
                index: id.0,
                len: self.nodes.len(),
            })
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.0]
    }

    /// Reads a node's value. Reads never mutate state.
    pub fn value(&self, id: NodeId) -> Result<&Payload<T>, RevGradError> {
        self.check(id)?;
        Ok(&self.nodes[id.0].value)
    }

    /// Reads a node's accumulated gradient. Reads never mutate state.
    pub fn grad(&self, id: NodeId) -> Result<&Payload<T>, RevGradError> {
        self.check(id)?;
        Ok(&self.nodes[id.0].grad)
    }

    pub fn shape(&self, id: NodeId) -> Result<Shape, RevGradError> {
        self.check(id)?;
        Ok(self.nodes[id.0].value.shape())
    }

    /// Direct parents of a node (diagnostics/debugging only).
    pub fn parents(&self, id: NodeId) -> Result<Vec<NodeId>, RevGradError> {
        self.check(id)?;
        Ok(self.nodes[id.0].op.parents())
    }

    /// Operator tag of the node (diagnostics/debugging only).
    pub fn op_tag(&self, id: NodeId) -> Result<&'static str, RevGradError> {
        self.check(id)?;
        Ok(self.nodes[id.0].op.tag())
    }

    pub fn label(&self, id: NodeId) -> Result<Option<&str>, RevGradError> {
        self.check(id)?;
        Ok(self.nodes[id.0].label.as_deref())
    }

    // --- Gradients ---

    /// Accumulates a contribution into a node's gradient (added into, never
    /// overwritten).
    pub(crate) fn accumulate(&mut self, id: NodeId, contribution: Payload<T>) {
        self.nodes[id.0].grad.add_assign(&contribution);
    }

    /// Accumulates a single aggregate scalar into every element of a node's
    /// gradient (softmax backward rule).
    pub(crate) fn accumulate_broadcast(&mut self, id: NodeId, value: T) {
        self.nodes[id.0].grad.add_broadcast_assign(value);
    }

    /// Seeds the terminal's gradient with the multiplicative identity. This is
    /// the only gradient reset the backward pass performs.
    pub(crate) fn seed_gradient(&mut self, id: NodeId) {
        self.nodes[id.0].grad = self.nodes[id.0].value.ones_like();
    }

    /// Resets every gradient in the arena to zero.
    ///
    /// Gradients accumulate across backward passes by default; callers wanting
    /// fresh gradients own this reset step between passes.
    pub fn zero_grad(&mut self) {
        debug!("zero_grad: resetting gradients of {} node(s)", self.nodes.len());
        for node in self.nodes.iter_mut() {
            node.grad = node.value.zeros_like();
        }
    }

    /// Runs the backward pass from `terminal`, accumulating gradients into
    /// every node reachable from it via parent edges.
    pub fn backward(&mut self, terminal: NodeId) -> Result<(), RevGradError> {
        self.check(terminal)?;
        autograd::graph::run_backward(self, terminal);
        Ok(())
    }

    // --- Operator sugar (delegates to the ops modules) ---

    pub fn add(
        &mut self,
        lhs: impl IntoNode<T>,
        rhs: impl IntoNode<T>,
    ) -> Result<NodeId, RevGradError> {
        let lhs = lhs.into_node(self);
        let rhs = rhs.into_node(self);
        crate::ops::arithmetic::add_op(self, lhs, rhs)
    }

    pub fn mul(
        &mut self,
        lhs: impl IntoNode<T>,
        rhs: impl IntoNode<T>,
    ) -> Result<NodeId, RevGradError> {
        let lhs = lhs.into_node(self);
        let rhs = rhs.into_node(self);
        crate::ops::arithmetic::mul_op(self, lhs, rhs)
    }

    /// Raises `base` to a constant real exponent. The exponent is a plain
    /// number by construction; a node exponent does not type-check.
    pub fn pow(&mut self, base: impl IntoNode<T>, exponent: T) -> Result<NodeId, RevGradError> {
        let base = base.into_node(self);
        crate::ops::arithmetic::pow_op(self, base, exponent)
    }

    pub fn neg(&mut self, operand: impl IntoNode<T>) -> Result<NodeId, RevGradError> {
        let operand = operand.into_node(self);
        crate::ops::arithmetic::neg_op(self, operand)
    }

    pub fn sub(
        &mut self,
        lhs: impl IntoNode<T>,
        rhs: impl IntoNode<T>,
    ) -> Result<NodeId, RevGradError> {
        let lhs = lhs.into_node(self);
        let rhs = rhs.into_node(self);
        crate::ops::arithmetic::sub_op(self, lhs, rhs)
    }

    pub fn div(
        &mut self,
        lhs: impl IntoNode<T>,
        rhs: impl IntoNode<T>,
    ) -> Result<NodeId, RevGradError> {
        let lhs = lhs.into_node(self);
        let rhs = rhs.into_node(self);
        crate::ops::arithmetic::div_op(self, lhs, rhs)
    }

    pub fn exp(&mut self, operand: impl IntoNode<T>) -> Result<NodeId, RevGradError> {
        let operand = operand.into_node(self);
        crate::ops::math_elem::exp_op(self, operand)
    }

    pub fn ln(&mut self, operand: impl IntoNode<T>) -> Result<NodeId, RevGradError> {
        let operand = operand.into_node(self);
        crate::ops::math_elem::ln_op(self, operand)
    }

    pub fn tanh(&mut self, operand: impl IntoNode<T>) -> Result<NodeId, RevGradError> {
        let operand = operand.into_node(self);
        crate::ops::activation::tanh_op(self, operand)
    }

    pub fn softmax(&mut self, operand: impl IntoNode<T>) -> Result<NodeId, RevGradError> {
        let operand = operand.into_node(self);
        crate::ops::activation::softmax_op(self, operand)
    }
}

/// Coercion of operator arguments into graph nodes.
///
/// Implemented for `NodeId` (identity) and for the plain element types, which
/// become labeled constant leaves via [`Graph::constant`]. This is the single
/// "as-node" conversion applied at every operator boundary.
pub trait IntoNode<T: RevNumeric> {
    fn into_node(self, graph: &mut Graph<T>) -> NodeId;
}

impl<T: RevNumeric> IntoNode<T> for NodeId {
    fn into_node(self, _graph: &mut Graph<T>) -> NodeId {
        self
    }
}

impl IntoNode<f32> for f32 {
    fn into_node(self, graph: &mut Graph<f32>) -> NodeId {
        graph.constant(self)
    }
}

impl IntoNode<f64> for f64 {
    fn into_node(self, graph: &mut Graph<f64>) -> NodeId {
        graph.constant(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_creation() {
        let mut g = Graph::<f64>::new();
        let x = g.scalar(2.0);
        let v = g.vector(vec![1.0, 2.0, 3.0]);
        assert_eq!(g.len(), 2);
        assert_eq!(g.value(x).unwrap().as_scalar(), Some(2.0));
        assert_eq!(g.grad(x).unwrap().as_scalar(), Some(0.0));
        assert_eq!(g.shape(v).unwrap(), Shape::Vector(3));
        assert_eq!(g.grad(v).unwrap(), &Payload::vector(vec![0.0, 0.0, 0.0]));
        assert_eq!(g.op_tag(x).unwrap(), "leaf");
        assert!(g.parents(x).unwrap().is_empty());
    }

    #[test]
    fn test_labels() {
        let mut g = Graph::<f64>::new();
        let w = g.leaf_labeled(Payload::scalar(-3.0), "w_0");
        assert_eq!(g.label(w).unwrap(), Some("w_0"));
        // Coerced constants are labeled with their literal.
        let c = 2.5f64.into_node(&mut g);
        assert_eq!(g.label(c).unwrap(), Some("2.5"));
        assert_eq!(g.op_tag(c).unwrap(), "leaf");
    }

    #[test]
    fn test_invalid_node_id() {
        let mut g = Graph::<f32>::new();
        let x = g.scalar(1.0);
        let bogus = NodeId(7);
        assert_eq!(
            g.value(bogus).unwrap_err(),
            RevGradError::InvalidNode { index: 7, len: 1 }
        );
        assert!(g.add(x, bogus).is_err());
        assert!(g.backward(bogus).is_err());
    }

    #[test]
    fn test_reads_are_idempotent() {
        let mut g = Graph::<f64>::new();
        let x = g.scalar(3.0);
        let y = g.mul(x, x).unwrap();
        g.backward(y).unwrap();
        let first = (g.value(x).unwrap().clone(), g.grad(x).unwrap().clone());
        let second = (g.value(x).unwrap().clone(), g.grad(x).unwrap().clone());
        assert_eq!(first, second);
        assert_eq!(g.len(), 2); // reads allocate nothing
    }

    #[test]
    fn test_parents_duplicate_free() {
        let mut g = Graph::<f64>::new();
        let a = g.scalar(1.5);
        let twice = g.add(a, a).unwrap();
        assert_eq!(g.parents(twice).unwrap(), vec![a]);
        assert_eq!(g.op_tag(twice).unwrap(), "add");
    }

    #[test]
    fn test_edges_point_backwards() {
        let mut g = Graph::<f64>::new();
        let a = g.scalar(1.0);
        let b = g.scalar(2.0);
        let c = g.add(a, b).unwrap();
        for p in g.parents(c).unwrap() {
            assert!(p.index() < c.index());
        }
    }
}
