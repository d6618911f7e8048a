use crate::error::RevGradError;
use crate::graph::{Graph, NodeId, Op};
use crate::types::RevNumeric;

// --- Forward Operation ---

/// Elementwise negation, returning a new node.
///
/// Backward rule: the operand receives `−1 · g`.
pub fn neg_op<T: RevNumeric>(graph: &mut Graph<T>, operand: NodeId) -> Result<NodeId, RevGradError> {
    graph.check(operand)?;
    let value = graph.node(operand).value.map(|x| -x);
    Ok(graph.push(value, Op::Neg(operand), None))
}

// --- Backward Operation ---

pub(crate) fn neg_backward<T: RevNumeric>(graph: &mut Graph<T>, out: NodeId, operand: NodeId) {
    let upstream = graph.node(out).grad.clone();
    graph.accumulate(operand, upstream.map(|u| -u));
}

// --- Tests ---
