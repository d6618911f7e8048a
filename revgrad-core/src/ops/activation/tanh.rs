use crate::error::RevGradError;
use crate::graph::{Graph, NodeId, Op};
use crate::types::RevNumeric;

// --- Forward Operation ---

/// Elementwise hyperbolic tangent, `(e^{2x} − 1) / (e^{2x} + 1)`.
///
/// Backward rule: the operand receives `(1 − t²) · g` where `t` is the output
/// value.
pub fn tanh_op<T: RevNumeric>(graph: &mut Graph<T>, operand: NodeId) -> Result<NodeId, RevGradError> {
    graph.check(operand)?;
    let value = graph.node(operand).value.map(|x| x.tanh());
    Ok(graph.push(value, Op::Tanh(operand), None))
}

// --- Backward Operation ---

pub(crate) fn tanh_backward<T: RevNumeric>(graph: &mut Graph<T>, out: NodeId, operand: NodeId) {
    let out_node = graph.node(out);
    let contribution = out_node
        .value
        .map2(&out_node.grad, |t, u| (T::one() - t * t) * u);
    graph.accumulate(operand, contribution);
}

// --- Tests ---
