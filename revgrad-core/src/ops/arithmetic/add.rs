use crate::error::RevGradError;
use crate::graph::{Graph, NodeId, Op};
use crate::ops::check_same_shape;
use crate::types::RevNumeric;

// --- Forward Operation ---

/// Elementwise addition of two same-shaped nodes, returning a new node.
///
/// Backward rule: both operands receive `1 · g`.
pub fn add_op<T: RevNumeric>(
    graph: &mut Graph<T>,
    lhs: NodeId,
    rhs: NodeId,
) -> Result<NodeId, RevGradError> {
    graph.check(lhs)?;
    graph.check(rhs)?;
    check_same_shape(graph, lhs, rhs, "add")?;

    let value = graph
        .node(lhs)
        .value
        .map2(&graph.node(rhs).value, |a, b| a + b);
    Ok(graph.push(value, Op::Add(lhs, rhs), None))
}

// --- Backward Operation ---

/// Pushes the output gradient unchanged onto both parents.
pub(crate) fn add_backward<T: RevNumeric>(
    graph: &mut Graph<T>,
    out: NodeId,
    lhs: NodeId,
    rhs: NodeId,
) {
    let upstream = graph.node(out).grad.clone();
    graph.accumulate(lhs, upstream.clone());
    graph.accumulate(rhs, upstream);
}

// --- Tests ---
