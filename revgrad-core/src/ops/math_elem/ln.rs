use crate::error::RevGradError;
use crate::graph::{Graph, NodeId, Op};
use crate::types::RevNumeric;

// --- Forward Operation ---

/// Elementwise natural logarithm, returning a new node.
///
/// # Domain Considerations
/// The natural logarithm is only defined for strictly positive numbers. Any
/// element ≤ 0 is rejected with [`RevGradError::DomainError`] before a node is
/// allocated, so a failed call mutates neither the arena nor any gradient.
///
/// Backward rule: the operand receives `(1 / operand.value) · g`.
pub fn ln_op<T: RevNumeric>(graph: &mut Graph<T>, operand: NodeId) -> Result<NodeId, RevGradError> {
    graph.check(operand)?;

    for (index, x) in graph.node(operand).value.to_vec().into_iter().enumerate() {
        if x <= T::zero() {
            return Err(RevGradError::DomainError {
                operation: "ln".to_string(),
                message: format!("requires strictly positive input, got {:?} at element {}", x, index),
            });
        }
    }

    let value = graph.node(operand).value.map(|x| x.ln());
    Ok(graph.push(value, Op::Ln(operand), None))
}

// --- Backward Operation ---

pub(crate) fn ln_backward<T: RevNumeric>(graph: &mut Graph<T>, out: NodeId, operand: NodeId) {
    let upstream = graph.node(out).grad.clone();
    let contribution = graph.node(operand).value.map2(&upstream, |x, u| u / x);
    graph.accumulate(operand, contribution);
}

// --- Tests ---
