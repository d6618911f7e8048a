use crate::error::RevGradError;
use crate::graph::{Graph, NodeId, Op};
use crate::payload::Payload;
use crate::types::RevNumeric;

// --- Forward Operation ---

/// Softmax over a vector operand: `t_i = e^{x_i} / Σ_j e^{x_j}`.
///
/// A scalar operand is rejected with [`RevGradError::VectorRequired`].
///
/// # Backward restriction
/// The backward rule collapses the full Jacobian into one aggregate scalar,
/// `Σ_i Σ_j J_ij · g_j` with `J_ii = t_i(1 − t_i)` and `J_ij = −t_i t_j`,
/// and broadcast-accumulates that scalar into the input's gradient. This is
/// NOT a general vector-Jacobian product: it is only valid when softmax is
/// the final, scalar-reducing operation of the graph.
pub fn softmax_op<T: RevNumeric>(
    graph: &mut Graph<T>,
    operand: NodeId,
) -> Result<NodeId, RevGradError> {
    graph.check(operand)?;

    let xs = match &graph.node(operand).value {
        Payload::Vector(v) => v.clone(),
        Payload::Scalar(_) => {
            return Err(RevGradError::VectorRequired {
                operation: "softmax".to_string(),
            })
        }
    };

    let denom = xs
        .iter()
        .map(|x| x.exp())
        .fold(T::zero(), |acc, e| acc + e);
    let t: Vec<T> = xs.iter().map(|x| x.exp() / denom).collect();
    Ok(graph.push(Payload::vector(t), Op::Softmax(operand), None))
}

// --- Backward Operation ---

pub(crate) fn softmax_backward<T: RevNumeric>(graph: &mut Graph<T>, out: NodeId, operand: NodeId) {
    let out_node = graph.node(out);
    let t = out_node.value.to_vec();
    let upstream = out_node.grad.to_vec();

    let mut aggregate = T::zero();
    for i in 0..t.len() {
        for j in 0..t.len() {
            let jacobian = if i == j {
                t[i] * (T::one() - t[j])
            } else {
                -(t[i] * t[j])
            };
            aggregate = aggregate + jacobian * upstream[j];
        }
    }
    graph.accumulate_broadcast(operand, aggregate);
}

// --- Tests ---
