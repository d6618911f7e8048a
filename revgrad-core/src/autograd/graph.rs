use crate::graph::{Graph, NodeId, Op};
use crate::ops::{activation, arithmetic, math_elem};
use crate::types::RevNumeric;
use log::trace;
use std::collections::HashSet;

/// Recursively builds a topological order of the nodes reachable from `node`
/// via parent edges: parents are appended before the node itself, and the
/// visited set guarantees each node is appended exactly once no matter how
/// many children share it (DAG fan-in).
fn build_topo<T: RevNumeric>(
    graph: &Graph<T>,
    node: NodeId,
    visited: &mut HashSet<NodeId>,
    order: &mut Vec<NodeId>,
) {
    if visited.insert(node) {
        for parent in graph.node(node).op.parents() {
            build_topo(graph, parent, visited, order);
        }
        order.push(node);
    }
}

/// Runs the backward pass from `terminal`.
///
/// Seeds `terminal`'s gradient with ones (the only reset performed), then
/// invokes each reachable node's backward rule exactly once in reverse
/// topological order, so every child has pushed its contribution before a
/// node's own rule runs. Leaves are no-ops. All other gradients keep whatever
/// they held, which is what makes gradients accumulate across passes.
pub(crate) fn run_backward<T: RevNumeric>(graph: &mut Graph<T>, terminal: NodeId) {
    let mut visited = HashSet::new();
    let mut order = Vec::new();
    build_topo(graph, terminal, &mut visited, &mut order);
    trace!(
        "backward: {} node(s) reachable from terminal {}",
        order.len(),
        terminal.index()
    );

    graph.seed_gradient(terminal);

    for &id in order.iter().rev() {
        let op = graph.node(id).op.clone();
        match op {
            Op::Leaf => {}
            Op::Add(lhs, rhs) => arithmetic::add::add_backward(graph, id, lhs, rhs),
            Op::Mul(lhs, rhs) => arithmetic::mul::mul_backward(graph, id, lhs, rhs),
            Op::Pow(base, exponent) => arithmetic::pow::pow_backward(graph, id, base, exponent),
            Op::Neg(operand) => arithmetic::neg::neg_backward(graph, id, operand),
            Op::Exp(operand) => math_elem::exp::exp_backward(graph, id, operand),
            Op::Ln(operand) => math_elem::ln::ln_backward(graph, id, operand),
            Op::Tanh(operand) => activation::tanh::tanh_backward(graph, id, operand),
            Op::Softmax(operand) => activation::softmax::softmax_backward(graph, id, operand),
        }
    }
}

// --- Tests ---
