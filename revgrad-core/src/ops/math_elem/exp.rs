use crate::error::RevGradError;
use crate::graph::{Graph, NodeId, Op};
use crate::types::RevNumeric;

// --- Forward Operation ---

/// Elementwise natural exponential, returning a new node.
///
/// Backward rule: the operand receives `out.value · g` (the derivative of
/// `e^x` is the output itself).
pub fn exp_op<T: RevNumeric>(graph: &mut Graph<T>, operand: NodeId) -> Result<NodeId, RevGradError> {
    graph.check(operand)?;
    let value = graph.node(operand).value.map(|x| x.exp());
    Ok(graph.push(value, Op::Exp(operand), None))
}

// --- Backward Operation ---

pub(crate) fn exp_backward<T: RevNumeric>(graph: &mut Graph<T>, out: NodeId, operand: NodeId) {
    let out_node = graph.node(out);
    let contribution = out_node.value.map2(&out_node.grad, |y, u| y * u);
    graph.accumulate(operand, contribution);
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exp_forward() {
        let mut g = Graph::<f64>::new();
        let a = g.scalar(0.0);
        let c = g.exp(a).unwrap();
        assert_relative_eq!(g.value(c).unwrap().as_scalar().unwrap(), 1.0);
    }

    #[test]
    fn test_exp_backward_is_output() {
        let mut g = Graph::<f64>::new();
        let a = g.scalar(2.0);
        let c = g.exp(a).unwrap();
        g.backward(c).unwrap();
        let out = g.value(c).unwrap().as_scalar().unwrap();
        assert_relative_eq!(g.grad(a).unwrap().as_scalar().unwrap(), out);
    }

    #[test]
    fn test_exp_vector() {
        let mut g = Graph::<f64>::new();
        let a = g.vector(vec![0.0, 1.0]);
        let c = exp_op(&mut g, a).unwrap();
        let vals = g.value(c).unwrap().to_vec();
        assert_relative_eq!(vals[0], 1.0);
        assert_relative_eq!(vals[1], std::f64::consts::E);
    }
}
