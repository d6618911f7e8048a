use crate::error::RevGradError;
use crate::graph::{Graph, NodeId, Op};
use crate::ops::check_same_shape;
use crate::types::RevNumeric;

// --- Forward Operation ---

/// Elementwise multiplication of two same-shaped nodes, returning a new node.
///
/// Backward rule: `lhs` receives `rhs.value · g`, `rhs` receives
/// `lhs.value · g`.
pub fn mul_op<T: RevNumeric>(
    graph: &mut Graph<T>,
    lhs: NodeId,
    rhs: NodeId,
) -> Result<NodeId, RevGradError> {
    graph.check(lhs)?;
    graph.check(rhs)?;
    check_same_shape(graph, lhs, rhs, "mul")?;

    let value = graph
        .node(lhs)
        .value
        .map2(&graph.node(rhs).value, |a, b| a * b);
    Ok(graph.push(value, Op::Mul(lhs, rhs), None))
}

// --- Backward Operation ---

pub(crate) fn mul_backward<T: RevNumeric>(
    graph: &mut Graph<T>,
    out: NodeId,
    lhs: NodeId,
    rhs: NodeId,
) {
    let upstream = graph.node(out).grad.clone();
    let lhs_value = graph.node(lhs).value.clone();
    let rhs_value = graph.node(rhs).value.clone();
    graph.accumulate(lhs, rhs_value.map2(&upstream, |b, u| b * u));
    graph.accumulate(rhs, lhs_value.map2(&upstream, |a, u| a * u));
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::Payload;

    #[test]
    fn test_mul_forward() {
        let mut g = Graph::<f64>::new();
        let a = g.scalar(33.0);
        let b = g.scalar(3.0);
        let c = mul_op(&mut g, a, b).unwrap();
        assert_eq!(g.value(c).unwrap().as_scalar(), Some(99.0));

        let v = g.vector(vec![1.0, -2.0]);
        let w = g.vector(vec![4.0, 0.5]);
        let p = mul_op(&mut g, v, w).unwrap();
        assert_eq!(g.value(p).unwrap(), &Payload::vector(vec![4.0, -1.0]));
    }

    #[test]
    fn test_mul_backward_swaps_operands() {
        let mut g = Graph::<f64>::new();
        let a = g.scalar(33.0);
        let b = g.scalar(3.0);
        let c = g.mul(a, b).unwrap();
        g.backward(c).unwrap();
        assert_eq!(g.grad(a).unwrap().as_scalar(), Some(3.0));
        assert_eq!(g.grad(b).unwrap().as_scalar(), Some(33.0));
    }

    #[test]
    fn test_mul_shape_mismatch() {
        let mut g = Graph::<f32>::new();
        let a = g.vector(vec![1.0, 2.0, 3.0]);
        let b = g.vector(vec![1.0, 2.0]);
        assert!(matches!(
            mul_op(&mut g, a, b),
            Err(RevGradError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_mul_square_doubles_gradient() {
        // c = a * a: both contributions land on the same node.
        let mut g = Graph::<f64>::new();
        let a = g.scalar(4.0);
        let c = g.mul(a, a).unwrap();
        g.backward(c).unwrap();
        assert_eq!(g.grad(a).unwrap().as_scalar(), Some(8.0));
    }
}
