use crate::error::RevGradError;
use crate::graph::{Graph, NodeId};
use crate::ops::arithmetic::{add_op, neg_op};
use crate::ops::check_same_shape;
use crate::types::RevNumeric;

/// Elementwise subtraction, defined as `add(lhs, neg(rhs))`.
///
/// The backward rules of the underlying `add` and `neg` nodes cover it; no
/// dedicated rule exists. Shapes are checked up front so a mismatch allocates
/// nothing.
pub fn sub_op<T: RevNumeric>(
    graph: &mut Graph<T>,
    lhs: NodeId,
    rhs: NodeId,
) -> Result<NodeId, RevGradError> {
    graph.check(lhs)?;
    graph.check(rhs)?;
    check_same_shape(graph, lhs, rhs, "sub")?;

    let neg_rhs = neg_op(graph, rhs)?;
    add_op(graph, lhs, neg_rhs)
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RevGradError;
    use crate::payload::Shape;

    #[test]
    fn test_sub_forward() {
        let mut g = Graph::<f64>::new();
        let a = g.scalar(15.0);
        let b = g.scalar(12.0);
        let c = g.sub(a, b).unwrap();
        assert_eq!(g.value(c).unwrap().as_scalar(), Some(3.0));
        // Composite: the result node itself is an add over a neg node.
        assert_eq!(g.op_tag(c).unwrap(), "add");
    }

    #[test]
    fn test_sub_backward() {
        let mut g = Graph::<f64>::new();
        let a = g.scalar(15.0);
        let b = g.scalar(12.0);
        let c = g.sub(a, b).unwrap();
        g.backward(c).unwrap();
        assert_eq!(g.grad(a).unwrap().as_scalar(), Some(1.0));
        assert_eq!(g.grad(b).unwrap().as_scalar(), Some(-1.0));
    }

    #[test]
    fn test_sub_shape_mismatch_allocates_nothing() {
        let mut g = Graph::<f64>::new();
        let a = g.vector(vec![1.0, 2.0]);
        let b = g.scalar(3.0);
        let before = g.len();
        let err = g.sub(a, b).unwrap_err();
        assert_eq!(
            err,
            RevGradError::ShapeMismatch {
                expected: Shape::Vector(2),
                actual: Shape::Scalar,
                operation: "sub".to_string(),
            }
        );
        assert_eq!(g.len(), before);
    }
}
