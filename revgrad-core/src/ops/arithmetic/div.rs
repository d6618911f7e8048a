use crate::error::RevGradError;
use crate::graph::{Graph, NodeId};
use crate::ops::arithmetic::{mul_op, pow_op};
use crate::ops::check_same_shape;
use crate::types::RevNumeric;

/// Elementwise division, defined as `mul(lhs, pow(rhs, −1))`.
///
/// Division by an exactly-zero element propagates a non-finite value (IEEE
/// semantics) rather than failing; callers needing safety must guard
/// upstream. Shapes are checked up front so a mismatch allocates nothing.
pub fn div_op<T: RevNumeric>(
    graph: &mut Graph<T>,
    lhs: NodeId,
    rhs: NodeId,
) -> Result<NodeId, RevGradError> {
    graph.check(lhs)?;
    graph.check(rhs)?;
    check_same_shape(graph, lhs, rhs, "div")?;

    let inverse = pow_op(graph, rhs, -T::one())?;
    mul_op(graph, lhs, inverse)
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_div_forward() {
        let mut g = Graph::<f64>::new();
        let a = g.scalar(50.0);
        let b = g.scalar(2.0);
        let c = g.div(a, b).unwrap();
        assert_eq!(g.value(c).unwrap().as_scalar(), Some(25.0));
    }

    #[test]
    fn test_div_backward() {
        // d/da (a/b) = 1/b, d/db (a/b) = -a/b^2
        let mut g = Graph::<f64>::new();
        let a = g.scalar(50.0);
        let b = g.scalar(2.0);
        let c = g.div(a, b).unwrap();
        g.backward(c).unwrap();
        assert_relative_eq!(g.grad(a).unwrap().as_scalar().unwrap(), 0.5);
        assert_relative_eq!(g.grad(b).unwrap().as_scalar().unwrap(), -12.5);
    }

    #[test]
    fn test_div_by_zero_propagates_non_finite() {
        let mut g = Graph::<f64>::new();
        let a = g.scalar(1.0);
        let b = g.scalar(0.0);
        let c = g.div(a, b).unwrap();
        let value = g.value(c).unwrap().as_scalar().unwrap();
        assert!(!value.is_finite());
    }
}
