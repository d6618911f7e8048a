use crate::error::RevGradError;
use crate::graph::{Graph, NodeId, Op};
use crate::types::RevNumeric;

// --- Forward Operation ---

/// Raises a node to a constant real exponent, elementwise.
///
/// The exponent is a plain number, never a node: the signature rejects a
/// `NodeId` exponent at the type level, and a non-finite exponent is rejected
/// with [`RevGradError::InvalidExponent`].
///
/// Backward rule: the base receives `k · base^(k−1) · g`.
pub fn pow_op<T: RevNumeric>(
    graph: &mut Graph<T>,
    base: NodeId,
    exponent: T,
) -> Result<NodeId, RevGradError> {
    graph.check(base)?;
    if !exponent.is_finite() {
        return Err(RevGradError::InvalidExponent {
            message: format!("exponent must be a finite real number, got {:?}", exponent),
        });
    }

    let value = graph.node(base).value.map(|x| x.powf(exponent));
    Ok(graph.push(value, Op::Pow(base, exponent), None))
}

// --- Backward Operation ---

pub(crate) fn pow_backward<T: RevNumeric>(
    graph: &mut Graph<T>,
    out: NodeId,
    base: NodeId,
    exponent: T,
) {
    let upstream = graph.node(out).grad.clone();
    let contribution = graph
        .node(base)
        .value
        .map2(&upstream, |x, u| exponent * x.powf(exponent - T::one()) * u);
    graph.accumulate(base, contribution);
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pow_forward() {
        let mut g = Graph::<f64>::new();
        let a = g.scalar(2.0);
        let c = pow_op(&mut g, a, 3.0).unwrap();
        assert_eq!(g.value(c).unwrap().as_scalar(), Some(8.0));
        assert_eq!(g.op_tag(c).unwrap(), "pow");
        assert_eq!(g.parents(c).unwrap(), vec![a]);
    }

    #[test]
    fn test_pow_backward() {
        // d/dx x^3 = 3 x^2
        let mut g = Graph::<f64>::new();
        let a = g.scalar(2.0);
        let c = g.pow(a, 3.0).unwrap();
        g.backward(c).unwrap();
        assert_relative_eq!(g.grad(a).unwrap().as_scalar().unwrap(), 12.0);
    }

    #[test]
    fn test_pow_negative_exponent() {
        let mut g = Graph::<f64>::new();
        let a = g.scalar(4.0);
        let c = g.pow(a, -1.0).unwrap();
        assert_relative_eq!(g.value(c).unwrap().as_scalar().unwrap(), 0.25);
        g.backward(c).unwrap();
        // d/dx x^-1 = -x^-2
        assert_relative_eq!(g.grad(a).unwrap().as_scalar().unwrap(), -0.0625);
    }

    #[test]
    fn test_pow_rejects_non_finite_exponent() {
        let mut g = Graph::<f64>::new();
        let a = g.scalar(2.0);
        let before = g.len();
        assert!(matches!(
            pow_op(&mut g, a, f64::NAN),
            Err(RevGradError::InvalidExponent { .. })
        ));
        assert_eq!(g.len(), before);
        assert_eq!(g.grad(a).unwrap().as_scalar(), Some(0.0));
    }

    #[test]
    fn test_pow_vector_elementwise() {
        let mut g = Graph::<f64>::new();
        let a = g.vector(vec![1.0, 2.0, 3.0]);
        let c = g.pow(a, 2.0).unwrap();
        assert_eq!(g.value(c).unwrap().to_vec(), vec![1.0, 4.0, 9.0]);
    }
}
