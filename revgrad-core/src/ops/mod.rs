pub mod activation;
pub mod arithmetic;
pub mod math_elem;

use crate::error::RevGradError;
use crate::graph::{Graph, NodeId};
use crate::types::RevNumeric;

/// Shared check for elementwise binary operations: both operands
/// must have identical shapes (scalar with scalar, or vectors of equal
/// length). There is no broadcasting.
pub(crate) fn check_same_shape<T: RevNumeric>(
    graph: &Graph<T>,
    lhs: NodeId,
    rhs: NodeId,
    operation: &str,
) -> Result<(), RevGradError> {
    let expected = graph.node(lhs).value.shape();
    let actual = graph.node(rhs).value.shape();
    if expected != actual {
        return Err(RevGradError::ShapeMismatch {
            expected,
            actual,
            operation: operation.to_string(),
        });
    }
    Ok(())
}
