use crate::error::RevGradError;
use crate::graph::{Graph, NodeId};
use crate::payload::{Payload, Shape};
use crate::types::RevNumeric;
use num_traits::ToPrimitive;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical grad {analytical} != numerical grad {numerical} (difference {difference})")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical: f64,
        numerical: f64,
        difference: f64,
    },

    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(RevGradError),

    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(RevGradError),

    #[error("Gradient check requires a scalar terminal, got {shape}")]
    NonScalarTerminal { shape: Shape },

    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index} (loss+: {loss_plus}, loss-: {loss_minus})")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
}

/// Checks analytical gradients against central finite differences.
///
/// `func` rebuilds the expression under test inside a fresh [`Graph`] from
/// the leaf ids it is given, one leaf per entry of `inputs`, and returns the
/// terminal node. The terminal must be scalar so a single number serves as
/// the loss. For every element of every input, the analytic gradient from
/// one backward pass is compared against `(f(x+ε) − f(x−ε)) / 2ε` with an
/// absolute-plus-relative tolerance.
pub fn check_grad<T, F>(
    func: F,
    inputs: &[Payload<T>],
    epsilon: T,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    T: RevNumeric,
    F: Fn(&mut Graph<T>, &[NodeId]) -> Result<NodeId, RevGradError>,
{
    let evaluate = |values: &[Payload<T>]| -> Result<f64, GradCheckError> {
        let mut graph = Graph::new();
        let ids: Vec<NodeId> = values.iter().map(|p| graph.leaf(p.clone())).collect();
        let output = func(&mut graph, &ids).map_err(GradCheckError::ForwardPassError)?;
        let value = graph
            .value(output)
            .map_err(GradCheckError::ForwardPassError)?;
        match value.as_scalar() {
            Some(v) => Ok(v.to_f64().unwrap_or(f64::NAN)),
            None => Err(GradCheckError::NonScalarTerminal {
                shape: value.shape(),
            }),
        }
    };

    // --- Analytical gradients from one forward + backward pass ---
    let mut graph = Graph::new();
    let ids: Vec<NodeId> = inputs.iter().map(|p| graph.leaf(p.clone())).collect();
    let output = func(&mut graph, &ids).map_err(GradCheckError::ForwardPassError)?;
    let output_shape = graph
        .shape(output)
        .map_err(GradCheckError::ForwardPassError)?;
    if output_shape != Shape::Scalar {
        return Err(GradCheckError::NonScalarTerminal {
            shape: output_shape,
        });
    }
    graph
        .backward(output)
        .map_err(GradCheckError::BackwardPassError)?;

    let analytical: Vec<Vec<f64>> = ids
        .iter()
        .map(|&id| {
            graph
                .grad(id)
                .map(|p| {
                    p.to_vec()
                        .into_iter()
                        .map(|x| x.to_f64().unwrap_or(f64::NAN))
                        .collect()
                })
                .map_err(GradCheckError::BackwardPassError)
        })
        .collect::<Result<_, _>>()?;

    // --- Numerical gradients via central differences ---
    let epsilon_f64 = epsilon.to_f64().unwrap_or(f64::NAN);
    for (input_index, input) in inputs.iter().enumerate() {
        for element_index in 0..input.numel() {
            let base = input.get(element_index);

            let mut plus = inputs.to_vec();
            plus[input_index].set(element_index, base + epsilon);
            let loss_plus = evaluate(&plus)?;

            let mut minus = inputs.to_vec();
            minus[input_index].set(element_index, base - epsilon);
            let loss_minus = evaluate(&minus)?;

            let numerical = (loss_plus - loss_minus) / (2.0 * epsilon_f64);
            if numerical.is_nan() || numerical.is_infinite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index,
                    element_index,
                    loss_plus,
                    loss_minus,
                });
            }

            let analytical = analytical[input_index][element_index];
            let difference = (analytical - numerical).abs();
            if difference > tolerance && difference / (analytical.abs() + epsilon_f64) > tolerance {
                return Err(GradCheckError::GradientMismatch {
                    input_index,
                    element_index,
                    analytical,
                    numerical,
                    difference,
                });
            }
        }
    }

    Ok(())
}

// --- Tests ---
