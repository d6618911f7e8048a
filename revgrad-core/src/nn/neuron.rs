use crate::error::RevGradError;
use crate::graph::{Graph, NodeId};
use crate::nn::init;
use crate::types::RevNumeric;
use rand::distributions::uniform::SampleUniform;
use rand::Rng;

/// A single neuron: `fan_in` weight leaves plus a bias leaf, all initialized
/// uniformly on `[-1, 1]`, composed as `tanh(Σ wᵢ·xᵢ + b)`.
///
/// The neuron only holds node ids; all state lives in the graph that created
/// it, and its output is built purely through the operator set, so the
/// engine's acyclic-DAG invariant is preserved.
#[derive(Debug, Clone)]
pub struct Neuron {
    weights: Vec<NodeId>,
    bias: NodeId,
}

impl Neuron {
    pub fn new<T, R>(graph: &mut Graph<T>, fan_in: usize, rng: &mut R) -> Self
    where
        T: RevNumeric + SampleUniform,
        R: Rng + ?Sized,
    {
        let weights = (0..fan_in)
            .map(|i| {
                init::uniform(
                    graph,
                    rng,
                    -T::one(),
                    T::one(),
                    &format!("w_{}", i),
                )
            })
            .collect();
        let bias = init::uniform(graph, rng, -T::one(), T::one(), "b");
        Neuron { weights, bias }
    }

    pub fn fan_in(&self) -> usize {
        self.weights.len()
    }

    /// Builds the neuron's output node from one input node per weight.
    ///
    /// # Errors
    /// Returns [`RevGradError::FanInMismatch`] when the number of inputs does
    /// not match the number of weights.
    pub fn forward<T: RevNumeric>(
        &self,
        graph: &mut Graph<T>,
        inputs: &[NodeId],
    ) -> Result<NodeId, RevGradError> {
        if inputs.len() != self.weights.len() {
            return Err(RevGradError::FanInMismatch {
                expected: self.weights.len(),
                actual: inputs.len(),
            });
        }

        // act = b + Σ w_i * x_i
        let mut activation = self.bias;
        for (&weight, &input) in self.weights.iter().zip(inputs.iter()) {
            let term = graph.mul(weight, input)?;
            activation = graph.add(activation, term)?;
        }
        graph.tanh(activation)
    }

    /// The flat list of trainable leaf nodes (weights, then bias).
    pub fn parameters(&self) -> Vec<NodeId> {
        let mut params = self.weights.clone();
        params.push(self.bias);
        params
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "neuron_test.rs"]
mod tests; // Link to the test file
