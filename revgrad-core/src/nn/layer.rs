use crate::error::RevGradError;
use crate::graph::{Graph, NodeId};
use crate::nn::neuron::Neuron;
use crate::types::RevNumeric;
use rand::distributions::uniform::SampleUniform;
use rand::Rng;

/// A fully-connected layer: `fan_out` independent neurons sharing the same
/// `fan_in`, each producing one output node.
#[derive(Debug, Clone)]
pub struct Layer {
    neurons: Vec<Neuron>,
}

impl Layer {
    pub fn new<T, R>(graph: &mut Graph<T>, fan_in: usize, fan_out: usize, rng: &mut R) -> Self
    where
        T: RevNumeric + SampleUniform,
        R: Rng + ?Sized,
    {
        let neurons = (0..fan_out)
            .map(|_| Neuron::new(graph, fan_in, rng))
            .collect();
        Layer { neurons }
    }

    pub fn fan_out(&self) -> usize {
        self.neurons.len()
    }

    /// Runs every neuron over the same inputs, one output node per neuron.
    ///
    /// # Errors
    /// Returns [`RevGradError::FanInMismatch`] when the number of inputs does
    /// not match the layer's fan-in.
    pub fn forward<T: RevNumeric>(
        &self,
        graph: &mut Graph<T>,
        inputs: &[NodeId],
    ) -> Result<Vec<NodeId>, RevGradError> {
        self.neurons
            .iter()
            .map(|neuron| neuron.forward(graph, inputs))
            .collect()
    }

    /// All trainable leaves of the layer, neuron by neuron.
    pub fn parameters(&self) -> Vec<NodeId> {
        self.neurons
            .iter()
            .flat_map(|neuron| neuron.parameters())
            .collect()
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "layer_test.rs"]
mod tests; // Link to the test file
