use crate::error::RevGradError;
use crate::graph::{Graph, NodeId};
use crate::payload::Payload;
use crate::types::RevNumeric;
use rand::distributions::uniform::SampleUniform;
use rand::Rng;
use rand_distr::{Distribution, Normal, StandardNormal};

/// Creates a labeled scalar leaf sampled uniformly from `[low, high]`.
///
/// This is the initializer the neuron/layer consumers use for weights and
/// biases (uniform on `[-1, 1]`).
pub fn uniform<T, R>(graph: &mut Graph<T>, rng: &mut R, low: T, high: T, label: &str) -> NodeId
where
    T: RevNumeric + SampleUniform,
    R: Rng + ?Sized,
{
    let sample = rng.gen_range(low..=high);
    graph.leaf_labeled(Payload::scalar(sample), label)
}

/// Creates a labeled scalar leaf sampled from `N(mean, std_dev²)`.
///
/// # Errors
/// Returns [`RevGradError::DomainError`] for an invalid (negative or
/// non-finite) standard deviation.
pub fn normal<T, R>(
    graph: &mut Graph<T>,
    rng: &mut R,
    mean: T,
    std_dev: T,
    label: &str,
) -> Result<NodeId, RevGradError>
where
    T: RevNumeric,
    StandardNormal: Distribution<T>,
    R: Rng + ?Sized,
{
    let dist = Normal::new(mean, std_dev).map_err(|e| RevGradError::DomainError {
        operation: "normal_init".to_string(),
        message: e.to_string(),
    })?;
    let sample = dist.sample(rng);
    Ok(graph.leaf_labeled(Payload::scalar(sample), label))
}

// --- Tests ---
#[cfg(test)]
#[path = "init_test.rs"]
mod tests; // Link to the test file
