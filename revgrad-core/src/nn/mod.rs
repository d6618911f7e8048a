// Parameter-holding consumers of the engine: neurons and layers composed
// entirely from the operator set.

pub mod init;
pub mod layer;
pub mod neuron;

// Re-export common items
pub use layer::Layer;
pub use neuron::Neuron;
