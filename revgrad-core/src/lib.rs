// Declare the main modules of the crate
pub mod autograd;
pub mod error;
pub mod graph;
pub mod nn;
pub mod ops;
pub mod payload;
pub mod types;

// Re-export the core types so they are reachable directly via `revgrad_core::Graph`
pub use error::RevGradError;
pub use graph::{Graph, IntoNode, NodeId};
pub use payload::{Payload, Shape};
pub use types::RevNumeric;
// Re-export traits required by public functions/structs
pub use num_traits;
