use crate::payload::Shape;
use thiserror::Error;

/// Custom error type for the revgrad engine.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq + Clone for easier testing
pub enum RevGradError {
    #[error("Shape mismatch: expected {expected}, got {actual} during operation {operation}")]
    ShapeMismatch {
        expected: Shape,
        actual: Shape,
        operation: String,
    },

    #[error("Domain error in {operation}: {message}")]
    DomainError { operation: String, message: String },

    #[error("Invalid exponent for pow: {message}")]
    InvalidExponent { message: String },

    #[error("Operation {operation} requires a vector operand, got a scalar")]
    VectorRequired { operation: String },

    #[error("Fan-in mismatch: neuron expects {expected} input(s), got {actual}")]
    FanInMismatch { expected: usize, actual: usize },

    #[error("Node index {index} is out of bounds for a graph of {len} node(s)")]
    InvalidNode { index: usize, len: usize },
}
