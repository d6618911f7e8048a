use crate::types::RevNumeric;
use std::fmt;

/// The shape of a node payload: a single scalar or a fixed-length 1-D vector.
///
/// Shapes are fixed at construction and never change. Elementwise binary
/// operations require both operands to have the same `Shape`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Scalar,
    Vector(usize),
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar => write!(f, "scalar"),
            Shape::Vector(n) => write!(f, "vector[{}]", n),
        }
    }
}

/// The numeric payload carried by a graph node: its value or its gradient.
///
/// A gradient always has the same shape as the value it belongs to, and is
/// initialized to the additive identity (all zeros) at node construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<T> {
    Scalar(T),
    Vector(Vec<T>),
}

impl<T: RevNumeric> Payload<T> {
    pub fn scalar(value: T) -> Self {
        Payload::Scalar(value)
    }

    pub fn vector(values: Vec<T>) -> Self {
        Payload::Vector(values)
    }

    pub fn shape(&self) -> Shape {
        match self {
            Payload::Scalar(_) => Shape::Scalar,
            Payload::Vector(v) => Shape::Vector(v.len()),
        }
    }

    /// Number of elements (1 for a scalar).
    pub fn numel(&self) -> usize {
        match self {
            Payload::Scalar(_) => 1,
            Payload::Vector(v) => v.len(),
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Payload::Scalar(_))
    }

    /// A same-shaped payload filled with the additive identity.
    pub fn zeros_like(&self) -> Self {
        self.map(|_| T::zero())
    }

    /// A same-shaped payload filled with the multiplicative identity.
    pub fn ones_like(&self) -> Self {
        self.map(|_| T::one())
    }

    /// Returns the scalar value, or `None` for a vector payload.
    pub fn as_scalar(&self) -> Option<T> {
        match self {
            Payload::Scalar(x) => Some(*x),
            Payload::Vector(_) => None,
        }
    }

    /// Flattens the payload into a plain `Vec` (length 1 for a scalar).
    pub fn to_vec(&self) -> Vec<T> {
        match self {
            Payload::Scalar(x) => vec![*x],
            Payload::Vector(v) => v.clone(),
        }
    }

    /// Element access by flat index. Panics if `index >= numel()`.
    pub fn get(&self, index: usize) -> T {
        match self {
            Payload::Scalar(x) => {
                assert_eq!(index, 0, "scalar payload has a single element");
                *x
            }
            Payload::Vector(v) => v[index],
        }
    }

    /// Element update by flat index. Panics if `index >= numel()`.
    pub(crate) fn set(&mut self, index: usize, value: T) {
        match self {
            Payload::Scalar(x) => {
                assert_eq!(index, 0, "scalar payload has a single element");
                *x = value;
            }
            Payload::Vector(v) => v[index] = value,
        }
    }

    /// Applies `f` to every element, producing a same-shaped payload.
    pub fn map<F: Fn(T) -> T>(&self, f: F) -> Self {
        match self {
            Payload::Scalar(x) => Payload::Scalar(f(*x)),
            Payload::Vector(v) => Payload::Vector(v.iter().map(|x| f(*x)).collect()),
        }
    }

    /// Zips two same-shaped payloads elementwise.
    ///
    /// Shape compatibility is validated by the operator forward rules before
    /// any payload arithmetic runs, so a mismatch here is an internal bug.
    pub fn map2<F: Fn(T, T) -> T>(&self, other: &Self, f: F) -> Self {
        match (self, other) {
            (Payload::Scalar(a), Payload::Scalar(b)) => Payload::Scalar(f(*a, *b)),
            (Payload::Vector(a), Payload::Vector(b)) => {
                assert_eq!(a.len(), b.len(), "payload lengths diverged after validation");
                Payload::Vector(a.iter().zip(b.iter()).map(|(x, y)| f(*x, *y)).collect())
            }
            _ => panic!("payload shapes diverged after validation"),
        }
    }

    /// Accumulates `other` into `self` elementwise (gradients are added into,
    /// never overwritten).
    pub(crate) fn add_assign(&mut self, other: &Self) {
        match (self, other) {
            (Payload::Scalar(a), Payload::Scalar(b)) => *a += *b,
            (Payload::Vector(a), Payload::Vector(b)) => {
                assert_eq!(a.len(), b.len(), "payload lengths diverged after validation");
                for (x, y) in a.iter_mut().zip(b.iter()) {
                    *x += *y;
                }
            }
            _ => panic!("payload shapes diverged after validation"),
        }
    }

    /// Accumulates a single scalar into every element (softmax aggregate rule).
    pub(crate) fn add_broadcast_assign(&mut self, value: T) {
        match self {
            Payload::Scalar(a) => *a += value,
            Payload::Vector(v) => {
                for x in v.iter_mut() {
                    *x += value;
                }
            }
        }
    }
}
