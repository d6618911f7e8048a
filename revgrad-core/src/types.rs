use num_traits::{Float, NumAssignOps};
use std::fmt::Debug;

/// A trait representing numeric types usable as graph element values.
///
/// Bounds the element types (`f32`, `f64`) accepted by the generic operator
/// kernels. `Float` already provides `zero()`, `one()`, `exp()`, `ln()`,
/// `tanh()`, `powf()` and friends; the remaining bounds are the usual
/// requirements for storage inside the graph arena.
pub trait RevNumeric:
    Float
    + NumAssignOps // AddAssign etc. for gradient accumulation
    + Debug
    + Copy
    + Send
    + Sync
    + 'static
{
}

impl RevNumeric for f32 {}
impl RevNumeric for f64 {}

#[cfg(test)]
mod tests {
    use super::*;

    // Function requiring the RevNumeric bound; only checks that it compiles.
    fn process_numeric<T: RevNumeric>(_value: T) {}

    #[test]
    fn test_f32_impl_revnumeric() {
        process_numeric(1.0f32);
    }

    #[test]
    fn test_f64_impl_revnumeric() {
        process_numeric(1.0f64);
    }
}
