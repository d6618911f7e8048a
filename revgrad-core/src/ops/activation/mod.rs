pub mod softmax;
pub mod tanh;

pub use softmax::softmax_op;
pub use tanh::tanh_op;
