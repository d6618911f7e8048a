//! Builds a two-input neuron by hand and walks gradients back to its leaves.
//!
//! Run with: `cargo run --example neuron_backprop`

use revgrad_core::{Graph, Payload, RevGradError};

fn main() -> Result<(), RevGradError> {
    env_logger::init();

    let mut g = Graph::<f64>::new();

    // Inputs and parameters as labeled leaves.
    let x1 = g.leaf_labeled(Payload::scalar(2.0), "x1");
    let x2 = g.leaf_labeled(Payload::scalar(0.0), "x2");
    let w1 = g.leaf_labeled(Payload::scalar(-3.0), "w1");
    let w2 = g.leaf_labeled(Payload::scalar(1.0), "w2");
    let b = g.leaf_labeled(Payload::scalar(6.881_373_587_019_543), "b");

    // n = tanh(x1*w1 + x2*w2 + b)
    let x1w1 = g.mul(x1, w1)?;
    let x2w2 = g.mul(x2, w2)?;
    let sum = g.add(x1w1, x2w2)?;
    let pre = g.add(sum, b)?;
    let n = g.tanh(pre)?;

    println!("n = {:?}", g.value(n)?.as_scalar());

    g.backward(n)?;

    for id in [x1, x2, w1, w2, b] {
        let label = g.label(id)?.unwrap_or("?").to_string();
        let grad = g.grad(id)?.as_scalar();
        println!("d n / d {} = {:?}", label, grad);
    }

    Ok(())
}
