//! A single neuron: weighted sum plus bias, with optional ReLU.

use grad_core::Value;
use rand::Rng;

use crate::module::Module;

/// One neuron: `relu(w . x + b)` (or the raw affine value when linear).
pub struct Neuron {
    weights: Vec<Value>,
    bias: Value,
    nonlin: bool,
}

impl Neuron {
    /// Create a neuron with `nin` inputs.
    ///
    /// Weights are drawn uniformly from [-1, 1) using the caller's random
    /// source, so a seeded generator gives reproducible networks. Bias
    /// starts at zero.
    pub fn new(rng: &mut impl Rng, nin: usize, nonlin: bool) -> Self {
        let weights = (0..nin)
            .map(|_| Value::new(rng.gen_range(-1.0..1.0)))
            .collect();
        Neuron {
            weights,
            bias: Value::new(0.0),
            nonlin,
        }
    }

    /// Forward pass: dot product with the inputs plus bias, gated by ReLU
    /// when the neuron is nonlinear.
    pub fn forward(&self, inputs: &[Value]) -> Value {
        debug_assert_eq!(inputs.len(), self.weights.len());

        let mut act = self.bias.clone();
        for (w, x) in self.weights.iter().zip(inputs) {
            act = act + w * x;
        }

        if self.nonlin {
            act.relu()
        } else {
            act
        }
    }

    /// Number of inputs this neuron accepts.
    pub fn nin(&self) -> usize {
        self.weights.len()
    }
}

impl Module for Neuron {
    fn parameters(&self) -> Vec<Value> {
        let mut params = self.weights.clone();
        params.push(self.bias.clone());
        params
    }
}
