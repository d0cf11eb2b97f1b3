//! Multi-layer perceptron.

use grad_core::Value;
use rand::Rng;

use crate::layers::Layer;
use crate::module::Module;

/// A stack of fully connected layers. Every layer is ReLU-activated except
/// the last, which stays linear so the output range is unconstrained.
pub struct Mlp {
    layers: Vec<Layer>,
}

impl Mlp {
    /// Create an MLP with input width `nin` and the given layer widths.
    ///
    /// `Mlp::new(rng, 3, &[4, 4, 1])` builds 3 -> 4 -> 4 -> 1.
    pub fn new(rng: &mut impl Rng, nin: usize, nouts: &[usize]) -> Self {
        let widths: Vec<usize> = std::iter::once(nin).chain(nouts.iter().copied()).collect();
        let layers = (0..nouts.len())
            .map(|i| {
                let nonlin = i != nouts.len() - 1;
                Layer::new(rng, widths[i], widths[i + 1], nonlin)
            })
            .collect();
        Mlp { layers }
    }

    /// Forward pass through every layer.
    pub fn forward(&self, inputs: &[Value]) -> Vec<Value> {
        let mut activations = inputs.to_vec();
        for layer in &self.layers {
            activations = layer.forward(&activations);
        }
        activations
    }

    /// Convenience forward for raw scalar inputs (promoted to leaf nodes).
    pub fn forward_data(&self, inputs: &[f64]) -> Vec<Value> {
        let promoted: Vec<Value> = inputs.iter().map(|&v| Value::new(v)).collect();
        self.forward(&promoted)
    }
}

impl Module for Mlp {
    fn parameters(&self) -> Vec<Value> {
        self.layers.iter().flat_map(|l| l.parameters()).collect()
    }
}
