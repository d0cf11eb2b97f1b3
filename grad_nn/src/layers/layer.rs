//! A fully connected layer of neurons.

use grad_core::Value;
use rand::Rng;

use crate::layers::Neuron;
use crate::module::Module;

/// `nout` neurons sharing the same inputs.
pub struct Layer {
    neurons: Vec<Neuron>,
}

impl Layer {
    /// Create a layer mapping `nin` inputs to `nout` outputs.
    pub fn new(rng: &mut impl Rng, nin: usize, nout: usize, nonlin: bool) -> Self {
        let neurons = (0..nout)
            .map(|_| Neuron::new(rng, nin, nonlin))
            .collect();
        Layer { neurons }
    }

    /// Forward pass: every neuron applied to the same inputs.
    pub fn forward(&self, inputs: &[Value]) -> Vec<Value> {
        self.neurons.iter().map(|n| n.forward(inputs)).collect()
    }

    /// Number of outputs this layer produces.
    pub fn nout(&self) -> usize {
        self.neurons.len()
    }
}

impl Module for Layer {
    fn parameters(&self) -> Vec<Value> {
        self.neurons.iter().flat_map(|n| n.parameters()).collect()
    }
}
