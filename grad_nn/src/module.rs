//! The trainable-module contract.

use grad_core::Value;

/// Anything that owns trainable parameters.
///
/// `parameters()` must return the same parameters in the same order on every
/// call, so an optimizer keyed on position or node ID steps deterministically.
pub trait Module {
    /// Flat list of every trainable leaf owned by this module, directly or
    /// through sub-modules.
    fn parameters(&self) -> Vec<Value>;

    /// Reset the gradient of every parameter to zero.
    ///
    /// Must be called before each backward pass in a training loop: gradients
    /// accumulate across passes and the engine never resets them itself.
    fn zero_grad(&self) {
        for param in self.parameters() {
            param.zero_grad();
        }
    }
}
