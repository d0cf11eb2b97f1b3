//! # grad_core - Reverse-mode automatic differentiation over scalars
//!
//! This crate builds a directed acyclic computation graph lazily as scalar
//! arithmetic is composed, then computes the gradient of one output with
//! respect to every input in a single backward traversal.
//!
//! ## Quick start
//!
//! ```
//! use grad_core::Value;
//!
//! // Leaves are the inputs we differentiate with respect to.
//! let a = Value::new(3.0);
//! let b = Value::new(4.0);
//!
//! // Arithmetic records the graph; raw f64 operands promote to leaves.
//! let out = &a * &b + &a * 2.0;
//! assert_eq!(out.data(), 18.0);
//!
//! // One backward pass fills in gradients on every ancestor node.
//! out.backward();
//! assert_eq!(a.grad(), 6.0); // d(out)/da = b + 2
//! assert_eq!(b.grad(), 3.0); // d(out)/db = a
//! ```
//!
//! ## Supported operations
//!
//! | Category | Operations |
//! |----------|------------|
//! | Arithmetic | `+`, `-`, `*`, `/`, unary `-` |
//! | Power | [`Value::powf`] (x^c for a finite constant c) |
//! | Activation | [`Value::relu`] |
//!
//! Subtraction, division and negation are derived compositions of add,
//! multiply and power, so the backward rules for the primitives cover them.
//!
//! ## The zero-grad ritual
//!
//! Gradients only ever accumulate. Before every backward pass in a training
//! loop, reset each parameter with [`Value::zero_grad`]; calling
//! [`Value::backward`] twice without it silently doubles the gradients.
//! The engine never resets gradients on its own.
//!
//! ## Architecture
//!
//! - **[`Value`]**: reference-counted handle to one graph node, carrying the
//!   forward value, the accumulated gradient, the operation tag, and the
//!   producer edges. Cloning is O(1) and shares the node, so fan-out works.
//! - **backward**: DFS post-order over producer edges, reversed, so every
//!   consumer finishes accumulating into a node before it propagates.
//! - **[`finite_diff_grad`]**: numerical derivatives for validating the
//!   engine in tests.

mod backward;
mod error;
mod finite_diff;
mod node;
mod ops;

pub use error::GradError;
pub use finite_diff::{finite_diff_grad, max_grad_error};
pub use node::{NodeId, Op, Value};

/// Create a leaf node from a raw scalar.
///
/// Leaves are the graph's inputs and trainable parameters; their gradient
/// rule is a no-op.
pub fn leaf(data: f64) -> Value {
    Value::new(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_additive_gradient_rule() {
        // Chain rule for addition is identity.
        let a = leaf(2.0);
        let b = leaf(-3.5);
        let out = &a + &b;

        out.backward();

        assert_eq!(out.grad(), 1.0);
        assert_eq!(a.grad(), 1.0);
        assert_eq!(b.grad(), 1.0);
    }

    #[test]
    fn test_product_rule() {
        let a = leaf(3.0);
        let b = leaf(4.0);
        let out = &a * &b;

        out.backward();

        assert_eq!(out.data(), 12.0);
        assert_eq!(a.grad(), 4.0);
        assert_eq!(b.grad(), 3.0);
    }

    #[test]
    fn test_power_rule() {
        let a = leaf(2.0);
        let out = a.powf(3.0).unwrap();

        out.backward();

        assert_eq!(out.data(), 8.0);
        assert_eq!(a.grad(), 12.0); // 3 * 2^2
    }

    #[test]
    fn test_relu_gate_negative() {
        let a = leaf(-5.0);
        let out = a.relu();

        out.backward();

        assert_eq!(out.data(), 0.0);
        assert_eq!(a.grad(), 0.0);
    }

    #[test]
    fn test_relu_gate_positive() {
        let a = leaf(5.0);
        let out = a.relu();

        out.backward();

        assert_eq!(out.data(), 5.0);
        assert_eq!(a.grad(), 1.0);
    }

    #[test]
    fn test_division() {
        // out = a / b, d(out)/da = 1/b, d(out)/db = -a/b^2
        let a = leaf(6.0);
        let b = leaf(2.0);
        let out = &a / &b;

        out.backward();

        assert_eq!(out.data(), 3.0);
        assert_relative_eq!(a.grad(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(b.grad(), -1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_subtraction() {
        let a = leaf(5.0);
        let b = leaf(2.0);
        let out = &a - &b;

        out.backward();

        assert_eq!(out.data(), 3.0);
        assert_eq!(a.grad(), 1.0);
        assert_eq!(b.grad(), -1.0);
    }

    #[test]
    fn test_division_by_zero_propagates_infinity() {
        let a = leaf(1.0);
        let b = leaf(0.0);
        let out = &a / &b;

        assert!(out.data().is_infinite());
    }

    #[test]
    fn test_composite_expression() {
        // Adapted from the classic sanity check:
        // y = relu(x^2 + x*3 + 2) at x = -1 -> inside = 1 - 3 + 2 = 0
        let x = leaf(-1.0);
        let inside = x.powf(2.0).unwrap() + &x * 3.0 + 2.0;
        let y = inside.relu();

        y.backward();

        assert_eq!(y.data(), 0.0);
        assert_eq!(x.grad(), 0.0);

        // Same expression at x = 2 -> inside = 4 + 6 + 2 = 12, relu passes,
        // dy/dx = 2x + 3 = 7.
        let x = leaf(2.0);
        let inside = x.powf(2.0).unwrap() + &x * 3.0 + 2.0;
        let y = inside.relu();

        y.backward();

        assert_eq!(y.data(), 12.0);
        assert_relative_eq!(x.grad(), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_gradients_validated_against_finite_diff() {
        // f(x, y) = (x*y + x^2) / (y + 2)
        let build = |v: &[f64]| {
            let x = Value::new(v[0]);
            let y = Value::new(v[1]);
            let num = &x * &y + x.powf(2.0).unwrap();
            let den = &y + 2.0;
            let out = &num / &den;
            (x, y, out)
        };

        let point = [1.5, 2.5];
        let (x, y, out) = build(&point);
        out.backward();

        let fd = finite_diff_grad(|v| build(v).2.data(), &point, 1e-7);

        assert_relative_eq!(x.grad(), fd[0], epsilon = 1e-5);
        assert_relative_eq!(y.grad(), fd[1], epsilon = 1e-5);
    }
}
