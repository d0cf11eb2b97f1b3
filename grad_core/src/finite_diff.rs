//! Finite difference utilities for gradient verification.
//!
//! Numerical derivatives for cross-checking the backward pass in tests and
//! demos.

/// Compute gradients using central finite differences.
///
/// # Arguments
/// * `f` - Function that takes a slice of leaf values and returns a scalar
/// * `point` - The point at which to compute gradients
/// * `eps` - Step size (typically 1e-7 to 1e-5)
///
/// # Returns
/// Vector of partial derivatives [df/dx_0, df/dx_1, ...] at the given point
///
/// # Example
/// ```
/// use grad_core::{finite_diff_grad, Value};
///
/// // f(a, b) = a * b + a^2, df/da = b + 2a, df/db = a
/// let f = |v: &[f64]| {
///     let a = Value::new(v[0]);
///     let b = Value::new(v[1]);
///     (&a * &b + &a * &a).data()
/// };
/// let grads = finite_diff_grad(f, &[3.0, 4.0], 1e-7);
///
/// assert!((grads[0] - 10.0).abs() < 1e-5);
/// assert!((grads[1] - 3.0).abs() < 1e-5);
/// ```
pub fn finite_diff_grad<F>(f: F, point: &[f64], eps: f64) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let n = point.len();
    let mut grads = Vec::with_capacity(n);
    let mut perturbed = point.to_vec();

    for i in 0..n {
        // Central difference: (f(x + eps) - f(x - eps)) / (2 * eps)
        perturbed[i] = point[i] + eps;
        let f_plus = f(&perturbed);

        perturbed[i] = point[i] - eps;
        let f_minus = f(&perturbed);

        perturbed[i] = point[i];

        grads.push((f_plus - f_minus) / (2.0 * eps));
    }

    grads
}

/// Maximum absolute difference between two gradient vectors.
pub fn max_grad_error(grad1: &[f64], grad2: &[f64]) -> f64 {
    assert_eq!(grad1.len(), grad2.len());
    grad1
        .iter()
        .zip(grad2.iter())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Value;

    #[test]
    fn test_finite_diff_quadratic() {
        // f(x, y) = x^2 + 2xy + y^2, both partials are 2x + 2y
        let f = |v: &[f64]| v[0] * v[0] + 2.0 * v[0] * v[1] + v[1] * v[1];
        let grads = finite_diff_grad(f, &[1.0, 2.0], 1e-7);

        assert!((grads[0] - 6.0).abs() < 1e-5);
        assert!((grads[1] - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_backward_matches_finite_diff() {
        // f(a, b, c) = relu(a*b + c) * (a - c)
        let build = |v: &[f64]| {
            let a = Value::new(v[0]);
            let b = Value::new(v[1]);
            let c = Value::new(v[2]);
            let gated = (&a * &b + &c).relu();
            let out = &gated * &(&a - &c);
            (a, b, c, out)
        };

        let point = [1.5, 2.0, 0.5];
        let (a, b, c, out) = build(&point);
        out.backward();

        let fd = finite_diff_grad(|v| build(v).3.data(), &point, 1e-7);

        let ad = [a.grad(), b.grad(), c.grad()];
        assert!(max_grad_error(&ad, &fd) < 1e-5);
    }

    #[test]
    fn test_max_grad_error() {
        let g1 = vec![1.0, 2.0, 3.0];
        let g2 = vec![1.1, 2.0, 2.8];

        let err = max_grad_error(&g1, &g2);
        assert!((err - 0.2).abs() < 1e-10);
    }
}
