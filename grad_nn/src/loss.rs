//! Loss functions.

use grad_core::Value;

/// Total squared error: sum((pred - target)^2).
///
/// The squares are built as `diff * diff` so the whole loss stays inside the
/// differentiable operation catalog.
pub fn sum_squared_error(preds: &[Value], targets: &[f64]) -> Value {
    debug_assert_eq!(preds.len(), targets.len());

    let mut loss = Value::new(0.0);
    for (pred, &target) in preds.iter().zip(targets) {
        let diff = pred - target;
        loss = loss + &diff * &diff;
    }
    loss
}

/// Mean squared error: mean((pred - target)^2).
pub fn mse_loss(preds: &[Value], targets: &[f64]) -> Value {
    sum_squared_error(preds, targets) / preds.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_loss_on_exact_match() {
        let preds = vec![Value::new(1.0), Value::new(-2.0)];
        let loss = sum_squared_error(&preds, &[1.0, -2.0]);
        assert_eq!(loss.data(), 0.0);
    }

    #[test]
    fn test_sum_squared_error_value_and_gradient() {
        let preds = vec![Value::new(2.0), Value::new(0.0)];
        let loss = sum_squared_error(&preds, &[1.0, 2.0]);

        // (2-1)^2 + (0-2)^2 = 5
        assert_eq!(loss.data(), 5.0);

        loss.backward();
        // d/d(pred_i) = 2 * (pred_i - target_i)
        assert_relative_eq!(preds[0].grad(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(preds[1].grad(), -4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mse_is_scaled_sum() {
        let preds = vec![Value::new(0.0), Value::new(0.0)];
        let mse = mse_loss(&preds, &[1.0, 1.0]);
        assert_relative_eq!(mse.data(), 1.0, epsilon = 1e-12);
    }
}
