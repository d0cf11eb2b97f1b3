//! Stochastic Gradient Descent optimizer.

use std::collections::HashMap;

use grad_core::{NodeId, Value};

/// SGD with optional momentum.
///
/// Steps write directly into the leaf parameters via `set_data`; the graph
/// built on top of them is discarded and rebuilt by the next forward pass.
pub struct SGD {
    lr: f64,
    momentum: f64,
    /// Velocity buffers for momentum, keyed by parameter node ID.
    velocities: HashMap<NodeId, f64>,
}

impl SGD {
    /// Plain SGD.
    pub fn new(lr: f64) -> Self {
        SGD {
            lr,
            momentum: 0.0,
            velocities: HashMap::new(),
        }
    }

    /// SGD with momentum.
    pub fn with_momentum(lr: f64, momentum: f64) -> Self {
        SGD {
            lr,
            momentum,
            velocities: HashMap::new(),
        }
    }

    /// Current learning rate.
    pub fn lr(&self) -> f64 {
        self.lr
    }

    /// Change the learning rate, for schedules driven by the training loop.
    pub fn set_lr(&mut self, lr: f64) {
        self.lr = lr;
    }

    /// Apply one update to every parameter from its accumulated gradient.
    pub fn step(&mut self, params: &[Value]) {
        log::debug!("SGD step: {} params, lr = {}", params.len(), self.lr);

        for param in params {
            let grad = param.grad();

            let update = if self.momentum > 0.0 {
                // v = momentum * v + grad; param -= lr * v
                let v = self.velocities.entry(param.id()).or_insert(0.0);
                *v = self.momentum * *v + grad;
                *v
            } else {
                grad
            };

            param.set_data(param.data() - self.lr * update);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vanilla_step() {
        let params = vec![Value::new(1.0), Value::new(2.0)];
        let loss = &params[0] * 0.1 + &params[1] * 0.2;
        loss.backward();

        let mut opt = SGD::new(0.1);
        opt.step(&params);

        assert_relative_eq!(params[0].data(), 0.99, epsilon = 1e-12);
        assert_relative_eq!(params[1].data(), 1.98, epsilon = 1e-12);
    }

    #[test]
    fn test_momentum_accumulates_velocity() {
        let param = Value::new(1.0);
        let mut opt = SGD::with_momentum(0.1, 0.9);

        // Two steps with a constant gradient of 1 (loss = param).
        (&param * 1.0).backward();
        opt.step(std::slice::from_ref(&param));
        // v = 1, param = 1 - 0.1 = 0.9
        assert_relative_eq!(param.data(), 0.9, epsilon = 1e-12);

        param.zero_grad();
        (&param * 1.0).backward();
        opt.step(std::slice::from_ref(&param));
        // v = 0.9 * 1 + 1 = 1.9, param = 0.9 - 0.19 = 0.71
        assert_relative_eq!(param.data(), 0.71, epsilon = 1e-12);
    }

    #[test]
    fn test_minimizes_quadratic() {
        // Minimize (x - 3)^2 with plain SGD.
        let x = Value::new(10.0);
        let mut opt = SGD::new(0.1);

        for _ in 0..100 {
            x.zero_grad();
            let diff = &x - 3.0;
            let loss = &diff * &diff;
            loss.backward();
            opt.step(std::slice::from_ref(&x));
        }

        assert_relative_eq!(x.data(), 3.0, epsilon = 1e-6);
    }
}
