//! Adam optimizer.

use std::collections::HashMap;

use grad_core::{NodeId, Value};

/// Adam (Adaptive Moment Estimation) over scalar parameters.
pub struct Adam {
    lr: f64,
    beta1: f64,
    beta2: f64,
    eps: f64,
    /// First moment estimates, keyed by parameter node ID.
    m: HashMap<NodeId, f64>,
    /// Second moment estimates.
    v: HashMap<NodeId, f64>,
    /// Step counter for bias correction.
    t: u64,
}

impl Adam {
    /// Adam with the usual default hyperparameters.
    pub fn new(lr: f64) -> Self {
        Adam {
            lr,
            beta1: 0.9,
            beta2: 0.999,
            eps: 1e-8,
            m: HashMap::new(),
            v: HashMap::new(),
            t: 0,
        }
    }

    /// Adam with custom hyperparameters.
    pub fn with_params(lr: f64, beta1: f64, beta2: f64, eps: f64) -> Self {
        Adam {
            lr,
            beta1,
            beta2,
            eps,
            m: HashMap::new(),
            v: HashMap::new(),
            t: 0,
        }
    }

    /// Apply one update to every parameter from its accumulated gradient.
    pub fn step(&mut self, params: &[Value]) {
        self.t += 1;
        log::debug!("Adam step {}: {} params", self.t, params.len());

        let bias_correction1 = 1.0 - self.beta1.powi(self.t as i32);
        let bias_correction2 = 1.0 - self.beta2.powi(self.t as i32);

        for param in params {
            let grad = param.grad();

            let m = self.m.entry(param.id()).or_insert(0.0);
            let v = self.v.entry(param.id()).or_insert(0.0);

            *m = self.beta1 * *m + (1.0 - self.beta1) * grad;
            *v = self.beta2 * *v + (1.0 - self.beta2) * grad * grad;

            let m_hat = *m / bias_correction1;
            let v_hat = *v / bias_correction2;

            param.set_data(param.data() - self.lr * m_hat / (v_hat.sqrt() + self.eps));
        }
    }

    /// Drop all moment estimates and restart the step counter.
    pub fn reset(&mut self) {
        self.m.clear();
        self.v.clear();
        self.t = 0;
    }
}
