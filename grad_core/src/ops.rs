//! Local gradient rules for each operation in the catalog.
//!
//! Each rule converts an output node's accumulated gradient into scaled
//! contributions for its producers. The rules here return the raw partial
//! d(output)/d(producer_i); the backward pass multiplies by the output's
//! gradient and accumulates into each producer.

use crate::node::{Op, Value};

/// Compute the local partial derivatives of a node w.r.t. each of its
/// producers, in producer order.
///
/// Leaf nodes have no producers and return an empty vector (their rule is a
/// no-op). Only the operands and the operation's own constants (the exponent)
/// are read; no ambient state is involved.
pub(crate) fn local_gradients(op: &Op, producers: &[Value]) -> Vec<f64> {
    match op {
        Op::Leaf => vec![],

        Op::Add => {
            // out = a + b
            // d(out)/da = 1, d(out)/db = 1
            vec![1.0, 1.0]
        }

        Op::Mul => {
            // out = a * b
            // d(out)/da = b, d(out)/db = a
            let a = producers[0].data();
            let b = producers[1].data();
            vec![b, a]
        }

        Op::Pow { exponent } => {
            // out = a^p (p constant, never a node)
            // d(out)/da = p * a^(p-1)
            let a = producers[0].data();
            vec![exponent * a.powf(exponent - 1.0)]
        }

        Op::Relu => {
            // out = max(0, a)
            // d(out)/da = 1 if out > 0 else 0
            let a = producers[0].data();
            vec![if a > 0.0 { 1.0 } else { 0.0 }]
        }
    }
}
