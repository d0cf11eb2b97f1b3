//! Reverse-mode gradient propagation.
//!
//! The backward pass:
//! 1. Builds a post-order (topological) ordering of nodes reachable from the
//!    root through producer edges.
//! 2. Seeds the root's gradient with 1.0.
//! 3. Walks the order in reverse, letting each node add its scaled gradient
//!    contribution into its producers.
//!
//! Reversed post-order guarantees that every consumer of a node has finished
//! accumulating into it before the node propagates further, which is what
//! makes fan-out (a node with several consumers) come out correct on any DAG.

use std::collections::HashSet;

use crate::node::{NodeId, Value};
use crate::ops::local_gradients;

/// Propagate gradients from `root` to every ancestor node.
///
/// After this call, every node reachable backward from `root` holds
/// d(root)/d(node) in its gradient. Gradients accumulate on top of whatever
/// was there before; callers are responsible for zeroing between passes.
pub(crate) fn backward(root: &Value) {
    let order = topological_sort(root);
    log::trace!("backward pass over {} nodes", order.len());

    // Seed: d(root)/d(root) = 1.
    root.seed_grad(1.0);

    // Root first, leaves last. By the time a node is processed, all of its
    // consumers within the traversed set have already contributed to it.
    for value in order.iter().rev() {
        let upstream = value.grad();
        if upstream == 0.0 {
            continue;
        }

        let partials = local_gradients(value.op(), value.producers());
        for (producer, partial) in value.producers().iter().zip(partials) {
            producer.accumulate_grad(upstream * partial);
        }
    }
}

/// Build a post-order listing of all nodes reachable from `root`.
///
/// DFS with a visited set: the graph may share sub-nodes, so naive recursion
/// would revisit diamonds and double-count. A node is appended only after all
/// of its producers, so the reversed list is a valid backward order.
fn topological_sort(root: &Value) -> Vec<Value> {
    let mut visited = HashSet::new();
    let mut order = Vec::new();

    fn visit(value: &Value, visited: &mut HashSet<NodeId>, order: &mut Vec<Value>) {
        if visited.contains(&value.id()) {
            return;
        }
        visited.insert(value.id());

        for producer in value.producers() {
            visit(producer, visited, order);
        }

        order.push(value.clone());
    }

    visit(root, &mut visited, &mut order);
    order
}
