//! Core data structures for the computation graph.
//!
//! The graph is built from `Value` nodes, which are reference-counted handles
//! to internal `Node` structures. This makes cloning cheap and lets the same
//! sub-node feed several consumers (fan-out), which an exclusively-owned tree
//! could not represent.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::GradError;

/// Global counter for generating unique node IDs.
static NODE_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generates a new unique node ID.
fn next_node_id() -> u64 {
    NODE_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Unique identifier for a node in the computation graph.
///
/// Used for visited sets during traversal and as a stable key for optimizer
/// state (momentum buffers and the like).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u64);

/// The operation that produced a node.
///
/// This is a closed catalog: negation, subtraction and division are derived
/// compositions of these primitives and never appear as tags of their own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    /// A leaf node (input or trainable parameter); has no producers.
    Leaf,
    /// Addition: prev[0] + prev[1]
    Add,
    /// Multiplication: prev[0] * prev[1]
    Mul,
    /// Power with constant exponent: prev[0]^exponent
    Pow { exponent: f64 },
    /// Rectified linear unit: max(0, prev[0])
    Relu,
}

impl Op {
    /// Short human-readable tag for diagnostics.
    pub fn symbol(&self) -> String {
        match self {
            Op::Leaf => "leaf".to_string(),
            Op::Add => "+".to_string(),
            Op::Mul => "*".to_string(),
            Op::Pow { exponent } => format!("**{}", exponent),
            Op::Relu => "ReLU".to_string(),
        }
    }
}

/// Internal node structure holding the forward value, the accumulated
/// gradient, the operation tag, and the producer edges.
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    op: Op,
    /// Forward value, written once at construction. The engine never rewrites
    /// it; only [`Value::set_data`] (optimizer updates on leaves) does.
    data: Cell<f64>,
    /// Accumulated partial derivative of the backward root w.r.t. this node.
    /// Mutated only through accumulation (`+=`) and explicit zeroing.
    grad: Cell<f64>,
    /// Producer edges: the nodes combined to create this one. Empty for leaves.
    prev: Vec<Value>,
}

/// One scalar value in the computation graph.
///
/// `Value` is a reference-counted handle to a [`Node`]. Cloning is O(1) and
/// shares the underlying node, so a value used twice as an operand contributes
/// twice to its own gradient (the contributions sum, never overwrite).
///
/// Arithmetic on `Value` builds the graph lazily; nothing is differentiated
/// until [`Value::backward`] is called on a terminal node.
///
/// # Gradient accumulation hazard
///
/// A second `backward` call without zeroing gradients first adds on top of the
/// gradients from the previous pass. Call [`Value::zero_grad`] on every
/// parameter before each new backward pass; the engine never resets gradients
/// on its own.
#[derive(Debug, Clone)]
pub struct Value(Rc<Node>);

impl Value {
    /// Create a leaf node holding `data`, with gradient 0 and no producers.
    pub fn new(data: f64) -> Self {
        Value::from_op(data, Op::Leaf, vec![])
    }

    /// Create a new node with the given forward value, operation tag, and
    /// producer edges.
    fn from_op(data: f64, op: Op, prev: Vec<Value>) -> Self {
        Value(Rc::new(Node {
            id: NodeId(next_node_id()),
            op,
            data: Cell::new(data),
            grad: Cell::new(0.0),
            prev,
        }))
    }

    /// The unique ID of this node.
    pub fn id(&self) -> NodeId {
        self.0.id
    }

    /// The operation that produced this node.
    pub fn op(&self) -> &Op {
        &self.0.op
    }

    /// The nodes that were combined to produce this one (empty for leaves).
    pub fn producers(&self) -> &[Value] {
        &self.0.prev
    }

    /// Whether this node is a leaf (input or parameter).
    pub fn is_leaf(&self) -> bool {
        matches!(self.0.op, Op::Leaf)
    }

    /// The forward value of this node.
    pub fn data(&self) -> f64 {
        self.0.data.get()
    }

    /// Overwrite the stored value.
    ///
    /// Intended for optimizers nudging leaf parameters between training
    /// steps. Interior nodes are rebuilt by the next forward pass, so
    /// rewriting them has no meaningful effect.
    pub fn set_data(&self, data: f64) {
        self.0.data.set(data);
    }

    /// The accumulated gradient of this node.
    pub fn grad(&self) -> f64 {
        self.0.grad.get()
    }

    /// Reset the accumulated gradient to zero.
    pub fn zero_grad(&self) {
        self.0.grad.set(0.0);
    }

    /// Add `delta` into the accumulated gradient.
    pub(crate) fn accumulate_grad(&self, delta: f64) {
        self.0.grad.set(self.0.grad.get() + delta);
    }

    /// Seed the gradient with an exact value (used for the backward root).
    pub(crate) fn seed_grad(&self, grad: f64) {
        self.0.grad.set(grad);
    }

    // === Operation catalog ===

    fn add_nodes(a: &Value, b: &Value) -> Value {
        Value::from_op(a.data() + b.data(), Op::Add, vec![a.clone(), b.clone()])
    }

    fn mul_nodes(a: &Value, b: &Value) -> Value {
        Value::from_op(a.data() * b.data(), Op::Mul, vec![a.clone(), b.clone()])
    }

    /// Power node without exponent validation; callers pass statically finite
    /// constants (e.g. the -1 used by division).
    fn pow_node(&self, exponent: f64) -> Value {
        Value::from_op(
            self.data().powf(exponent),
            Op::Pow { exponent },
            vec![self.clone()],
        )
    }

    /// Raise to a constant power: self^exponent.
    ///
    /// Fails fast with [`GradError::InvalidExponent`] if the exponent is not a
    /// finite real number; no node is constructed in that case. Node-valued
    /// exponents are not supported. Domain edge cases (negative base with a
    /// fractional exponent) are not guarded and produce NaN, matching plain
    /// floating-point semantics.
    pub fn powf(&self, exponent: f64) -> Result<Value, GradError> {
        if !exponent.is_finite() {
            return Err(GradError::InvalidExponent(exponent));
        }
        Ok(self.pow_node(exponent))
    }

    /// Rectified linear unit: max(0, self).
    pub fn relu(&self) -> Value {
        let data = self.data();
        Value::from_op(
            if data > 0.0 { data } else { 0.0 },
            Op::Relu,
            vec![self.clone()],
        )
    }

    /// Compute gradients of this node with respect to every ancestor.
    ///
    /// Runs a single reverse-topological pass; afterwards every node
    /// reachable through producer edges holds d(self)/d(node) in its `grad`.
    /// See the accumulation hazard note on [`Value`].
    pub fn backward(&self) {
        crate::backward::backward(self);
    }
}

impl From<f64> for Value {
    /// Promote a raw scalar to a leaf node.
    fn from(data: f64) -> Self {
        Value::new(data)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value(data={}, grad={})", self.data(), self.grad())
    }
}

// === Operator overloads ===
//
// Each binary operation is provided for every combination of owned/borrowed
// operands, plus f64 on either side (promoted to a leaf node). Subtraction,
// division and negation are derived compositions of add, mul and pow.

impl std::ops::Add for &Value {
    type Output = Value;

    fn add(self, rhs: &Value) -> Value {
        Value::add_nodes(self, rhs)
    }
}

impl std::ops::Add<Value> for &Value {
    type Output = Value;

    fn add(self, rhs: Value) -> Value {
        Value::add_nodes(self, &rhs)
    }
}

impl std::ops::Add<&Value> for Value {
    type Output = Value;

    fn add(self, rhs: &Value) -> Value {
        Value::add_nodes(&self, rhs)
    }
}

impl std::ops::Add for Value {
    type Output = Value;

    fn add(self, rhs: Value) -> Value {
        Value::add_nodes(&self, &rhs)
    }
}

impl std::ops::Add<f64> for &Value {
    type Output = Value;

    fn add(self, rhs: f64) -> Value {
        Value::add_nodes(self, &Value::new(rhs))
    }
}

impl std::ops::Add<f64> for Value {
    type Output = Value;

    fn add(self, rhs: f64) -> Value {
        Value::add_nodes(&self, &Value::new(rhs))
    }
}

impl std::ops::Add<&Value> for f64 {
    type Output = Value;

    fn add(self, rhs: &Value) -> Value {
        Value::add_nodes(&Value::new(self), rhs)
    }
}

impl std::ops::Add<Value> for f64 {
    type Output = Value;

    fn add(self, rhs: Value) -> Value {
        Value::add_nodes(&Value::new(self), &rhs)
    }
}

impl std::ops::Mul for &Value {
    type Output = Value;

    fn mul(self, rhs: &Value) -> Value {
        Value::mul_nodes(self, rhs)
    }
}

impl std::ops::Mul<Value> for &Value {
    type Output = Value;

    fn mul(self, rhs: Value) -> Value {
        Value::mul_nodes(self, &rhs)
    }
}

impl std::ops::Mul<&Value> for Value {
    type Output = Value;

    fn mul(self, rhs: &Value) -> Value {
        Value::mul_nodes(&self, rhs)
    }
}

impl std::ops::Mul for Value {
    type Output = Value;

    fn mul(self, rhs: Value) -> Value {
        Value::mul_nodes(&self, &rhs)
    }
}

impl std::ops::Mul<f64> for &Value {
    type Output = Value;

    fn mul(self, rhs: f64) -> Value {
        Value::mul_nodes(self, &Value::new(rhs))
    }
}

impl std::ops::Mul<f64> for Value {
    type Output = Value;

    fn mul(self, rhs: f64) -> Value {
        Value::mul_nodes(&self, &Value::new(rhs))
    }
}

impl std::ops::Mul<&Value> for f64 {
    type Output = Value;

    fn mul(self, rhs: &Value) -> Value {
        Value::mul_nodes(&Value::new(self), rhs)
    }
}

impl std::ops::Mul<Value> for f64 {
    type Output = Value;

    fn mul(self, rhs: Value) -> Value {
        Value::mul_nodes(&Value::new(self), &rhs)
    }
}

impl std::ops::Neg for &Value {
    type Output = Value;

    fn neg(self) -> Value {
        Value::mul_nodes(self, &Value::new(-1.0))
    }
}

impl std::ops::Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        Value::mul_nodes(&self, &Value::new(-1.0))
    }
}

impl std::ops::Sub for &Value {
    type Output = Value;

    fn sub(self, rhs: &Value) -> Value {
        Value::add_nodes(self, &-rhs)
    }
}

impl std::ops::Sub<Value> for &Value {
    type Output = Value;

    fn sub(self, rhs: Value) -> Value {
        Value::add_nodes(self, &-rhs)
    }
}

impl std::ops::Sub<&Value> for Value {
    type Output = Value;

    fn sub(self, rhs: &Value) -> Value {
        Value::add_nodes(&self, &-rhs)
    }
}

impl std::ops::Sub for Value {
    type Output = Value;

    fn sub(self, rhs: Value) -> Value {
        Value::add_nodes(&self, &-rhs)
    }
}

impl std::ops::Sub<f64> for &Value {
    type Output = Value;

    fn sub(self, rhs: f64) -> Value {
        Value::add_nodes(self, &Value::new(-rhs))
    }
}

impl std::ops::Sub<f64> for Value {
    type Output = Value;

    fn sub(self, rhs: f64) -> Value {
        Value::add_nodes(&self, &Value::new(-rhs))
    }
}

impl std::ops::Sub<&Value> for f64 {
    type Output = Value;

    fn sub(self, rhs: &Value) -> Value {
        Value::add_nodes(&Value::new(self), &-rhs)
    }
}

impl std::ops::Sub<Value> for f64 {
    type Output = Value;

    fn sub(self, rhs: Value) -> Value {
        Value::add_nodes(&Value::new(self), &-rhs)
    }
}

impl std::ops::Div for &Value {
    type Output = Value;

    fn div(self, rhs: &Value) -> Value {
        Value::mul_nodes(self, &rhs.pow_node(-1.0))
    }
}

impl std::ops::Div<Value> for &Value {
    type Output = Value;

    fn div(self, rhs: Value) -> Value {
        Value::mul_nodes(self, &rhs.pow_node(-1.0))
    }
}

impl std::ops::Div<&Value> for Value {
    type Output = Value;

    fn div(self, rhs: &Value) -> Value {
        Value::mul_nodes(&self, &rhs.pow_node(-1.0))
    }
}

impl std::ops::Div for Value {
    type Output = Value;

    fn div(self, rhs: Value) -> Value {
        Value::mul_nodes(&self, &rhs.pow_node(-1.0))
    }
}

impl std::ops::Div<f64> for &Value {
    type Output = Value;

    fn div(self, rhs: f64) -> Value {
        Value::mul_nodes(self, &Value::new(rhs).pow_node(-1.0))
    }
}

impl std::ops::Div<f64> for Value {
    type Output = Value;

    fn div(self, rhs: f64) -> Value {
        Value::mul_nodes(&self, &Value::new(rhs).pow_node(-1.0))
    }
}

impl std::ops::Div<&Value> for f64 {
    type Output = Value;

    fn div(self, rhs: &Value) -> Value {
        Value::mul_nodes(&Value::new(self), &rhs.pow_node(-1.0))
    }
}

impl std::ops::Div<Value> for f64 {
    type Output = Value;

    fn div(self, rhs: Value) -> Value {
        Value::mul_nodes(&Value::new(self), &rhs.pow_node(-1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_construction() {
        let x = Value::new(2.5);
        assert_eq!(x.data(), 2.5);
        assert_eq!(x.grad(), 0.0);
        assert!(x.is_leaf());
        assert!(x.producers().is_empty());
    }

    #[test]
    fn test_construction_does_not_touch_operands() {
        let a = Value::new(3.0);
        let b = Value::new(4.0);
        let _out = &a * &b;

        assert_eq!(a.data(), 3.0);
        assert_eq!(b.data(), 4.0);
        assert_eq!(a.grad(), 0.0);
        assert_eq!(b.grad(), 0.0);
    }

    #[test]
    fn test_producer_edges() {
        let a = Value::new(1.0);
        let b = Value::new(2.0);
        let out = &a + &b;

        assert_eq!(out.producers().len(), 2);
        assert_eq!(out.producers()[0].id(), a.id());
        assert_eq!(out.producers()[1].id(), b.id());
        assert_eq!(*out.op(), Op::Add);
    }

    #[test]
    fn test_scalar_promotion() {
        let x = Value::new(2.0);

        assert_eq!((&x + 3.0).data(), 5.0);
        assert_eq!((3.0 + &x).data(), 5.0);
        assert_eq!((&x * 4.0).data(), 8.0);
        assert_eq!((4.0 * &x).data(), 8.0);
        assert_eq!((&x - 1.0).data(), 1.0);
        assert_eq!((1.0 - &x).data(), -1.0);
        assert_eq!((&x / 4.0).data(), 0.5);
        assert_eq!((4.0 / &x).data(), 2.0);

        let promoted = Value::from(7.0);
        assert!(promoted.is_leaf());
        assert_eq!(promoted.data(), 7.0);
    }

    #[test]
    fn test_derived_operations() {
        let a = Value::new(6.0);
        let b = Value::new(2.0);

        assert_eq!((-&a).data(), -6.0);
        assert_eq!((&a - &b).data(), 4.0);
        assert_eq!((&a / &b).data(), 3.0);

        // Derived ops are compositions; no dedicated tag exists for them.
        let neg = -&a;
        assert_eq!(*neg.op(), Op::Mul);
    }

    #[test]
    fn test_powf_rejects_non_finite_exponent() {
        let x = Value::new(2.0);

        assert!(matches!(
            x.powf(f64::NAN),
            Err(GradError::InvalidExponent(_))
        ));
        assert!(matches!(
            x.powf(f64::INFINITY),
            Err(GradError::InvalidExponent(_))
        ));
        assert!(x.powf(3.0).is_ok());
    }

    #[test]
    fn test_powf_domain_edge_propagates_nan() {
        // Negative base, fractional exponent: NaN value, not an error.
        let x = Value::new(-4.0);
        let out = x.powf(0.5).unwrap();
        assert!(out.data().is_nan());
    }

    #[test]
    fn test_relu_forward() {
        assert_eq!(Value::new(5.0).relu().data(), 5.0);
        assert_eq!(Value::new(-5.0).relu().data(), 0.0);
        assert_eq!(Value::new(0.0).relu().data(), 0.0);
    }

    #[test]
    fn test_display_renders_data_and_grad() {
        let x = Value::new(2.0);
        assert_eq!(format!("{}", x), "Value(data=2, grad=0)");

        let y = &x * &x;
        y.backward();
        assert_eq!(format!("{}", x), "Value(data=2, grad=4)");
    }

    #[test]
    fn test_op_symbols() {
        assert_eq!(Op::Leaf.symbol(), "leaf");
        assert_eq!(Op::Add.symbol(), "+");
        assert_eq!(Op::Mul.symbol(), "*");
        assert_eq!(Op::Pow { exponent: 2.0 }.symbol(), "**2");
        assert_eq!(Op::Relu.symbol(), "ReLU");
    }

    #[test]
    fn test_clone_shares_node() {
        let x = Value::new(1.0);
        let y = x.clone();
        assert_eq!(x.id(), y.id());

        x.set_data(9.0);
        assert_eq!(y.data(), 9.0);
    }
}
