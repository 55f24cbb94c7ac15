use crate::autograd::backward_op::{propagate_gradient, Op};
use crate::error::EngineError;
use log::{debug, warn};
use std::collections::HashSet;
use std::fmt;

/// Handle to a node stored in a [`Graph`].
///
/// Handles are plain indices into the graph's arena. They are only meaningful for the graph
/// that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single scalar in the computation graph, together with the operation that produced it.
///
/// Everything except `grad` (and the diagnostic `label`) is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    value: f64,
    grad: f64,
    operands: Vec<NodeId>,
    op: Op,
    label: String,
}

impl Node {
    fn new(value: f64, op: Op) -> Self {
        let mut operands = Vec::with_capacity(2);
        for input in op.inputs() {
            if !operands.contains(&input) {
                operands.push(input);
            }
        }
        Node {
            value,
            grad: 0.0,
            operands,
            op,
            label: String::new(),
        }
    }

    /// The forward value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Accumulated gradient of the last backward root with respect to this node.
    pub fn grad(&self) -> f64 {
        self.grad
    }

    pub(crate) fn accumulate_grad(&mut self, contribution: f64) {
        self.grad += contribution;
    }

    /// Distinct nodes this node was computed from. `x + x` has a single operand.
    pub fn operands(&self) -> &[NodeId] {
        &self.operands
    }

    pub fn op(&self) -> &Op {
        &self.op
    }

    /// Diagnostic tag of the producing operation (`"+"`, `"*"`, `"**2"`, `"tanh"`, ...).
    pub fn operator_tag(&self) -> String {
        self.op.tag()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.op, Op::Leaf)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value(data={})", self.value)
    }
}

/// Arena holding every node of a computation.
///
/// Nodes are appended by the operations in [`crate::ops`] and are never removed individually.
/// Operands always have a smaller index than the nodes that consume them, so the arena is
/// acyclic by construction.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    pub fn new() -> Self {
        Graph { nodes: Vec::new() }
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends a node produced by `op`. Used by every operation in `ops`.
    pub(crate) fn push(&mut self, value: f64, op: Op) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new(value, op));
        id
    }

    /// Creates a leaf node (no operands) holding `value`.
    pub fn leaf(&mut self, value: f64) -> NodeId {
        self.push(value, Op::Leaf)
    }

    /// Creates a leaf node with a diagnostic label.
    pub fn leaf_labeled(&mut self, value: f64, label: impl Into<String>) -> NodeId {
        let id = self.leaf(value);
        self.nodes[id.0].label = label.into();
        id
    }

    /// Returns the node behind `id`, or `None` if the handle is not part of this graph.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Like [`Graph::get`], but reports a foreign handle as an [`EngineError::UnknownNode`].
    pub fn try_node(&self, id: NodeId) -> Result<&Node, EngineError> {
        self.nodes.get(id.0).ok_or(EngineError::UnknownNode {
            node: id,
            len: self.nodes.len(),
        })
    }

    /// Returns the node behind `id`.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this graph (or was dropped by [`Graph::truncate`]).
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Shortcut for `self.node(id).value()`.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this graph (or was dropped by [`Graph::truncate`]).
    pub fn value(&self, id: NodeId) -> f64 {
        self.nodes[id.0].value
    }

    /// Shortcut for `self.node(id).grad()`.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this graph (or was dropped by [`Graph::truncate`]).
    pub fn grad(&self, id: NodeId) -> f64 {
        self.nodes[id.0].grad
    }

    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) -> Result<(), EngineError> {
        let len = self.nodes.len();
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or(EngineError::UnknownNode { node: id, len })?;
        node.label = label.into();
        Ok(())
    }

    /// Overwrites the value of a leaf node, e.g. to apply a parameter update.
    ///
    /// Nodes computed from this leaf keep their old values; run a new forward pass to see the
    /// change. Derived nodes cannot be overwritten and return [`EngineError::NotALeaf`].
    pub fn set_value(&mut self, id: NodeId, value: f64) -> Result<(), EngineError> {
        let len = self.nodes.len();
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or(EngineError::UnknownNode { node: id, len })?;
        if !node.is_leaf() {
            return Err(EngineError::NotALeaf {
                node: id,
                op: node.op.tag(),
            });
        }
        node.value = value;
        Ok(())
    }

    /// Resets the gradient of every node in the graph to zero.
    pub fn zero_grad(&mut self) {
        self.nodes.iter_mut().for_each(|node| node.grad = 0.0);
    }

    /// Resets the gradient of the given nodes. Handles that are not part of this graph are skipped.
    pub fn zero_grad_of(&mut self, ids: &[NodeId]) {
        for &id in ids {
            match self.nodes.get_mut(id.0) {
                Some(node) => node.grad = 0.0,
                None => warn!("zero_grad_of: skipping unknown node {}", id),
            }
        }
    }

    /// Drops every node whose index is `len` or greater.
    ///
    /// Remaining nodes never reference dropped ones, so the graph stays consistent. Handles to
    /// dropped nodes become invalid.
    pub fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    /// Nodes reachable from `root`, each placed after all of its operands. `root` comes last.
    ///
    /// # Panics
    /// Panics if `root` (or anything reachable from it) does not belong to this graph.
    pub fn topological_order(&self, root: NodeId) -> Vec<NodeId> {
        topological_sort(&self.nodes, root)
    }

    /// Runs reverse-mode differentiation from `root`.
    ///
    /// Seeds `root`'s gradient with `1.0`, then visits every reachable node consumers-first and
    /// accumulates into its operands' gradients. Afterwards each reachable node holds
    /// ∂root/∂node.
    ///
    /// Gradients are **not** reset first. Calling `backward` again on an overlapping graph sums
    /// into the existing values; call [`Graph::zero_grad`] (or
    /// [`Module::zero_grad`](crate::nn::Module::zero_grad)) between cycles.
    ///
    /// # Panics
    /// Panics if `root` does not belong to this graph.
    pub fn backward(&mut self, root: NodeId) {
        let order = topological_sort(&self.nodes, root);
        debug!("backward: root {} reaches {} nodes", root, order.len());

        let root_node = &mut self.nodes[root.0];
        if root_node.grad != 0.0 {
            warn!(
                "backward: root {} already had gradient {} before seeding, gradients are accumulated across calls",
                root, root_node.grad
            );
        }
        root_node.grad = 1.0;

        for &id in order.iter().rev() {
            propagate_gradient(&mut self.nodes, id);
        }
    }
}

/// Depth-first post-order over the operand relation starting at `root`.
///
/// The traversal uses an explicit stack so that long chains (e.g. a wide neuron's running sum)
/// do not exhaust the call stack.
pub(crate) fn topological_sort(nodes: &[Node], root: NodeId) -> Vec<NodeId> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut sorted = Vec::new();
    // (node, operands already pushed)
    let mut stack = vec![(root, false)];

    while let Some((id, expanded)) = stack.pop() {
        if expanded {
            sorted.push(id);
            continue;
        }
        if !visited.insert(id) {
            continue;
        }
        stack.push((id, true));
        for &operand in nodes[id.0].operands.iter().rev() {
            if !visited.contains(&operand) {
                stack.push((operand, false));
            }
        }
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_defaults() {
        let mut graph = Graph::new();
        let x = graph.leaf(3.5);
        let node = graph.node(x);
        assert_eq!(node.value(), 3.5);
        assert_eq!(node.grad(), 0.0);
        assert!(node.operands().is_empty());
        assert!(node.is_leaf());
        assert_eq!(node.operator_tag(), "");
        assert_eq!(node.label(), "");
        assert_eq!(node.to_string(), "Value(data=3.5)");
    }

    #[test]
    fn test_labels() {
        let mut graph = Graph::new();
        let a = graph.leaf_labeled(1.0, "a");
        let b = graph.leaf(2.0);
        graph.set_label(b, "b").unwrap();
        assert_eq!(graph.node(a).label(), "a");
        assert_eq!(graph.node(b).label(), "b");
    }

    #[test]
    fn test_duplicate_operands_are_deduplicated() {
        let mut graph = Graph::new();
        let x = graph.leaf(3.0);
        let y = graph.add(x, x);
        assert_eq!(graph.node(y).operands(), &[x]);
        assert_eq!(graph.node(y).op().inputs(), vec![x, x]);
    }

    #[test]
    fn test_topological_order_operands_first() {
        let mut graph = Graph::new();
        let a = graph.leaf(2.0);
        let b = graph.leaf(-3.0);
        let c = graph.leaf(10.0);
        let e = graph.mul(a, b);
        let d = graph.add(e, c);

        let order = graph.topological_order(d);
        assert_eq!(order.len(), 5);
        assert_eq!(*order.last().unwrap(), d);
        let pos = |id: NodeId| order.iter().position(|&n| n == id).unwrap();
        assert!(pos(a) < pos(e));
        assert!(pos(b) < pos(e));
        assert!(pos(e) < pos(d));
        assert!(pos(c) < pos(d));
    }

    #[test]
    fn test_topological_order_shared_operand_visited_once() {
        // c = a * b, d = c + a: `a` is reached through two paths
        let mut graph = Graph::new();
        let a = graph.leaf(2.0);
        let b = graph.leaf(4.0);
        let c = graph.mul(a, b);
        let d = graph.add(c, a);

        let order = graph.topological_order(d);
        assert_eq!(order.iter().filter(|&&n| n == a).count(), 1);
        assert_eq!(order.len(), 4);
    }

    #[test]
    fn test_topological_order_ignores_unreachable_nodes() {
        let mut graph = Graph::new();
        let a = graph.leaf(1.0);
        let unrelated = graph.leaf(5.0);
        let b = graph.exp(a);

        let order = graph.topological_order(b);
        assert_eq!(order, vec![a, b]);

        graph.backward(b);
        assert_eq!(graph.grad(unrelated), 0.0);
    }

    #[test]
    fn test_backward_on_leaf_seeds_gradient() {
        let mut graph = Graph::new();
        let x = graph.leaf(7.0);
        graph.backward(x);
        assert_eq!(graph.grad(x), 1.0);
    }

    #[test]
    fn test_backward_accumulates_across_calls() {
        let mut graph = Graph::new();
        let x = graph.leaf(2.0);
        let y = graph.mul(x, 3.0);
        graph.backward(y);
        assert_eq!(graph.grad(x), 3.0);

        // Second call without resetting sums into the existing gradient
        graph.backward(y);
        assert_eq!(graph.grad(x), 6.0);

        graph.zero_grad();
        graph.backward(y);
        assert_eq!(graph.grad(x), 3.0);
    }

    #[test]
    fn test_set_value_only_on_leaves() {
        let mut graph = Graph::new();
        let x = graph.leaf(1.0);
        let y = graph.tanh(x);

        graph.set_value(x, 0.5).unwrap();
        assert_eq!(graph.value(x), 0.5);

        match graph.set_value(y, 0.0) {
            Err(EngineError::NotALeaf { node, op }) => {
                assert_eq!(node, y);
                assert_eq!(op, "tanh");
            }
            other => panic!("Expected NotALeaf, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_node() {
        let mut big = Graph::new();
        big.leaf(0.0);
        let foreign = big.leaf(1.0);

        let mut small = Graph::new();
        small.leaf(0.0);
        assert!(small.get(foreign).is_none());
        assert_eq!(
            small.try_node(foreign),
            Err(EngineError::UnknownNode { node: foreign, len: 1 })
        );
        assert!(small.set_value(foreign, 2.0).is_err());
    }

    #[test]
    fn test_truncate_keeps_earlier_nodes() {
        let mut graph = Graph::new();
        let w = graph.leaf(0.5);
        let mark = graph.len();

        let y = graph.mul(w, 4.0);
        graph.backward(y);
        assert_eq!(graph.grad(w), 4.0);

        graph.truncate(mark);
        assert_eq!(graph.len(), 1);
        assert!(graph.get(y).is_none());
        assert_eq!(graph.grad(w), 4.0);

        graph.zero_grad_of(&[w]);
        assert_eq!(graph.grad(w), 0.0);
    }

    #[test]
    #[should_panic]
    fn test_value_of_truncated_node_panics() {
        let mut graph = Graph::new();
        let w = graph.leaf(0.5);
        let y = graph.mul(w, 2.0);
        graph.truncate(1);
        graph.value(y);
    }

    #[test]
    #[should_panic]
    fn test_op_on_foreign_node_panics() {
        let mut other = Graph::new();
        other.leaf(1.0);
        let foreign = other.leaf(2.0);
        let mut graph = Graph::new();
        graph.tanh(foreign);
    }
}
