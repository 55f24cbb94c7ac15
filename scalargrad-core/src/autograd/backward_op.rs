use crate::autograd::graph::{Node, NodeId};
use log::trace;

/// How a node was produced, and therefore how it passes its gradient back.
///
/// Binary variants keep their inputs in call order, duplicates included: for `x * x` both
/// slots hold `x`, and the backward rule accumulates into it twice. The deduplicated operand
/// set used for traversal lives on the [`Node`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    /// Input, parameter or coerced constant. Passes nothing back.
    Leaf,
    Add(NodeId, NodeId),
    Mul(NodeId, NodeId),
    /// `base ** exponent` with a constant exponent.
    Pow { base: NodeId, exponent: f64 },
    Tanh(NodeId),
    Exp(NodeId),
    Relu(NodeId),
}

impl Op {
    /// Inputs in call order (may contain the same node twice).
    pub fn inputs(&self) -> Vec<NodeId> {
        match *self {
            Op::Leaf => Vec::new(),
            Op::Add(a, b) | Op::Mul(a, b) => vec![a, b],
            Op::Pow { base, .. } => vec![base],
            Op::Tanh(a) | Op::Exp(a) | Op::Relu(a) => vec![a],
        }
    }

    /// Short diagnostic tag, e.g. `"+"` or `"**-1"`. Empty for leaves.
    pub fn tag(&self) -> String {
        match self {
            Op::Leaf => String::new(),
            Op::Add(..) => "+".to_string(),
            Op::Mul(..) => "*".to_string(),
            Op::Pow { exponent, .. } => format!("**{}", exponent),
            Op::Tanh(_) => "tanh".to_string(),
            Op::Exp(_) => "exp".to_string(),
            Op::Relu(_) => "relu".to_string(),
        }
    }
}

/// Applies the chain rule for a single node: reads the node's gradient and accumulates the
/// local contribution into each of its inputs.
///
/// Must run after every consumer of `id` has been processed, which the reverse topological
/// order in [`Graph::backward`](crate::autograd::Graph::backward) guarantees.
pub(crate) fn propagate_gradient(nodes: &mut [Node], id: NodeId) {
    let (op, out_value, out_grad) = {
        let node = &nodes[id.index()];
        (*node.op(), node.value(), node.grad())
    };

    match op {
        Op::Leaf => {}
        Op::Add(a, b) => {
            accumulate(nodes, a, out_grad);
            accumulate(nodes, b, out_grad);
        }
        Op::Mul(a, b) => {
            let (a_value, b_value) = (nodes[a.index()].value(), nodes[b.index()].value());
            accumulate(nodes, a, b_value * out_grad);
            accumulate(nodes, b, a_value * out_grad);
        }
        Op::Pow { base, exponent } => {
            let base_value = nodes[base.index()].value();
            accumulate(
                nodes,
                base,
                exponent * base_value.powf(exponent - 1.0) * out_grad,
            );
        }
        Op::Tanh(a) => {
            accumulate(nodes, a, (1.0 - out_value * out_value) * out_grad);
        }
        Op::Exp(a) => {
            accumulate(nodes, a, out_value * out_grad);
        }
        Op::Relu(a) => {
            let local = if out_value > 0.0 { 1.0 } else { 0.0 };
            accumulate(nodes, a, local * out_grad);
        }
    }

    if !matches!(op, Op::Leaf) {
        trace!("propagated {} from {} ({})", out_grad, id, op.tag());
    }
}

fn accumulate(nodes: &mut [Node], id: NodeId, contribution: f64) {
    nodes[id.index()].accumulate_grad(contribution);
}
