use crate::autograd::{Graph, NodeId, Op};
use crate::ops::Operand;

// --- Forward Operation ---

impl Graph {
    /// Hyperbolic tangent. Backward passes `(1 - t^2) * grad`, with `t` the output value.
    pub fn tanh(&mut self, a: impl Into<Operand>) -> NodeId {
        let a = self.as_node(a);
        let value = self.value(a).tanh();
        self.push(value, Op::Tanh(a))
    }
}
