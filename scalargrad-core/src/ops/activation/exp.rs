use crate::autograd::{Graph, NodeId, Op};
use crate::ops::Operand;

impl Graph {
    /// `e ** a`. Backward passes `out.value * grad`.
    pub fn exp(&mut self, a: impl Into<Operand>) -> NodeId {
        let a = self.as_node(a);
        let value = self.value(a).exp();
        self.push(value, Op::Exp(a))
    }
}
