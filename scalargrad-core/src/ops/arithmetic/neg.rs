use crate::autograd::{Graph, NodeId};
use crate::ops::Operand;

impl Graph {
    /// `-a`, built as `a * -1`.
    pub fn neg(&mut self, a: impl Into<Operand>) -> NodeId {
        self.mul(a, -1.0)
    }
}
