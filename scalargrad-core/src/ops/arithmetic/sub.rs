use crate::autograd::{Graph, NodeId};
use crate::ops::Operand;

impl Graph {
    /// `a - b`, built as `a + (-b)`.
    ///
    /// A numeric `b` is negated directly instead of going through a `* -1` node.
    pub fn sub(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> NodeId {
        let negated = match b.into() {
            Operand::Scalar(value) => Operand::Scalar(-value),
            Operand::Node(id) => Operand::Node(self.neg(id)),
        };
        self.add(a, negated)
    }
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
