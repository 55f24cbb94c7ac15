use crate::autograd::{Graph, NodeId, Op};
use crate::ops::Operand;

// --- Forward Operation ---

impl Graph {
    /// `a * b`. Backward passes `b * grad` to `a` and `a * grad` to `b`.
    pub fn mul(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> NodeId {
        let a = self.as_node(a);
        let b = self.as_node(b);
        let value = self.value(a) * self.value(b);
        self.push(value, Op::Mul(a, b))
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
