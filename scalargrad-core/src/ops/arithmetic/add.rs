use crate::autograd::{Graph, NodeId, Op};
use crate::ops::Operand;

// --- Forward Operation ---

impl Graph {
    /// `a + b`. Backward passes the upstream gradient unchanged to both inputs.
    pub fn add(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> NodeId {
        let a = self.as_node(a);
        let b = self.as_node(b);
        let value = self.value(a) + self.value(b);
        self.push(value, Op::Add(a, b))
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
