use crate::autograd::{Graph, NodeId};
use num_traits::AsPrimitive;

/// Argument accepted by every operation: an existing node or a plain number.
///
/// Numbers of any primitive type convert through `From`, so `graph.add(x, 2)`,
/// `graph.add(2.0, x)` and `graph.add(x, y)` all work.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Node(NodeId),
    Scalar(f64),
}

impl From<NodeId> for Operand {
    fn from(id: NodeId) -> Self {
        Operand::Node(id)
    }
}

impl<N: AsPrimitive<f64>> From<N> for Operand {
    fn from(value: N) -> Self {
        Operand::Scalar(value.as_())
    }
}

impl Graph {
    /// Resolves an operand to a node handle, creating a leaf for plain numbers.
    pub fn as_node(&mut self, operand: impl Into<Operand>) -> NodeId {
        match operand.into() {
            Operand::Node(id) => id,
            Operand::Scalar(value) => self.leaf(value),
        }
    }
}
