use scalargrad_core::model::Mlp;
use scalargrad_core::{EngineError, Graph, NodeId, Operand};

// Helpers shared by the integration tests.
// Added allow(dead_code) because usage across different test crates isn't detected easily.

/// Turns plain numbers into operands for a forward pass.
#[allow(dead_code)]
pub fn operands(values: &[f64]) -> Vec<Operand> {
    values.iter().map(|&v| Operand::from(v)).collect()
}

/// Builds `(prediction - target) ** 2` summed over a batch of samples.
#[allow(dead_code)]
pub fn squared_error_loss(
    graph: &mut Graph,
    mlp: &Mlp,
    samples: &[Vec<f64>],
    targets: &[f64],
) -> Result<NodeId, EngineError> {
    let mut loss = graph.leaf(0.0);
    for (sample, &target) in samples.iter().zip(targets) {
        let prediction = mlp.forward_scalar(graph, &operands(sample))?;
        let diff = graph.sub(prediction, target);
        let sq = graph.pow(diff, 2)?;
        loss = graph.add(loss, sq);
    }
    Ok(loss)
}
