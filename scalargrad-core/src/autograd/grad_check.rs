use crate::autograd::{Graph, NodeId};
use crate::error::EngineError;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}: Analytical grad {analytical_grad:?} != Numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },

    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(EngineError),

    #[error("Numerical gradient is NaN or infinite for input {input_index}. Details: Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },

    #[error("Analytical gradient is NaN or infinite for input {input_index}. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite { input_index: usize, value: f64 },
}

/// Checks analytical gradients against numerical gradients using central finite differences.
///
/// `func` builds a scalar expression on the graph it is given, from one leaf per entry of
/// `inputs`, and returns the root. It is called once for the analytical pass and twice per
/// input for the perturbed evaluations, each time on a fresh [`Graph`].
///
/// An input passes if the absolute difference is within `tolerance`, or the difference relative
/// to the analytical gradient is.
pub fn check_grad<F>(
    func: F,
    inputs: &[f64],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&mut Graph, &[NodeId]) -> Result<NodeId, EngineError>,
{
    // --- 1. Analytical gradients ---
    let mut graph = Graph::new();
    let leaves: Vec<NodeId> = inputs.iter().map(|&x| graph.leaf(x)).collect();
    let output = func(&mut graph, &leaves).map_err(GradCheckError::ForwardPassError)?;
    graph.backward(output);
    let analytical_grads: Vec<f64> = leaves.iter().map(|&leaf| graph.grad(leaf)).collect();

    // --- 2. Numerical gradients, one input at a time ---
    for (i, &analytical_grad) in analytical_grads.iter().enumerate() {
        let loss_plus = evaluate(&func, inputs, i, epsilon)?;
        let loss_minus = evaluate(&func, inputs, i, -epsilon)?;
        let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);

        if !numerical_grad.is_finite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                input_index: i,
                loss_plus,
                loss_minus,
            });
        }
        if !analytical_grad.is_finite() {
            return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                input_index: i,
                value: analytical_grad,
            });
        }

        let difference = (analytical_grad - numerical_grad).abs();
        if difference > tolerance && (difference / (analytical_grad.abs() + epsilon)) > tolerance {
            return Err(GradCheckError::GradientMismatch {
                input_index: i,
                analytical_grad,
                numerical_grad,
                difference,
            });
        }
    }

    Ok(())
}

/// Forward value of `func` with input `index` shifted by `delta`.
fn evaluate<F>(func: &F, inputs: &[f64], index: usize, delta: f64) -> Result<f64, GradCheckError>
where
    F: Fn(&mut Graph, &[NodeId]) -> Result<NodeId, EngineError>,
{
    let mut graph = Graph::new();
    let leaves: Vec<NodeId> = inputs
        .iter()
        .enumerate()
        .map(|(j, &x)| graph.leaf(if j == index { x + delta } else { x }))
        .collect();
    let output = func(&mut graph, &leaves).map_err(GradCheckError::ForwardPassError)?;
    Ok(graph.value(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::Op;

    #[test]
    fn test_check_grad_passes_for_correct_rules() -> Result<(), GradCheckError> {
        // f(a, b) = tanh(a * b + a ** 2) * exp(b)
        let func = |graph: &mut Graph, x: &[NodeId]| -> Result<NodeId, EngineError> {
            let ab = graph.mul(x[0], x[1]);
            let a2 = graph.pow(x[0], 2.0)?;
            let sum = graph.add(ab, a2);
            let t = graph.tanh(sum);
            let e = graph.exp(x[1]);
            Ok(graph.mul(t, e))
        };
        check_grad(func, &[0.3, -0.7], 1e-5, 1e-6)
    }

    #[test]
    fn test_check_grad_detects_wrong_gradient() {
        // Hand-built node claiming to be `a * b` but computing `a + b` in the forward pass
        let func = |graph: &mut Graph, x: &[NodeId]| {
            let value = graph.value(x[0]) + graph.value(x[1]);
            Ok(graph.push(value, Op::Mul(x[0], x[1])))
        };
        match check_grad(func, &[2.0, 5.0], 1e-5, 1e-4) {
            Err(GradCheckError::GradientMismatch { input_index, .. }) => assert_eq!(input_index, 0),
            other => panic!("Expected GradientMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_check_grad_forwards_engine_errors() {
        let func = |graph: &mut Graph, x: &[NodeId]| graph.pow(x[0], x[1]);
        match check_grad(func, &[2.0, 3.0], 1e-5, 1e-4) {
            Err(GradCheckError::ForwardPassError(EngineError::TypeKind { .. })) => {}
            other => panic!("Expected ForwardPassError(TypeKind), got {:?}", other),
        }
    }

    #[test]
    fn test_check_grad_reports_non_finite_gradient() {
        // d/dx x ** 0.5 is infinite at 0
        let func = |graph: &mut Graph, x: &[NodeId]| graph.pow(x[0], 0.5);
        assert!(check_grad(func, &[0.0], 1e-5, 1e-4).is_err());
    }
}
