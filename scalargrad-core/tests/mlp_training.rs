use scalargrad_core::model::Mlp;
use scalargrad_core::nn::Module;
use scalargrad_core::{EngineError, Graph};

mod common;
use common::{operands, squared_error_loss};

#[test]
fn test_mlp_gradients_are_finite() -> Result<(), EngineError> {
    let mut graph = Graph::new();
    let mlp = Mlp::seeded(&mut graph, 3, &[4, 4, 1], 1337)?;
    let params = mlp.parameters();
    assert_eq!(params.len(), 41);

    let out = mlp.forward_scalar(&mut graph, &operands(&[2.0, 3.0, -1.0]))?;
    let diff = graph.sub(out, 1.0);
    let loss = graph.pow(diff, 2)?;
    graph.backward(loss);

    assert!(graph.value(loss).is_finite());
    for p in params {
        let g = graph.grad(p);
        assert!(g.is_finite(), "parameter {} has gradient {}", p, g);
    }
    Ok(())
}

#[test]
fn test_gradient_descent_reduces_loss() -> Result<(), EngineError> {
    let samples = vec![
        vec![2.0, 3.0, -1.0],
        vec![3.0, -1.0, 0.5],
        vec![0.5, 1.0, 1.0],
        vec![1.0, 1.0, -1.0],
    ];
    let targets = [1.0, -1.0, -1.0, 1.0];
    let learning_rate = 0.05;

    let mut graph = Graph::new();
    let mlp = Mlp::seeded(&mut graph, 3, &[4, 4, 1], 42)?;
    let params = mlp.parameters();
    // Everything past the parameters is rebuilt on each step
    let parameter_count = graph.len();

    let mut losses = Vec::new();
    for _ in 0..20 {
        let loss = squared_error_loss(&mut graph, &mlp, &samples, &targets)?;
        losses.push(graph.value(loss));

        mlp.zero_grad(&mut graph);
        graph.backward(loss);
        for &p in &params {
            let updated = graph.value(p) - learning_rate * graph.grad(p);
            graph.set_value(p, updated)?;
        }
        graph.truncate(parameter_count);
    }

    assert_eq!(graph.len(), parameter_count);
    let first = losses[0];
    let last = losses[losses.len() - 1];
    assert!(last < first, "loss went from {} to {}", first, last);
    Ok(())
}

#[test]
fn test_set_value_rejects_derived_nodes() -> Result<(), EngineError> {
    let mut graph = Graph::new();
    let mlp = Mlp::seeded(&mut graph, 2, &[1], 0)?;
    let out = mlp.forward_scalar(&mut graph, &operands(&[1.0, 2.0]))?;
    assert!(matches!(
        graph.set_value(out, 0.0),
        Err(EngineError::NotALeaf { .. })
    ));
    Ok(())
}
