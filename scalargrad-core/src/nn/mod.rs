// src/nn/mod.rs
// Neural network building blocks on top of the scalar engine.

pub mod init;
pub mod layers;
pub mod module; // Trait Module
pub mod neuron;

// Re-export common items
pub use init::Init;
pub use layers::layer::Layer;
pub use module::Module;
pub use neuron::{Activation, Neuron};
