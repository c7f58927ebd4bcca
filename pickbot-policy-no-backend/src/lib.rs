//! Q-network policy for pickbot without tensor backend.
//!
//! A policy trained elsewhere is exported as the weights of a multilayer
//! perceptron ([`Mlp`]) serialized with `bincode`. Its input is the flattened
//! observation (length `rows * cols * 3` for the grid environment) and its
//! output is one Q-value per discrete action. [`QNetPolicy`] runs the network
//! with plain `f32` arithmetic and acts greedily.
mod error;
mod mat;
mod mlp;
mod policy;
pub use error::PolicyError;
pub use mat::Mat;
pub use mlp::Mlp;
pub use policy::QNetPolicy;
