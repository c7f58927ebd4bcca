use thiserror::Error;

/// Errors in building networks and policies.
#[derive(Error, Debug, PartialEq)]
pub enum PolicyError {
    /// The network has no layer or weights and biases do not pair up.
    #[error("Invalid network: {0}")]
    InvalidNetwork(String),

    /// A dimension of the network does not match the environment.
    #[error("{what} mismatch: expected {expected}, got {got}")]
    DimMismatch {
        /// Which dimension.
        what: &'static str,
        /// Dimension required by the environment.
        expected: usize,
        /// Dimension of the network.
        got: usize,
    },
}
