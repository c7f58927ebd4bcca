use thiserror::Error;

/// Errors raised when building [`GridEnv`](crate::GridEnv).
#[derive(Error, Debug)]
pub enum GridEnvError {
    /// The configuration cannot produce a valid layout.
    #[error("Invalid grid environment config: {0}")]
    InvalidConfig(String),
}
