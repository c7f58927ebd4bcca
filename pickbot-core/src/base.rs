//! Core functionalities.
mod env;
mod policy;
mod step;
pub use env::Env;
pub use policy::{Configurable, Policy};
use std::fmt::Debug;
pub use step::{Info, Step};

/// An observation of an environment.
///
/// Observations are handed to a [`Policy`] as they are. A policy exported from
/// a training procedure consumes the observation as a flat vector, so the
/// number of its scalar elements is part of the contract.
pub trait Obs: Clone + Debug {
    /// Returns the number of scalar elements of the flattened observation.
    fn len(&self) -> usize;
}

/// An action of an environment.
pub trait Act: Clone + Debug {
    /// Returns the number of discrete actions the environment accepts.
    fn n_actions() -> usize
    where
        Self: Sized;
}
