//! Environment.
use super::{Act, Info, Obs, Step};
use crate::record::Record;
use anyhow::Result;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Represents an environment, typically an MDP.
///
/// An environment owns its whole simulation state. Callers drive it with
/// [`Env::reset`] and [`Env::step`] and may read, but never write, the state
/// through methods of the concrete type.
///
/// ```mermaid
/// graph LR
///     Env --> Obs
///     Obs --> Policy
///     Policy --> Act
///     Act --> Env
/// ```
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Performes an environment step.
    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record)
    where
        Self: Sized;

    /// Starts a new episode.
    ///
    /// If `seed` is given, the random source of the environment is reseeded
    /// before the new episode is generated.
    fn reset(&mut self, seed: Option<u64>) -> Result<(Self::Obs, Self::Info)>;

    /// Resets the environment with a given index.
    ///
    /// The index is used as the random seed of the episode, which makes
    /// evaluation runs reproducible. This method is called in
    /// [`DefaultEvaluator`](crate::DefaultEvaluator).
    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        let (obs, _) = self.reset(Some(ix as u64))?;
        Ok(obs)
    }
}
