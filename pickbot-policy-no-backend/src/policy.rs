use crate::{Mat, Mlp, PolicyError};
use anyhow::Result;
use log::info;
use pickbot_core::{Env, Policy};
use std::{marker::PhantomData, path::Path};

/// Greedy policy over the Q-values of an [`Mlp`].
///
/// The observation is flattened to a vector whose length must equal
/// [`Mlp::in_dim`]; the network gives one Q-value per action and the first
/// action with the maximal value is taken. Use [`QNetPolicy::check_dims`]
/// before running the policy on an environment.
pub struct QNetPolicy<E> {
    mlp: Mlp,
    phantom: PhantomData<E>,
}

impl<E> QNetPolicy<E> {
    pub fn new(mlp: Mlp) -> Self {
        Self {
            mlp,
            phantom: PhantomData,
        }
    }

    /// Loads the network serialized with `bincode`.
    pub fn from_serialized_path(path: impl AsRef<Path>) -> Result<Self> {
        let mlp = Mlp::load(&path)?;
        info!(
            "Loaded Q-network from {:?} ({} inputs, {} actions)",
            path.as_ref(),
            mlp.in_dim(),
            mlp.out_dim()
        );
        Ok(Self::new(mlp))
    }

    /// Checks the network against the observation length and number of actions.
    pub fn check_dims(&self, obs_dim: usize, n_actions: usize) -> Result<(), PolicyError> {
        if self.mlp.in_dim() != obs_dim {
            return Err(PolicyError::DimMismatch {
                what: "observation length",
                expected: obs_dim,
                got: self.mlp.in_dim(),
            });
        }
        if self.mlp.out_dim() != n_actions {
            return Err(PolicyError::DimMismatch {
                what: "number of actions",
                expected: n_actions,
                got: self.mlp.out_dim(),
            });
        }
        Ok(())
    }

    /// Q-values of a batch of flattened observations, a `[n_actions, batch]` matrix.
    pub fn q_values(&self, batch: &[&[f32]]) -> Mat {
        self.mlp.forward(&Mat::from_columns(batch))
    }

    /// Greedy action indices of a batch of flattened observations.
    pub fn greedy(&self, batch: &[&[f32]]) -> Vec<usize> {
        self.q_values(batch).argmax_columns()
    }

    pub fn mlp(&self) -> &Mlp {
        &self.mlp
    }
}

impl<E> Policy<E> for QNetPolicy<E>
where
    E: Env,
    E::Obs: AsRef<[f32]>,
    E::Act: From<i64>,
{
    fn sample(&mut self, obs: &E::Obs) -> E::Act {
        let ix = self.greedy(&[obs.as_ref()])[0];
        (ix as i64).into()
    }
}
