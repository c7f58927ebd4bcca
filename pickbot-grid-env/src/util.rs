//! Utilities for drivers and tests.
use crate::{GridAct, GridEnv, GridObs};
use pickbot_core::{Act, Configurable, Policy};
use serde::{Deserialize, Serialize};

/// Configuration of [`RandomPolicy`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct RandomPolicyConfig {
    /// Seed of the policy's random source. Unseeded if `None`.
    pub seed: Option<u64>,
}

/// Picks an action uniformly at random.
pub struct RandomPolicy {
    rng: fastrand::Rng,
}

impl Policy<GridEnv> for RandomPolicy {
    fn sample(&mut self, _: &GridObs) -> GridAct {
        GridAct::from(self.rng.usize(..GridAct::n_actions()) as i64)
    }
}

impl Configurable<GridEnv> for RandomPolicy {
    type Config = RandomPolicyConfig;

    fn build(config: Self::Config) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self { rng }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use pickbot_core::Env;
    use std::io::Write;
    use tempdir::TempDir;

    #[test]
    fn test_build_from_path() -> Result<()> {
        let dir = TempDir::new("random_policy")?;
        let path = dir.path().join("random_policy.yaml");
        std::fs::File::create(&path)?.write_all(b"seed: 7\n")?;

        let env = GridEnv::build(&Default::default(), 0)?;
        let obs = env.observe();
        let mut p1 = RandomPolicy::build_from_path(&path)?;
        let mut p2 = RandomPolicy::build(RandomPolicyConfig { seed: Some(7) });
        for _ in 0..20 {
            assert_eq!(p1.sample(&obs), p2.sample(&obs));
        }
        Ok(())
    }
}
