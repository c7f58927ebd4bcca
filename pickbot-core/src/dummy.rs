//! Minimal environment used in tests of this crate.
use crate::{record::Record, Act, Env, Obs, Policy, Step};
use anyhow::Result;

#[derive(Clone, Debug)]
/// Remaining steps of the episode.
pub struct CountdownObs(pub usize);

impl Obs for CountdownObs {
    fn len(&self) -> usize {
        1
    }
}

#[derive(Clone, Debug)]
/// The only action.
pub struct Tick;

impl Act for Tick {
    fn n_actions() -> usize {
        1
    }
}

/// Terminates after a fixed number of steps, with reward 1 per step.
pub struct CountdownEnv {
    len: usize,
    remaining: usize,
}

impl Env for CountdownEnv {
    type Config = usize;
    type Obs = CountdownObs;
    type Act = Tick;
    type Info = ();

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self {
            len: *config,
            remaining: *config,
        })
    }

    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        self.remaining = self.remaining.saturating_sub(1);
        let is_terminated = self.remaining == 0;
        let step = Step::new(
            CountdownObs(self.remaining),
            a.clone(),
            1.0,
            is_terminated,
            false,
            (),
        );
        (step, Record::empty())
    }

    fn reset(&mut self, _seed: Option<u64>) -> Result<(Self::Obs, Self::Info)> {
        self.remaining = self.len;
        Ok((CountdownObs(self.remaining), ()))
    }
}

/// Always ticks.
pub struct CountdownPolicy;

impl Policy<CountdownEnv> for CountdownPolicy {
    fn sample(&mut self, _obs: &CountdownObs) -> Tick {
        Tick
    }
}
