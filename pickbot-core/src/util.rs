//! Utilities for interaction of policies and environments.
use crate::{
    record::{Record, RecordValue, Recorder},
    Env, Policy,
};
use anyhow::Result;
use log::debug;

/// Run episodes with a policy and recorder.
///
/// Every step writes a record with `reward`, `episode` and `step` merged into
/// the record returned by the environment. Returns the undiscounted return of
/// each episode.
pub fn eval_with_recorder<E, P, R>(
    env: &mut E,
    policy: &mut P,
    n_episodes: usize,
    recorder: &mut R,
) -> Result<Vec<f32>>
where
    E: Env,
    P: Policy<E>,
    R: Recorder,
{
    let mut rs = Vec::new();

    for episode in 0..n_episodes {
        let mut prev_obs = env.reset_with_index(episode)?;
        let mut count_step = 0;
        let mut r_total = 0.0;

        loop {
            let act = policy.sample(&prev_obs);
            let (step, mut record) = env.step(&act);
            r_total += step.reward;

            record.merge_inplace(Record::from_slice(&[
                ("reward", RecordValue::Scalar(step.reward)),
                ("episode", RecordValue::Scalar(episode as _)),
                ("step", RecordValue::Scalar(count_step as _)),
            ]));
            recorder.write(record);

            if step.is_done() {
                break;
            }
            prev_obs = step.obs;
            count_step += 1;
        }

        debug!("Episode {:?}, {:?} steps, return = {:?}", episode, count_step + 1, r_total);
        rs.push(r_total);
    }

    Ok(rs)
}
