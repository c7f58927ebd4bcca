use anyhow::Result;
use pickbot_core::{Configurable, Env as _, Policy};
use pickbot_grid_env::{
    util::{RandomPolicy, RandomPolicyConfig},
    Coord, GridAct, GridEnv, GridEnvConfig, LayoutSpec, BOT_PLANE, ITEM_PLANE, PEOPLE_PLANE,
};
use std::collections::HashSet;
use test_log::test;

const EPS: f32 = 1e-5;

fn small_layout() -> LayoutSpec {
    LayoutSpec::from_json_str(
        r#"{ "rows": 5, "cols": 5, "items": { "A": [2, 2] },
             "drop": [0, 0], "start": [2, 2], "people": { "count": 0 } }"#,
    )
    .unwrap()
}

fn warehouse_layout() -> LayoutSpec {
    LayoutSpec::from_json_str(
        r#"{ "rows": 18, "cols": 30,
             "items": { "J": [15, 20], "C": [4, 10], "A": [3, 3], "B": [3, 8] },
             "drop": [1, 27], "dock": [1, 1], "people": { "count": 8 } }"#,
    )
    .unwrap()
}

fn assert_invariants(env: &GridEnv) {
    let (rows, cols) = (env.rows(), env.cols());
    assert!(env.bot().in_bounds(rows, cols));
    assert!(env.drop_zone().in_bounds(rows, cols));
    assert!(env.items().iter().all(|c| c.in_bounds(rows, cols)));
    assert!(env.people().iter().all(|c| c.in_bounds(rows, cols)));

    let people: HashSet<_> = env.people().iter().collect();
    assert_eq!(people.len(), env.people().len());
    assert!(env.people().iter().all(|p| !env.items().contains(p)));
}

#[test]
fn test_small_scenario() -> Result<()> {
    let mut env = GridEnv::build(&GridEnvConfig::default(), 0)?;
    env.reset(None)?;
    let labels = env.override_layout(&small_layout().resolve()?);
    assert_eq!(labels, vec!["A"]);

    // Before any step.
    let obs = env.observe();
    assert_eq!(obs.shape(), (5, 5, 3));
    assert_eq!(obs.get(2, 2, ITEM_PLANE), 1.0);
    assert_eq!(obs.get(2, 2, BOT_PLANE), 1.0);
    assert_eq!(obs.plane(ITEM_PLANE).sum(), 1.0);
    assert_eq!(obs.plane(BOT_PLANE).sum(), 1.0);
    assert_eq!(obs.plane(PEOPLE_PLANE).sum(), 0.0);

    let (step, _) = env.step(&GridAct::Wait);
    assert_eq!(env.bot(), Coord(2, 2));
    assert!(env.picked().contains(&0));
    assert!((step.reward - 0.99).abs() < EPS);
    assert!(!step.is_terminated);

    for act in [GridAct::Up, GridAct::Up, GridAct::Left].iter() {
        let (step, _) = env.step(act);
        assert!((step.reward + 0.01).abs() < EPS);
        assert!(!step.is_terminated);
    }
    let (step, record) = env.step(&GridAct::Left);
    assert_eq!(env.bot(), Coord(0, 0));
    assert!((step.reward - 4.99).abs() < EPS);
    assert!(step.is_terminated);
    assert!(!step.is_truncated);
    assert_eq!(record.get_scalar("episode_length")?, 5.0);
    assert_eq!(record.get_string("outcome")?, "delivered");

    // Finished episodes ignore further steps.
    let obs = env.observe();
    let (step, _) = env.step(&GridAct::Down);
    assert_eq!(step.reward, 0.0);
    assert!(step.is_terminated);
    assert!(!step.is_truncated);
    assert_eq!(step.obs, obs);
    assert_eq!(env.state().steps(), 5);
    Ok(())
}

#[test]
fn test_drop_zone_without_all_items_does_not_terminate() -> Result<()> {
    let spec = LayoutSpec::from_json_str(
        r#"{ "rows": 5, "cols": 5, "items": { "A": [4, 4] },
             "drop": [0, 1], "start": [0, 0], "people": { "count": 0 } }"#,
    )?;
    let mut env = GridEnv::build(&GridEnvConfig::default(), 0)?;
    env.override_layout(&spec.resolve()?);

    let (step, _) = env.step(&GridAct::Right);
    assert_eq!(env.bot(), env.drop_zone());
    assert!(!step.is_terminated);
    assert!((step.reward + 0.01).abs() < EPS);
    Ok(())
}

#[test]
fn test_truncation_at_step_budget() -> Result<()> {
    let mut env = GridEnv::build(&GridEnvConfig::default(), 0)?;
    env.override_layout(&small_layout().resolve()?);

    // The item is picked on the first step, the bot never reaches the drop zone.
    for i in 1..=500 {
        let (step, record) = env.step(&GridAct::Wait);
        assert!(!step.is_terminated);
        assert_eq!(step.is_truncated, i == 500, "step {}", i);
        if i == 500 {
            assert_eq!(record.get_string("outcome")?, "truncated");
        }
    }
    Ok(())
}

#[test]
fn test_invariants_hold_under_random_play() -> Result<()> {
    let config = GridEnvConfig::default().n_people(30);
    let mut env = GridEnv::build(&config, 42)?;
    let mut policy = RandomPolicy::build(RandomPolicyConfig { seed: Some(0) });

    for episode in 0..3 {
        let (mut obs, _) = env.reset(Some(episode))?;
        assert!(env.picked().is_empty());
        assert_eq!(env.items().len(), 10);
        assert_invariants(&env);

        let mut prev_picked = env.picked().clone();
        loop {
            let (step, _) = env.step(&policy.sample(&obs));
            assert_invariants(&env);
            assert!(env.picked().is_superset(&prev_picked));
            prev_picked = env.picked().clone();
            if step.is_done() {
                break;
            }
            obs = step.obs;
        }
    }
    Ok(())
}

#[test]
fn test_reset_is_reproducible() -> Result<()> {
    let mut env1 = GridEnv::build(&GridEnvConfig::default(), 1)?;
    let mut env2 = GridEnv::build(&GridEnvConfig::default(), 2)?;

    let (obs1, _) = env1.reset(Some(9))?;
    let (obs2, _) = env2.reset(Some(9))?;
    assert_eq!(obs1, obs2);
    assert_eq!(env1.state(), env2.state());
    assert_eq!(env1.bot(), Coord(1, 1));
    assert_eq!(env1.drop_zone(), Coord(1, 27));
    Ok(())
}

#[test]
fn test_override_is_idempotent() -> Result<()> {
    let layout = warehouse_layout().resolve()?;
    let mut env = GridEnv::build(&GridEnvConfig::default(), 3)?;
    env.reset(None)?;

    let labels1 = env.override_layout(&layout);
    let state1 = env.state().clone();
    let labels2 = env.override_layout(&layout);

    assert_eq!(labels1, vec!["A", "B", "C", "J"]);
    assert_eq!(labels1, labels2);
    assert_eq!(&state1, env.state());
    assert_eq!(env.items(), &[Coord(3, 3), Coord(3, 8), Coord(4, 10), Coord(15, 20)]);
    assert_eq!(env.people().len(), 8);
    assert!(!env.people().contains(&env.bot()));
    assert!(!env.people().contains(&env.drop_zone()));
    assert_invariants(&env);
    Ok(())
}

#[test]
fn test_override_clears_episode_progress() -> Result<()> {
    let mut env = GridEnv::build(&GridEnvConfig::default(), 0)?;
    let layout = small_layout().resolve()?;
    env.override_layout(&layout);
    env.step(&GridAct::Wait);
    assert_eq!(env.picked().len(), 1);

    env.override_layout(&layout);
    assert!(env.picked().is_empty());
    assert_eq!(env.state().steps(), 0);
    assert!(!env.state().is_done());
    Ok(())
}

#[test]
fn test_build_rejects_invalid_config() {
    assert!(GridEnv::build(&GridEnvConfig::default().grid_size(2, 2), 0).is_err());
    assert!(GridEnv::build(&GridEnvConfig::default().grid_size(3, 3).n_items(2), 0).is_err());
}

#[test]
fn test_obs_dim_matches_policy_input() -> Result<()> {
    let env = GridEnv::build(&GridEnvConfig::default(), 0)?;
    assert_eq!(env.obs_dim(), 18 * 30 * 3);
    assert_eq!(env.observe().as_slice().len(), env.obs_dim());
    assert_eq!(env.n_actions(), 5);
    Ok(())
}

#[test]
fn test_collision_outcome_is_recorded() -> Result<()> {
    let layout = LayoutSpec::from_json_str(
        r#"{ "rows": 1, "cols": 2, "drop": [0, 0], "dock": [0, 0], "people": { "count": 1 } }"#,
    )?
    .resolve()?;
    let mut env = GridEnv::build_with_layout(&GridEnvConfig::default(), &layout, 3);
    assert_eq!(env.people(), &[Coord(0, 1)]);

    for _ in 0..200 {
        let (step, record) = env.step(&GridAct::Wait);
        if step.is_terminated {
            assert!((step.reward + 2.01).abs() < EPS);
            assert_eq!(record.get_string("outcome")?, "collision");
            assert_eq!(env.people(), &[env.bot()]);
            return Ok(());
        }
    }
    panic!("no collision within 200 steps");
}

#[test]
fn test_fixed_layout_is_applied_at_every_reset() -> Result<()> {
    let layout = LayoutSpec::from_json_str(
        r#"{ "rows": 2, "cols": 5, "items": { "A": [0, 3] }, "drop": [1, 4], "dock": [0, 0],
             "people": { "count": 2 } }"#,
    )?
    .resolve()?;
    let mut env = GridEnv::build_with_layout(&GridEnvConfig::default(), &layout, 0);
    assert_eq!(env.labels(), &["A".to_string()]);

    env.step(&GridAct::Right);
    let (obs, _) = env.reset(None)?;
    assert_eq!(obs.shape(), (2, 5, 3));
    assert_eq!(env.items(), &[Coord(0, 3)]);
    assert_eq!(env.bot(), Coord(0, 0));
    assert_eq!(env.state().steps(), 0);
    assert_eq!(env.people().len(), 2);
    assert_eq!(env.labels(), &["A".to_string()]);
    Ok(())
}
