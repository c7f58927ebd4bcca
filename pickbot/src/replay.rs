//! Episode recording.
//!
//! An [`EpisodeRecord`] holds the static part of an episode in
//! [`EpisodeMeta`] and one [`Frame`] per step. Coordinates are written as
//! `[row, col]` arrays.
use anyhow::{Context, Result};
use log::{debug, info};
use pickbot_core::{Env, Policy};
use pickbot_grid_env::{Coord, GridEnv, Layout};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

/// Default frame limit of a recorded episode.
pub const DEFAULT_MAX_STEPS: usize = 600;

/// Static description of a recorded episode.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct EpisodeMeta {
    pub rows: usize,
    pub cols: usize,
    pub drop: Coord,

    /// Start cell of the bot.
    pub dock: Coord,

    /// Item cells, aligned with `labels`.
    pub items: Vec<Coord>,

    pub labels: Vec<String>,
}

/// State after one step.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Frame {
    /// 0-based tick.
    pub t: usize,
    pub bot: Coord,
    pub people: Vec<Coord>,

    /// Sorted indices of collected items.
    pub picked_idx: Vec<usize>,
}

/// A recorded episode.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct EpisodeRecord {
    pub meta: EpisodeMeta,
    pub frames: Vec<Frame>,
}

impl EpisodeRecord {
    /// Writes the episode as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let wtr = BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {:?}", path))?,
        );
        serde_json::to_writer(wtr, self)?;
        Ok(())
    }

    /// Reads an episode written by [`EpisodeRecord::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let rdr = BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {:?}", path))?,
        );
        Ok(serde_json::from_reader(rdr)?)
    }
}

/// File name of the `i`-th (1-based) episode, e.g. `rl-episode-01.json`.
pub fn episode_file_name(i: usize) -> String {
    format!("rl-episode-{:02}.json", i)
}

/// Rolls an episode on a fixed layout.
///
/// The environment is reset and `layout` is applied before the first step.
/// Steps are taken until the episode terminates, is truncated, or `max_steps`
/// frames are recorded.
pub fn roll_episode<P: Policy<GridEnv>>(
    env: &mut GridEnv,
    policy: &mut P,
    layout: &Layout,
    max_steps: usize,
) -> Result<EpisodeRecord> {
    env.reset(None)?;
    let labels = env.override_layout(layout);
    let mut obs = env.observe();

    let mut frames = Vec::new();
    while frames.len() < max_steps {
        let act = policy.sample(&obs);
        let (step, _) = env.step(&act);

        frames.push(Frame {
            t: frames.len(),
            bot: env.bot(),
            people: env.people().to_vec(),
            picked_idx: env.picked().iter().copied().collect(),
        });

        if step.is_done() {
            break;
        }
        obs = step.obs;
    }
    debug!(
        "Recorded {} frames, {}/{} items picked",
        frames.len(),
        env.picked().len(),
        layout.items().len()
    );

    Ok(EpisodeRecord {
        meta: EpisodeMeta {
            rows: env.rows(),
            cols: env.cols(),
            drop: env.drop_zone(),
            dock: layout.start(),
            items: env.items().to_vec(),
            labels,
        },
        frames,
    })
}

/// Records `n_episodes` episodes into `out_dir`, returning the written paths.
pub fn write_episodes<P: Policy<GridEnv>>(
    env: &mut GridEnv,
    policy: &mut P,
    layout: &Layout,
    n_episodes: usize,
    max_steps: usize,
    out_dir: impl AsRef<Path>,
) -> Result<Vec<std::path::PathBuf>> {
    let out_dir = out_dir.as_ref();
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {:?}", out_dir))?;

    let mut paths = Vec::with_capacity(n_episodes);
    for i in 1..=n_episodes {
        let episode = roll_episode(env, policy, layout, max_steps)?;
        let path = out_dir.join(episode_file_name(i));
        episode.save(&path)?;
        info!("Saved {:?} ({} frames)", path, episode.frames.len());
        paths.push(path);
    }
    Ok(paths)
}
