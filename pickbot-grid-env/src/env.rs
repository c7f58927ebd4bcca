mod config;
mod motion;
mod spawn;
mod state;
use crate::{
    layout::{default_drop, DEFAULT_START},
    Coord, GridAct, GridObs, Layout, N_PLANES,
};
use anyhow::Result;
pub use config::GridEnvConfig;
use log::{debug, info};
use pickbot_core::{
    record::{Record, RecordValue},
    Act, Env, Step,
};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use spawn::{spawn_items, spawn_people};
pub use state::EpisodeState;
use std::collections::BTreeSet;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Warehouse pick-and-deliver environment.
///
/// Every call of [`Env::step`] runs the transition below. A finished episode
/// ignores further steps and reports zero reward.
///
/// ```mermaid
/// graph TD
///     A[count step, reward -0.01] --> B[move bot unless a person is there]
///     B --> C[collect items under the bot, +1.0 each]
///     C --> D{all items and on drop zone?}
///     D -->|yes| E[+5.0, terminated]
///     D -->|no| F[people walk]
///     E --> F
///     F --> G{person on bot?}
///     G -->|yes| H[-2.0, terminated]
///     G -->|no| I[truncated if steps >= max_steps]
///     H --> I
/// ```
///
/// The environment owns its random source, so instances never share random
/// state. Right after [`Env::reset`] a driver may call
/// [`GridEnv::override_layout`] to replace the random layout with a fixed one,
/// or build the environment with [`GridEnv::build_with_layout`] so that every
/// reset starts from that layout.
pub struct GridEnv {
    config: GridEnvConfig,

    // Drives layout generation and the people.
    rng: SmallRng,

    // Drawn at every reset; seeds person placement of layout overrides.
    episode_seed: u64,

    // Item labels of the overriding layout, empty for random layouts.
    labels: Vec<String>,

    // Applied at every reset instead of a random layout.
    fixed: Option<Layout>,

    state: EpisodeState,
}

/// Generates a random layout described by `config`.
fn random_state<R: Rng + ?Sized>(config: &GridEnvConfig, rng: &mut R) -> EpisodeState {
    let (rows, cols) = (config.rows, config.cols);
    let bot = DEFAULT_START;
    let drop = default_drop(cols);
    let items = spawn_items(rng, rows, cols, config.n_items);
    let people = spawn_people(rng, rows, cols, config.n_people, &items, drop, bot);
    EpisodeState::new(rows, cols, items, people, bot, drop)
}

impl GridEnv {
    /// Replaces the current episode with the given layout.
    ///
    /// Rows, columns, items, drop zone and start cell are taken from `layout`,
    /// people are placed anew avoiding items, the drop zone and the bot, and the
    /// picked set, the step counter and the terminal flag are cleared. Returns
    /// the label order: `labels[i]` names item `i`.
    ///
    /// Call it right after [`Env::reset`] and before the first step. Applying
    /// the same layout twice within an episode yields the same state.
    pub fn override_layout(&mut self, layout: &Layout) -> Vec<String> {
        let mut rng = SmallRng::seed_from_u64(self.episode_seed);
        let people = spawn_people(
            &mut rng,
            layout.rows(),
            layout.cols(),
            layout.n_people(),
            layout.items(),
            layout.drop_zone(),
            layout.start(),
        );
        self.state = EpisodeState::new(
            layout.rows(),
            layout.cols(),
            layout.items().to_vec(),
            people,
            layout.start(),
            layout.drop_zone(),
        );
        self.labels = layout.labels().to_vec();
        debug!(
            "Applied a {}x{} layout with {} items and {} people",
            layout.rows(),
            layout.cols(),
            layout.items().len(),
            self.state.people().len()
        );

        self.labels.clone()
    }

    /// Builds an environment that starts every episode from `layout`.
    ///
    /// Only `max_steps` and `render` are taken from `config`; the grid size,
    /// items and number of people come from the layout. A layout is valid once
    /// resolved, so grids too small for random layouts are accepted here.
    pub fn build_with_layout(config: &GridEnvConfig, layout: &Layout, seed: i64) -> Self {
        let config = config
            .clone()
            .grid_size(layout.rows(), layout.cols())
            .n_items(layout.items().len())
            .n_people(layout.n_people());
        let mut rng = SmallRng::seed_from_u64(seed as u64);
        let episode_seed = rng.gen();
        let placeholder = EpisodeState::new(
            layout.rows(),
            layout.cols(),
            vec![],
            vec![],
            layout.start(),
            layout.drop_zone(),
        );

        let mut env = Self {
            config,
            rng,
            episode_seed,
            labels: vec![],
            fixed: Some(layout.clone()),
            state: placeholder,
        };
        env.override_layout(layout);
        env
    }

    /// The current episode state.
    pub fn state(&self) -> &EpisodeState {
        &self.state
    }

    /// The configuration.
    pub fn config(&self) -> &GridEnvConfig {
        &self.config
    }

    /// Item labels of the overriding layout, empty for random layouts.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.state.rows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.state.cols()
    }

    /// Position of the bot.
    pub fn bot(&self) -> Coord {
        self.state.bot()
    }

    /// Current positions of people.
    pub fn people(&self) -> &[Coord] {
        self.state.people()
    }

    /// Item coordinates.
    pub fn items(&self) -> &[Coord] {
        self.state.items()
    }

    /// Indices of collected items.
    pub fn picked(&self) -> &BTreeSet<usize> {
        self.state.picked()
    }

    /// Drop zone.
    pub fn drop_zone(&self) -> Coord {
        self.state.drop_zone()
    }

    /// Encodes the current state.
    pub fn observe(&self) -> GridObs {
        self.state.observe()
    }

    /// Draws the current state as text.
    pub fn render(&self) -> String {
        self.state.render()
    }

    // Cause of the end of an episode.
    fn outcome(&self, t: &state::Transition) -> &'static str {
        if !t.is_terminated {
            "truncated"
        } else if self.state.people().contains(&self.state.bot()) {
            "collision"
        } else {
            "delivered"
        }
    }

    /// Length of the flattened observation, the input size of a policy.
    pub fn obs_dim(&self) -> usize {
        self.rows() * self.cols() * N_PLANES
    }

    /// Number of actions, the output size of a policy.
    pub fn n_actions(&self) -> usize {
        GridAct::n_actions()
    }
}

impl Env for GridEnv {
    type Config = GridEnvConfig;
    type Obs = GridObs;
    type Act = GridAct;
    type Info = ();

    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized,
    {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(seed as u64);
        let episode_seed = rng.gen();
        let state = random_state(config, &mut rng);

        Ok(Self {
            config: config.clone(),
            rng,
            episode_seed,
            labels: vec![],
            fixed: None,
            state,
        })
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<(Self::Obs, Self::Info)> {
        if let Some(seed) = seed {
            self.rng = SmallRng::seed_from_u64(seed);
        }
        self.episode_seed = self.rng.gen();
        match self.fixed.take() {
            Some(layout) => {
                self.override_layout(&layout);
                self.fixed = Some(layout);
            }
            None => {
                self.state = random_state(&self.config, &mut self.rng);
                self.labels.clear();
            }
        }

        Ok((self.state.observe(), ()))
    }

    fn step(&mut self, act: &Self::Act) -> (Step<Self>, Record)
    where
        Self: Sized,
    {
        let t = self
            .state
            .transition(*act, &mut self.rng, self.config.max_steps);

        let mut record = Record::empty();
        if t.is_terminated || t.is_truncated {
            record.insert("episode_length", RecordValue::Scalar(self.state.steps() as _));
            record.insert(
                "n_picked",
                RecordValue::Scalar(self.state.picked().len() as _),
            );
            record.insert("outcome", RecordValue::String(self.outcome(&t).to_string()));
        }

        if self.config.render {
            info!("step {}\n{}", self.state.steps(), self.state.render());
        }

        let step = Step::new(
            self.state.observe(),
            *act,
            t.reward,
            t.is_terminated,
            t.is_truncated,
            (),
        );

        (step, record)
    }
}
