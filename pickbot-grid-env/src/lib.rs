//! Warehouse pick-and-deliver grid environment for pickbot.
//!
//! A bot moves on a `rows x cols` grid, collects every item, and delivers them
//! to the drop zone while people wander around at random. The environment
//! implements [`pickbot_core::Env`]:
//!
//! * the action is a [`GridAct`], one of `Up`, `Down`, `Left`, `Right`, `Wait`;
//! * the observation is a [`GridObs`], a `(rows, cols, 3)` tensor whose planes
//!   mark items, people and the bot;
//! * every step costs `0.01`, each collected item gives `1.0`, delivering all
//!   items gives `5.0` and terminates the episode, which is truncated after
//!   `max_steps` (500 by default) steps.
//!
//! By default every reset generates a random layout. A [`Layout`] resolved from
//! an externally authored [`LayoutSpec`] can replace it right after the reset,
//! so that a trained policy is replayed against a fixed scenario.
//!
//! Here is an example of running the environment with a random policy.
//!
//! ```rust
//! use anyhow::Result;
//! use pickbot_core::{Configurable, DefaultEvaluator, Evaluator as _};
//! use pickbot_grid_env::{util::{RandomPolicy, RandomPolicyConfig}, GridEnv, GridEnvConfig};
//!
//! fn main() -> Result<()> {
//!     let env_config = GridEnvConfig::default().max_steps(50);
//!     let mut policy = RandomPolicy::build(RandomPolicyConfig { seed: Some(42) });
//!
//!     let record = DefaultEvaluator::<GridEnv>::new(&env_config, 0, 2)?.evaluate(&mut policy)?;
//!     assert!(record.get_scalar("Episode return")? <= 15.0);
//!
//!     Ok(())
//! }
//! ```
mod act;
mod coord;
mod env;
mod error;
mod layout;
mod obs;
pub mod util;
pub use act::GridAct;
pub use coord::Coord;
pub use env::{EpisodeState, GridEnv, GridEnvConfig};
pub use error::GridEnvError;
pub use layout::{Layout, LayoutError, LayoutSpec, PeopleSpec};
pub use obs::{GridObs, BOT_PLANE, ITEM_PLANE, N_PLANES, PEOPLE_PLANE};
