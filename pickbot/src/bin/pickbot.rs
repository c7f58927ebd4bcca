use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use pickbot::{
    replay::{write_episodes, DEFAULT_MAX_STEPS},
    summary::{summarize, write_csv},
};
use pickbot_core::{
    record::BufferedRecorder, util::eval_with_recorder, Configurable, Env as _, Policy,
};
use pickbot_grid_env::{
    util::{RandomPolicy, RandomPolicyConfig},
    GridEnv, GridEnvConfig, LayoutSpec,
};
use pickbot_policy_no_backend::QNetPolicy;
use std::path::{Path, PathBuf};

/// Replay, evaluate and render the pick-and-deliver warehouse bot
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record episodes on a fixed layout as JSON files
    Replay {
        /// Layout file (JSON)
        #[arg(long)]
        layout: PathBuf,

        /// Q-network weights (bincode); a random policy is used if omitted
        #[arg(long)]
        policy: Option<PathBuf>,

        /// Output directory
        #[arg(long, default_value = "episodes")]
        out_dir: PathBuf,

        /// Number of episodes
        #[arg(long, default_value_t = 3)]
        episodes: usize,

        /// Maximum number of frames of an episode
        #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
        max_steps: usize,

        /// Random seed
        #[arg(long, default_value_t = 42)]
        seed: i64,
    },

    /// Evaluate a policy on random layouts
    Eval {
        /// Environment configuration (YAML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Q-network weights (bincode); a random policy is used if omitted
        #[arg(long)]
        policy: Option<PathBuf>,

        /// Number of episodes
        #[arg(long, default_value_t = 5)]
        episodes: usize,

        /// Write per-episode results to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Print the initial grid of an episode
    Render {
        /// Environment configuration (YAML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Layout file (JSON) replacing the random layout
        #[arg(long)]
        layout: Option<PathBuf>,

        /// Random seed
        #[arg(long, default_value_t = 42)]
        seed: i64,
    },
}

fn load_config(path: Option<&Path>) -> Result<GridEnvConfig> {
    match path {
        Some(path) => GridEnvConfig::load(path),
        None => Ok(GridEnvConfig::default()),
    }
}

fn load_policy(path: &Path, env: &GridEnv) -> Result<QNetPolicy<GridEnv>> {
    let policy = QNetPolicy::from_serialized_path(path)?;
    policy.check_dims(env.obs_dim(), env.n_actions())?;
    Ok(policy)
}

fn eval<P: Policy<GridEnv>>(
    env: &mut GridEnv,
    policy: &mut P,
    n_episodes: usize,
    csv: Option<&Path>,
) -> Result<()> {
    let mut recorder = BufferedRecorder::new();
    let returns = eval_with_recorder(env, policy, n_episodes, &mut recorder)?;
    let mean = returns.iter().sum::<f32>() / returns.len().max(1) as f32;
    info!("Mean return over {} episodes: {}", returns.len(), mean);

    if let Some(path) = csv {
        write_csv(&summarize(&recorder)?, path)?;
        info!("Wrote {:?}", path);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match args.command {
        Command::Replay {
            layout,
            policy,
            out_dir,
            episodes,
            max_steps,
            seed,
        } => {
            let layout = LayoutSpec::load(&layout)?.resolve()?;
            let mut env = GridEnv::build_with_layout(&GridEnvConfig::default(), &layout, seed);
            match policy {
                Some(path) => {
                    let mut policy = load_policy(&path, &env)?;
                    write_episodes(&mut env, &mut policy, &layout, episodes, max_steps, &out_dir)?;
                }
                None => {
                    let mut policy = RandomPolicy::build(RandomPolicyConfig {
                        seed: Some(seed as u64),
                    });
                    write_episodes(&mut env, &mut policy, &layout, episodes, max_steps, &out_dir)?;
                }
            }
        }
        Command::Eval {
            config,
            policy,
            episodes,
            csv,
        } => {
            let config = load_config(config.as_deref())?;
            let mut env = GridEnv::build(&config, 0)?;
            match policy {
                Some(path) => {
                    let mut policy = load_policy(&path, &env)?;
                    eval(&mut env, &mut policy, episodes, csv.as_deref())?;
                }
                None => {
                    let mut policy = RandomPolicy::build(RandomPolicyConfig { seed: None });
                    eval(&mut env, &mut policy, episodes, csv.as_deref())?;
                }
            }
        }
        Command::Render {
            config,
            layout,
            seed,
        } => {
            let config = load_config(config.as_deref())?;
            let mut env = GridEnv::build(&config, seed)?;
            env.reset(None)?;
            if let Some(path) = layout {
                let labels = env.override_layout(&LayoutSpec::load(&path)?.resolve()?);
                info!("Items: {}", labels.join(", "));
            }
            println!("{}", env.render());
        }
    }

    Ok(())
}
