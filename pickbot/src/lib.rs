//! Pick-and-deliver warehouse bot.
//!
//! This crate ties the environment ([`pickbot_grid_env`]) and the policies
//! together for replaying and evaluating trained agents:
//!
//! * [`replay`] rolls episodes on a fixed layout and writes them as JSON files
//!   which a viewer plays back frame by frame;
//! * [`summary`] turns per-step evaluation records into per-episode rows.
//!
//! The `pickbot` binary exposes both on the command line.
pub mod replay;
pub mod summary;
