#![warn(missing_docs)]
//! Environment contract for pickbot.
//!
//! This crate defines the interface shared by environments, policies and the
//! tools that drive them: an [`Env`] is reset and stepped with actions chosen by
//! a [`Policy`], every step yields a [`Step`] object plus a [`record::Record`]
//! of diagnostics, and an [`Evaluator`] runs whole episodes.
//!
//! Concrete environments live in other crates, e.g. `pickbot-grid-env`.
pub mod error;
pub mod record;
pub mod util;

mod base;
pub use base::{Act, Configurable, Env, Info, Obs, Policy, Step};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};

#[cfg(test)]
mod dummy;
