//! Configuration of [`GridEnv`](super::GridEnv).
use crate::GridEnvError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`GridEnv`](super::GridEnv).
///
/// It describes the random layouts generated at every reset. A layout applied
/// with [`GridEnv::override_layout`](super::GridEnv::override_layout) takes
/// precedence until the next reset.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct GridEnvConfig {
    /// Number of rows.
    pub rows: usize,

    /// Number of columns.
    pub cols: usize,

    /// Number of items placed in the interior of the grid.
    pub n_items: usize,

    /// Number of people.
    pub n_people: usize,

    /// Step budget of an episode; reaching it truncates the episode.
    pub max_steps: usize,

    /// Logs the rendered grid after every step.
    pub render: bool,
}

impl Default for GridEnvConfig {
    fn default() -> Self {
        Self {
            rows: 18,
            cols: 30,
            n_items: 10,
            n_people: 8,
            max_steps: 500,
            render: false,
        }
    }
}

impl GridEnvConfig {
    /// Sets the grid size.
    pub fn grid_size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Sets the number of items.
    pub fn n_items(mut self, n_items: usize) -> Self {
        self.n_items = n_items;
        self
    }

    /// Sets the number of people.
    pub fn n_people(mut self, n_people: usize) -> Self {
        self.n_people = n_people;
        self
    }

    /// Sets the step budget of an episode.
    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Sets the render flag.
    pub fn render(mut self, render: bool) -> Self {
        self.render = render;
        self
    }

    /// Checks that random layouts can be generated.
    ///
    /// The grid needs an interior (1-cell border excluded) holding all items.
    pub fn validate(&self) -> Result<(), GridEnvError> {
        if self.rows < 3 || self.cols < 3 {
            return Err(GridEnvError::InvalidConfig(format!(
                "grid must be at least 3x3, got {}x{}",
                self.rows, self.cols
            )));
        }
        let interior = (self.rows - 2) * (self.cols - 2);
        if self.n_items > interior {
            return Err(GridEnvError::InvalidConfig(format!(
                "{} items do not fit in {} interior cells",
                self.n_items, interior
            )));
        }
        Ok(())
    }

    /// Constructs [`GridEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`GridEnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
