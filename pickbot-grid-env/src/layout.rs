//! Externally authored layouts.
//!
//! A layout file pins the grid size, the labeled items, the drop zone, the
//! start cell of the bot and the number of people:
//!
//! ```json
//! {
//!   "rows": 18, "cols": 30,
//!   "items": { "A": [3, 4], "B": [5, 9] },
//!   "drop": [1, 27],
//!   "dock": [1, 1],
//!   "people": { "count": 8 }
//! }
//! ```
//!
//! [`LayoutSpec`] mirrors the file. [`LayoutSpec::resolve`] fills in the
//! defaults and checks bounds once, producing a [`Layout`] that
//! [`GridEnv::override_layout`](crate::GridEnv::override_layout) applies.
use crate::Coord;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};
use thiserror::Error;

/// Start cell of the bot when a layout does not give one.
pub(crate) const DEFAULT_START: Coord = Coord(1, 1);

/// Number of people when a layout does not give one.
pub(crate) const DEFAULT_PEOPLE: usize = 8;

/// Drop zone when a layout does not give one.
pub(crate) fn default_drop(cols: usize) -> Coord {
    Coord(1, cols.saturating_sub(1).min(27))
}

/// Errors in layout validation.
#[derive(Error, Debug, PartialEq)]
pub enum LayoutError {
    /// Rows or columns are zero.
    #[error("Layout grid must be non-empty, got {rows}x{cols}")]
    EmptyGrid {
        /// Rows.
        rows: usize,
        /// Columns.
        cols: usize,
    },

    /// A coordinate lies outside the grid.
    #[error("{what} at {coord} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        /// What the coordinate belongs to.
        what: String,
        /// The offending coordinate.
        coord: Coord,
        /// Rows.
        rows: usize,
        /// Columns.
        cols: usize,
    },
}

/// People section of a layout file.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct PeopleSpec {
    /// Number of people, 8 if absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

/// A layout as written in a layout file.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct LayoutSpec {
    /// Number of rows.
    pub rows: usize,

    /// Number of columns.
    pub cols: usize,

    /// Item coordinates keyed by label.
    #[serde(default)]
    pub items: BTreeMap<String, Coord>,

    /// Drop zone, `[1, min(cols - 1, 27)]` if absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop: Option<Coord>,

    /// Start cell of the bot. Takes precedence over `start`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dock: Option<Coord>,

    /// Start cell of the bot, `[1, 1]` if neither this nor `dock` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Coord>,

    /// People section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people: Option<PeopleSpec>,
}

/// A validated layout with every optional field resolved.
///
/// Built only by [`LayoutSpec::resolve`], so every cell lies inside the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    rows: usize,
    cols: usize,

    // Lexicographic order; `labels[i]` names `items[i]`.
    labels: Vec<String>,
    items: Vec<Coord>,

    drop: Coord,
    start: Coord,
    n_people: usize,
}

impl Layout {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Item labels in lexicographic order. `labels()[i]` names `items()[i]`.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Item coordinates aligned to [`Layout::labels`].
    pub fn items(&self) -> &[Coord] {
        &self.items
    }

    /// Drop zone.
    pub fn drop_zone(&self) -> Coord {
        self.drop
    }

    /// Start cell of the bot.
    pub fn start(&self) -> Coord {
        self.start
    }

    /// Number of people to place.
    pub fn n_people(&self) -> usize {
        self.n_people
    }
}

impl LayoutSpec {
    /// Reads a layout file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Failed to open layout {:?}", path))?;
        let rdr = BufReader::new(file);
        let spec = serde_json::from_reader(rdr)
            .with_context(|| format!("Failed to parse layout {:?}", path))?;
        Ok(spec)
    }

    /// Parses a layout from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Resolves defaults and validates the layout.
    pub fn resolve(&self) -> Result<Layout, LayoutError> {
        let (rows, cols) = (self.rows, self.cols);
        if rows == 0 || cols == 0 {
            return Err(LayoutError::EmptyGrid { rows, cols });
        }

        let check = |what: String, coord: Coord| {
            if coord.in_bounds(rows, cols) {
                Ok(coord)
            } else {
                Err(LayoutError::OutOfBounds {
                    what,
                    coord,
                    rows,
                    cols,
                })
            }
        };

        // BTreeMap iterates keys in lexicographic order.
        let mut labels = Vec::with_capacity(self.items.len());
        let mut items = Vec::with_capacity(self.items.len());
        for (label, coord) in self.items.iter() {
            items.push(check(format!("Item {}", label), *coord)?);
            labels.push(label.clone());
        }

        let drop = check("Drop zone".to_string(), self.drop.unwrap_or_else(|| default_drop(cols)))?;
        let start = check(
            "Start".to_string(),
            self.dock.or(self.start).unwrap_or(DEFAULT_START),
        )?;
        let n_people = self
            .people
            .as_ref()
            .and_then(|p| p.count)
            .unwrap_or(DEFAULT_PEOPLE);

        Ok(Layout {
            rows,
            cols,
            labels,
            items,
            drop,
            start,
            n_people,
        })
    }
}
