//! Observation for [`GridEnv`](crate::GridEnv).
use crate::Coord;
use ndarray::{Array3, ArrayView2, Axis};
use pickbot_core::Obs;

/// Number of planes of the observation.
pub const N_PLANES: usize = 3;

/// Plane marking item cells.
pub const ITEM_PLANE: usize = 0;

/// Plane marking people.
pub const PEOPLE_PLANE: usize = 1;

/// Plane marking the bot.
pub const BOT_PLANE: usize = 2;

/// Observation of [`GridEnv`](crate::GridEnv).
///
/// A `(rows, cols, 3)` tensor with values in `{0.0, 1.0}`. Flattening is
/// row-major with the plane index varying fastest, which is the input layout
/// of exported policies.
#[derive(Clone, Debug, PartialEq)]
pub struct GridObs(Array3<f32>);

impl GridObs {
    pub(crate) fn zeros(rows: usize, cols: usize) -> Self {
        Self(Array3::zeros((rows, cols, N_PLANES)))
    }

    pub(crate) fn mark(&mut self, cell: Coord, plane: usize) {
        self.0[[cell.0, cell.1, plane]] = 1.0;
    }

    /// `(rows, cols, planes)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        self.0.dim()
    }

    /// Value at `(row, col, plane)`.
    pub fn get(&self, row: usize, col: usize, plane: usize) -> f32 {
        self.0[[row, col, plane]]
    }

    /// A view of one plane.
    pub fn plane(&self, plane: usize) -> ArrayView2<f32> {
        self.0.index_axis(Axis(2), plane)
    }

    /// The underlying tensor.
    pub fn array(&self) -> &Array3<f32> {
        &self.0
    }

    /// The flattened observation.
    pub fn as_slice(&self) -> &[f32] {
        // Always built by `zeros` and written in place.
        self.0
            .as_slice()
            .expect("observation tensor is in standard layout")
    }
}

impl AsRef<[f32]> for GridObs {
    fn as_ref(&self) -> &[f32] {
        self.as_slice()
    }
}

impl From<GridObs> for Vec<f32> {
    fn from(obs: GridObs) -> Self {
        obs.0.into_raw_vec()
    }
}

impl Obs for GridObs {
    fn len(&self) -> usize {
        self.0.len()
    }
}
