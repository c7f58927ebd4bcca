use serde::{Deserialize, Serialize};

/// A row-major matrix.
///
/// Batches are laid out column-wise: a batch of `n` vectors of length `d` is a
/// `[d, n]` matrix.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Mat {
    pub data: Vec<f32>,
    pub shape: Vec<i32>,
}

impl Mat {
    /// Constructs a matrix. `data.len()` must be `shape[0] * shape[1]`.
    pub fn new(data: Vec<f32>, shape: Vec<i32>) -> Self {
        Self { data, shape }
    }

    /// Stacks vectors of equal length as the columns of a matrix.
    pub fn from_columns(columns: &[&[f32]]) -> Self {
        let n = columns.len();
        let d = columns.first().map_or(0, |c| c.len());
        let mut data = vec![0.0f32; d * n];
        for (j, column) in columns.iter().enumerate() {
            for (i, v) in column.iter().enumerate() {
                data[i * n + j] = *v;
            }
        }

        Self {
            data,
            shape: vec![d as _, n as _],
        }
    }

    pub fn shape(&self) -> &[i32] {
        &self.shape
    }

    pub fn matmul(&self, x: &Mat) -> Self {
        let (m, l, n) = (
            self.shape[0] as usize,
            self.shape[1] as usize,
            x.shape[1] as usize,
        );
        let mut data = vec![0.0f32; m * n];
        for i in 0..m {
            for j in 0..n {
                let kk = i * n + j;
                for k in 0..l {
                    data[kk] += self.data[i * l + k] * x.data[k * n + j];
                }
            }
        }

        Self {
            shape: vec![m as _, n as _],
            data,
        }
    }

    /// Adds `x` elementwise. A column vector `x` is added to every column.
    pub fn add(&self, x: &Mat) -> Self {
        let (m, n) = (self.shape[0] as usize, self.shape[1] as usize);
        if self.shape[0] != x.shape[0] || (x.shape[1] != 1 && self.shape[1] != x.shape[1]) {
            panic!(
                "Trying to add matrices of different sizes: {:?}",
                (&self.shape, &x.shape)
            );
        }

        let broadcast = x.shape[1] == 1;
        let data = (0..m * n)
            .map(|ix| {
                let b = if broadcast { x.data[ix / n] } else { x.data[ix] };
                self.data[ix] + b
            })
            .collect();

        Mat {
            data,
            shape: self.shape.clone(),
        }
    }

    pub fn relu(&self) -> Self {
        let data = self.data.iter().map(|a| a.max(0.)).collect();

        Self {
            data,
            shape: self.shape.clone(),
        }
    }

    /// Row index of the maximum of every column. Ties go to the lowest index.
    pub fn argmax_columns(&self) -> Vec<usize> {
        let (m, n) = (self.shape[0] as usize, self.shape[1] as usize);
        (0..n)
            .map(|j| {
                (0..m).fold(0, |best, i| {
                    if self.data[i * n + j] > self.data[best * n + j] {
                        i
                    } else {
                        best
                    }
                })
            })
            .collect()
    }
}

impl From<Vec<f32>> for Mat {
    fn from(x: Vec<f32>) -> Self {
        let shape = vec![x.len() as i32, 1];
        Self { shape, data: x }
    }
}
