use crate::{Mat, PolicyError};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, io::BufWriter, path::Path};

// A 2-dimensional matrix with positive dimensions holding exactly its elements.
fn check_mat(layer: usize, what: &str, m: &Mat) -> Result<(), PolicyError> {
    let valid = m.shape.len() == 2
        && m.shape.iter().all(|&d| d > 0)
        && m.data.len() == (m.shape[0] as usize) * (m.shape[1] as usize);
    if valid {
        Ok(())
    } else {
        Err(PolicyError::InvalidNetwork(format!(
            "layer {}: {} of shape {:?} holds {} elements",
            layer,
            what,
            m.shape,
            m.data.len()
        )))
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
/// Multilayer perceptron with ReLU activation function and linear output.
pub struct Mlp {
    /// Weights of layers, each of shape `[out, in]`.
    ws: Vec<Mat>,

    /// Biases of layers, each of shape `[out, 1]`.
    bs: Vec<Mat>,
}

impl Mlp {
    /// Constructs a network, checking that consecutive layers fit together.
    pub fn new(ws: Vec<Mat>, bs: Vec<Mat>) -> Result<Self, PolicyError> {
        if ws.is_empty() || ws.len() != bs.len() {
            return Err(PolicyError::InvalidNetwork(format!(
                "{} weights and {} biases",
                ws.len(),
                bs.len()
            )));
        }
        for (i, (w, b)) in ws.iter().zip(bs.iter()).enumerate() {
            check_mat(i, "weight", w)?;
            check_mat(i, "bias", b)?;
            if b.shape != [w.shape[0], 1] {
                return Err(PolicyError::InvalidNetwork(format!(
                    "layer {}: weight {:?}, bias {:?}",
                    i, w.shape, b.shape
                )));
            }
            if i > 0 && ws[i - 1].shape[0] != w.shape[1] {
                return Err(PolicyError::InvalidNetwork(format!(
                    "layer {} takes {} inputs, previous layer gives {}",
                    i,
                    w.shape[1],
                    ws[i - 1].shape[0]
                )));
            }
        }
        Ok(Self { ws, bs })
    }

    /// Input dimension.
    pub fn in_dim(&self) -> usize {
        self.ws[0].shape[1] as _
    }

    /// Output dimension.
    pub fn out_dim(&self) -> usize {
        self.ws[self.ws.len() - 1].shape[0] as _
    }

    /// Weights of layers.
    pub fn ws(&self) -> &[Mat] {
        &self.ws
    }

    /// Biases of layers.
    pub fn bs(&self) -> &[Mat] {
        &self.bs
    }

    /// Maps a `[in, batch]` matrix to a `[out, batch]` matrix.
    pub fn forward(&self, x: &Mat) -> Mat {
        let n_layers = self.ws.len();
        let mut x = x.clone();
        for i in 0..n_layers {
            x = self.ws[i].matmul(&x).add(&self.bs[i]);
            if i != n_layers - 1 {
                x = x.relu();
            }
        }
        x
    }

    /// Loads a network serialized with `bincode`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let rdr = BufReader::new(File::open(path)?);
        let mlp: Mlp = bincode::deserialize_from(rdr)?;
        // Re-check shapes of deserialized weights.
        Ok(Self::new(mlp.ws, mlp.bs)?)
    }

    /// Saves the network with `bincode`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let wtr = BufWriter::new(File::create(path)?);
        bincode::serialize_into(wtr, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    fn mlp() -> Mlp {
        // 3 -> 2 -> 2
        let w1 = Mat::new(vec![1., 0., -1., 0., 1., 1.], vec![2, 3]);
        let b1 = Mat::new(vec![0., -1.], vec![2, 1]);
        let w2 = Mat::new(vec![1., 1., -1., 2.], vec![2, 2]);
        let b2 = Mat::new(vec![0.5, 0.], vec![2, 1]);
        Mlp::new(vec![w1, w2], vec![b1, b2]).unwrap()
    }

    #[test]
    fn test_forward_batch() {
        let x = Mat::from_columns(&[&[1., 2., 3.], &[3., 0., 0.]]);
        let y = mlp().forward(&x);

        // Column 0: hidden relu([-2, 4]) = [0, 4]; out = [4.5, 8].
        // Column 1: hidden relu([3, -1]) = [3, 0]; out = [3.5, -3].
        assert_eq!(y, Mat::new(vec![4.5, 3.5, 8., -3.], vec![2, 2]));
        assert_eq!(y.argmax_columns(), vec![1, 0]);
    }

    #[test]
    fn test_invalid_shapes() {
        let w = Mat::new(vec![0.; 6], vec![2, 3]);
        let b = Mat::new(vec![0.; 3], vec![3, 1]);
        assert!(Mlp::new(vec![w.clone()], vec![b]).is_err());
        assert!(Mlp::new(vec![w.clone(), w], vec![]).is_err());
        assert!(Mlp::new(vec![], vec![]).is_err());
    }

    #[test]
    fn test_inconsistent_data_is_rejected() {
        let b = Mat::new(vec![0.; 5], vec![5, 1]);
        let short = Mat::new(vec![0., 1.], vec![5, 3]);
        assert!(matches!(
            Mlp::new(vec![short], vec![b.clone()]),
            Err(PolicyError::InvalidNetwork(_))
        ));

        let w = Mat::new(vec![0.; 15], vec![5, 3]);
        let short_bias = Mat::new(vec![0.; 4], vec![5, 1]);
        assert!(Mlp::new(vec![w.clone()], vec![short_bias]).is_err());

        let negative = Mat::new(vec![], vec![-5, 3]);
        assert!(Mlp::new(vec![negative], vec![b.clone()]).is_err());
        assert!(Mlp::new(vec![w], vec![b]).is_ok());
    }

    #[test]
    fn test_load_rejects_inconsistent_file() -> Result<()> {
        let dir = TempDir::new("mlp")?;
        let path = dir.path().join("broken.bincode");
        // Bypass `Mlp::new` as a mis-exported file would.
        let broken = Mlp {
            ws: vec![Mat::new(vec![0., 1.], vec![5, 3])],
            bs: vec![Mat::new(vec![0.; 5], vec![5, 1])],
        };
        broken.save(&path)?;
        assert!(Mlp::load(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_save_load() -> Result<()> {
        let dir = TempDir::new("mlp")?;
        let path = dir.path().join("mlp.bincode");
        let mlp = mlp();
        mlp.save(&path)?;
        assert_eq!(Mlp::load(&path)?, mlp);
        assert_eq!((mlp.in_dim(), mlp.out_dim()), (3, 2));
        Ok(())
    }
}
