//! Dataset container pairing inputs with one-hot labels.

use crate::error::{ModelError, Result};
use crate::math::Matrix;

/// A labelled dataset: inputs `x` (n_samples x data_dim) and one-hot labels
/// `y` (n_samples x n_classes).
#[derive(Debug, Clone)]
pub struct Dataset {
    pub x: Matrix<f64>,
    pub y: Matrix<f64>,
}

impl Dataset {
    pub fn new(x: Matrix<f64>, y: Matrix<f64>) -> Result<Self> {
        if x.nrows() != y.nrows() {
            return Err(ModelError::ShapeMismatch {
                op: "dataset construction",
                lhs: x.shape(),
                rhs: y.shape(),
            });
        }
        Ok(Dataset { x, y })
    }

    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    /// Contiguous batch `[from, to)`; `to` past the end is clamped.
    pub fn batch(&self, from: usize, to: usize) -> Result<(Matrix<f64>, Matrix<f64>)> {
        Ok((self.x.slice_rows(from, to)?, self.y.slice_rows(from, to)?))
    }

    pub fn log_summary(&self) {
        log::info!(
            "dataset: {} samples, {} features, {} classes",
            self.n_samples(),
            self.x.ncols(),
            self.y.ncols()
        );
    }
}

/// Encode class indices as a 0/1 matrix of shape (labels.len() x n_classes).
///
/// A label outside `[0, n_classes)` fails with `InvalidRange`.
pub fn one_hot(labels: &[usize], n_classes: usize) -> Result<Matrix<f64>> {
    let mut y = Matrix::zeros(labels.len(), n_classes);
    for (row, &label) in labels.iter().enumerate() {
        if label >= n_classes {
            return Err(ModelError::InvalidRange {
                start: label,
                end: label + 1,
                limit: n_classes,
            });
        }
        y[(row, label)] = 1.0;
    }
    Ok(y)
}
