//! Linear softmax classifier trained by gradient descent.

use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use statrs::distribution::Normal;

use crate::config::ClassifierConfig;
use crate::error::{ModelError, Result};
use crate::math::ops::{add_row, matmul, scale, sub};
use crate::math::Matrix;
use crate::stats::{cross_entropy, softmax_rows};

/// Multiclass linear model: `y_prob = softmax(X W + b)`.
///
/// `w` has shape (data_dim x n_classes) and `b` (1 x n_classes). The
/// parameters are owned by the model and mutated only through `step`, which
/// takes `&mut self` for the duration of the update.
pub struct SoftmaxRegression {
    w: Matrix<f64>,
    b: Matrix<f64>,
    n_classes: usize,
    data_dim: usize,
}

impl SoftmaxRegression {
    /// Build a model with normally distributed weights and a zero bias.
    ///
    /// A single generator is seeded once (from `config.seed` when present)
    /// and used for the entire draw, so seeded runs are reproducible and
    /// unseeded runs get an independent stream per call.
    pub fn new(config: &ClassifierConfig) -> Result<Self> {
        if config.n_classes == 0 || config.data_dim == 0 {
            return Err(ModelError::InvalidConfig(
                "n_classes and data_dim must be > 0".to_owned(),
            ));
        }
        let normal = Normal::new(config.init_mean, config.init_std).map_err(|e| {
            ModelError::InvalidConfig(format!(
                "weight init distribution (mean {}, std {}): {}",
                config.init_mean, config.init_std, e
            ))
        })?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let n = config.data_dim * config.n_classes;
        let mut weights = Vec::with_capacity(n);
        for _ in 0..n {
            weights.push(normal.sample(&mut rng));
        }
        let w = Matrix::from_shape_vec((config.data_dim, config.n_classes), weights)
            .expect("init: weight buffer matches shape");

        Ok(SoftmaxRegression {
            w,
            b: Matrix::zeros(1, config.n_classes),
            n_classes: config.n_classes,
            data_dim: config.data_dim,
        })
    }

    pub fn weights(&self) -> &Matrix<f64> {
        &self.w
    }

    pub fn bias(&self) -> &Matrix<f64> {
        &self.b
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn data_dim(&self) -> usize {
        self.data_dim
    }

    /// Class probabilities for a batch of inputs.
    pub fn predict(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let logits = matmul(x, &self.w)?;
        Ok(softmax_rows(&add_row(&logits, &self.b)?))
    }

    /// Forward pass plus parameter gradients for one batch.
    ///
    /// Returns `(log_likelihood, grad_w, grad_b)` where the first value is
    /// the unnegated mean log-likelihood from [`cross_entropy`]. The
    /// gradients are of the summed (not mean) negative log-likelihood;
    /// `step` folds the `1 / batch_size` factor into the learning rate.
    ///
    /// Softmax composed with cross-entropy gives the output-layer error
    /// signal in closed form: `delta = y_prob - y`.
    pub fn forward_and_grad(
        &self,
        x: &Matrix<f64>,
        y: &Matrix<f64>,
    ) -> Result<(f64, Matrix<f64>, Matrix<f64>)> {
        let logits = matmul(x, &self.w)?;
        let y_prob = softmax_rows(&add_row(&logits, &self.b)?);

        let delta = sub(&y_prob, y)?;
        let grad_w = matmul(&x.transpose(), &delta)?;
        // Column sums of delta, expressed as (1 x batch) ones times delta.
        let ones: Matrix<f64> = Matrix::ones(1, delta.nrows());
        let grad_b = matmul(&ones, &delta)?;

        Ok((cross_entropy(y, &y_prob)?, grad_w, grad_b))
    }

    /// One mini-batch gradient-descent update.
    ///
    /// Updates `w` and `b` in place and returns the batch log-likelihood
    /// (see `forward_and_grad` for the sign convention). A zero-row batch
    /// fails with `InvalidBatch` before any division by the batch size.
    pub fn step(&mut self, x: &Matrix<f64>, y: &Matrix<f64>, lr: f64) -> Result<f64> {
        let batch_size = x.nrows();
        if batch_size == 0 {
            return Err(ModelError::InvalidBatch);
        }

        let (loss, grad_w, grad_b) = self.forward_and_grad(x, y)?;

        let factor = lr / batch_size as f64;
        self.w = sub(&self.w, &scale(factor, &grad_w))?;
        self.b = sub(&self.b, &scale(factor, &grad_b))?;

        Ok(loss)
    }
}
