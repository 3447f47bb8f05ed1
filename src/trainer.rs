//! Mini-batch gradient-descent training loop.
//!
//! The trainer owns the epoch/batch bookkeeping and all logging; the model
//! and math layers below it stay pure.

use crate::config::TrainConfig;
use crate::data_handling::Dataset;
use crate::error::{ModelError, Result};
use crate::models::SoftmaxRegression;
use crate::stats::accuracy;

pub struct Trainer {
    config: TrainConfig,
}

impl Trainer {
    pub fn new(config: TrainConfig) -> Self {
        Trainer { config }
    }

    /// Run `epochs` passes over `data` in contiguous batches of
    /// `batch_size` rows (the tail batch may be short, never empty).
    ///
    /// Returns the per-batch cost history: the unnegated mean
    /// log-likelihood returned by each `step`, in order. Training drives
    /// these values toward 0 from below.
    pub fn fit(&self, model: &mut SoftmaxRegression, data: &Dataset) -> Result<Vec<f64>> {
        if self.config.batch_size == 0 {
            return Err(ModelError::InvalidConfig(
                "batch_size must be > 0".to_owned(),
            ));
        }

        let n = data.n_samples();
        let mut cost_history = Vec::new();

        data.log_summary();
        for epoch in 0..self.config.epochs {
            for start in (0..n).step_by(self.config.batch_size) {
                let (x_batch, y_batch) = data.batch(start, start + self.config.batch_size)?;
                let cost = model.step(&x_batch, &y_batch, self.config.learning_rate)?;
                log::debug!(
                    "epoch {} batch {}..{}: log-likelihood {:.6}",
                    epoch,
                    start,
                    start + x_batch.nrows(),
                    cost
                );
                cost_history.push(cost);
            }

            if log::log_enabled!(log::Level::Info) {
                let y_prob = model.predict(&data.x)?;
                let acc = accuracy(&y_prob.argmax_rows(), &data.y.onehot_decode_rows());
                log::info!(
                    "epoch {}: accuracy {:.4}, last batch log-likelihood {:.6}",
                    epoch,
                    acc,
                    cost_history.last().copied().unwrap_or(f64::NAN)
                );
            }
        }

        Ok(cost_history)
    }
}
