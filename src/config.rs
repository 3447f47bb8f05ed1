use serde::{Deserialize, Serialize};

/// Configuration for building a `SoftmaxRegression` model.
///
/// Weights are drawn from `Normal(init_mean, init_std)`; the bias starts at
/// zero. When `seed` is set, initialization is fully reproducible: a single
/// seeded generator is used for the whole draw.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ClassifierConfig {
    pub n_classes: usize,
    pub data_dim: usize,
    pub init_mean: f64,
    pub init_std: f64,
    pub seed: Option<u64>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            n_classes: 10,
            data_dim: 784,
            init_mean: 0.0,
            init_std: 1.0,
            seed: None,
        }
    }
}

/// Configuration for the mini-batch gradient-descent trainer.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TrainConfig {
    pub learning_rate: f64,
    pub epochs: usize,
    pub batch_size: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            epochs: 10,
            batch_size: 100,
        }
    }
}
