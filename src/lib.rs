//! linclass: a minimal multiclass linear classifier.
//!
//! This crate provides a small dense-matrix math module, softmax /
//! cross-entropy numerics, and a linear-softmax model trained by mini-batch
//! gradient descent, plus dataset handling and CSV loading utilities used by
//! the trainer and higher-level tooling.
//!
//! The design favors small, testable modules: the numeric core is pure and
//! performs no I/O or logging; diagnostics (accuracy, loss history) are
//! computed and logged by the training loop.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod stats;
pub mod trainer;

pub use error::{ModelError, Result};
