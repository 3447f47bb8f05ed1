//! Classifier numerics: softmax, cross-entropy, accuracy.
//!
//! These are the only numerically delicate routines in the crate. They are
//! pure functions over the crate math types and slices so they can be
//! reused by models and by evaluation code.

use crate::error::Result;
use crate::math::ops::{hadamard, ln, sum};
use crate::math::Matrix;

/// Softmax of a single logit vector.
///
/// The maximum is subtracted before exponentiation so that large logits do
/// not overflow; mathematically the result is unchanged.
pub fn softmax(v: &[f64]) -> Vec<f64> {
    assert!(!v.is_empty(), "softmax of an empty vector");
    let max = v.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut expd = Vec::with_capacity(v.len());
    let mut total = 0.0;
    for &x in v {
        let e = (x - max).exp();
        total += e;
        expd.push(e);
    }

    expd.iter().map(|&e| e / total).collect()
}

/// Row-wise softmax; rows do not interact.
pub fn softmax_rows(m: &Matrix<f64>) -> Matrix<f64> {
    let mut data = Vec::with_capacity(m.nrows() * m.ncols());
    for row in 0..m.nrows() {
        data.extend(softmax(m.row_slice(row)));
    }
    Matrix::from_shape_vec(m.shape(), data).expect("softmax_rows: shape preserved")
}

/// Mean log-likelihood of one-hot labels `y` under predictions `y_prob`.
///
/// Returns `(1 / nrows(y)) * sum(hadamard(y, ln(y_prob)))`. Note the sign:
/// this is the UNNEGATED mean log-likelihood, which is <= 0 and equals 0
/// only for a perfect one-hot prediction. Callers minimizing cross-entropy
/// loss minimize the negation of this value.
pub fn cross_entropy(y: &Matrix<f64>, y_prob: &Matrix<f64>) -> Result<f64> {
    let picked = hadamard(y, &ln(y_prob))?;
    Ok(1.0 / y.nrows() as f64 * sum(&picked))
}

/// Fraction of positions where predicted and true class indices agree.
pub fn accuracy(pred: &[usize], truth: &[usize]) -> f64 {
    assert_eq!(
        pred.len(),
        truth.len(),
        "accuracy requires equal length index slices"
    );
    if pred.is_empty() {
        return 0.0;
    }
    let hits = pred.iter().zip(truth).filter(|(p, t)| p == t).count();
    hits as f64 / pred.len() as f64
}
