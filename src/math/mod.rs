//! Small dense-matrix types and operations used throughout the crate.
//!
//! Provides the `Matrix` container with structural operations (transpose,
//! row slicing, row-wise argmax) and the arithmetic engine in `ops`
//! (elementwise operators, matrix product, reductions). These are
//! intentionally small and dependency-light to keep the crate portable and
//! easy to test.
pub mod matrix;
pub mod ops;

pub use matrix::{Matrix, ShapeError};
