//! Arithmetic engine over `Matrix`.
//!
//! Explicitly named free functions instead of operator overloads; the shape
//! check is the first action of every function that has one. All operations
//! are pure and return freshly allocated matrices.

use num_traits::Float;

use crate::error::{ModelError, Result};
use crate::math::matrix::Matrix;

/// Elementwise sum. Operands must have identical shape.
pub fn add<T: Float>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> Result<Matrix<T>> {
    if lhs.shape() != rhs.shape() {
        return Err(ModelError::ShapeMismatch {
            op: "matrix addition",
            lhs: lhs.shape(),
            rhs: rhs.shape(),
        });
    }
    let data = lhs
        .as_slice()
        .iter()
        .zip(rhs.as_slice())
        .map(|(&a, &b)| a + b)
        .collect();
    Ok(Matrix::from_shape_vec(lhs.shape(), data).expect("add: shape preserved"))
}

/// Elementwise difference. Operands must have identical shape.
pub fn sub<T: Float>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> Result<Matrix<T>> {
    if lhs.shape() != rhs.shape() {
        return Err(ModelError::ShapeMismatch {
            op: "matrix subtraction",
            lhs: lhs.shape(),
            rhs: rhs.shape(),
        });
    }
    let data = lhs
        .as_slice()
        .iter()
        .zip(rhs.as_slice())
        .map(|(&a, &b)| a - b)
        .collect();
    Ok(Matrix::from_shape_vec(lhs.shape(), data).expect("sub: shape preserved"))
}

/// Adds the row vector `v` (shape 1 x ncols(a)) to every row of `a`.
pub fn add_row<T: Float>(a: &Matrix<T>, v: &Matrix<T>) -> Result<Matrix<T>> {
    if v.nrows() != 1 || a.ncols() != v.ncols() {
        return Err(ModelError::ShapeMismatch {
            op: "row broadcast addition",
            lhs: a.shape(),
            rhs: v.shape(),
        });
    }
    let row = v.row_slice(0);
    let mut out = a.clone();
    for r in 0..out.nrows() {
        for c in 0..out.ncols() {
            out[(r, c)] = out[(r, c)] + row[c];
        }
    }
    Ok(out)
}

/// Multiplies every element by `scalar`.
pub fn scale<T: Float>(scalar: T, a: &Matrix<T>) -> Matrix<T> {
    a.mapv(|&v| v * scalar)
}

/// Standard matrix product. Requires `ncols(lhs) == nrows(rhs)`.
///
/// Plain triple-loop accumulation in i,j,k order; summation order is part
/// of the contract so results are bit-reproducible.
pub fn matmul<T: Float>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> Result<Matrix<T>> {
    if lhs.ncols() != rhs.nrows() {
        return Err(ModelError::ShapeMismatch {
            op: "matrix multiplication",
            lhs: lhs.shape(),
            rhs: rhs.shape(),
        });
    }
    let n = lhs.nrows();
    let p = lhs.ncols();
    let m = rhs.ncols();
    let mut out = Matrix::zeros(n, m);
    for i in 0..n {
        for j in 0..m {
            let mut acc = T::zero();
            for k in 0..p {
                acc = acc + lhs[(i, k)] * rhs[(k, j)];
            }
            out[(i, j)] = acc;
        }
    }
    Ok(out)
}

/// Elementwise product. Operands must have identical shape.
pub fn hadamard<T: Float>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> Result<Matrix<T>> {
    if lhs.shape() != rhs.shape() {
        return Err(ModelError::ShapeMismatch {
            op: "elementwise multiplication",
            lhs: lhs.shape(),
            rhs: rhs.shape(),
        });
    }
    let data = lhs
        .as_slice()
        .iter()
        .zip(rhs.as_slice())
        .map(|(&a, &b)| a * b)
        .collect();
    Ok(Matrix::from_shape_vec(lhs.shape(), data).expect("hadamard: shape preserved"))
}

/// Elementwise natural logarithm.
///
/// Non-positive inputs follow IEEE semantics (`ln(0) == -inf`,
/// `ln(x < 0) == NaN`) rather than being trapped.
pub fn ln<T: Float>(a: &Matrix<T>) -> Matrix<T> {
    a.mapv(|&v| v.ln())
}

/// Sum of every element, accumulated row-major left-to-right.
pub fn sum<T: Float>(a: &Matrix<T>) -> T {
    a.as_slice().iter().fold(T::zero(), |acc, &v| acc + v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: &Matrix<f64>, b: &Matrix<f64>, tol: f64) -> bool {
        a.shape() == b.shape()
            && a.as_slice()
                .iter()
                .zip(b.as_slice())
                .all(|(x, y)| (x - y).abs() <= tol)
    }

    #[test]
    fn add_is_commutative() {
        let a = Matrix::from_shape_vec((2, 2), vec![1.0, -2.0, 0.5, 3.0]).unwrap();
        let b = Matrix::from_shape_vec((2, 2), vec![4.0, 0.25, -1.0, 2.0]).unwrap();
        assert_eq!(add(&a, &b).unwrap(), add(&b, &a).unwrap());
    }

    #[test]
    fn sub_undoes_add() {
        let a = Matrix::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let b = Matrix::from_shape_vec((2, 3), vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]).unwrap();
        let round_trip = sub(&add(&a, &b).unwrap(), &b).unwrap();
        assert!(approx_eq(&round_trip, &a, 1e-12));
    }

    #[test]
    fn add_rejects_mismatched_shapes() {
        let a: Matrix<f64> = Matrix::from_elem(2, 3, 0.0);
        let b: Matrix<f64> = Matrix::from_elem(3, 2, 0.0);
        match add(&a, &b) {
            Err(ModelError::ShapeMismatch { lhs, rhs, .. }) => {
                assert_eq!(lhs, (2, 3));
                assert_eq!(rhs, (3, 2));
            }
            other => panic!("expected ShapeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn matmul_rejects_inner_dimension_mismatch() {
        let a: Matrix<f64> = Matrix::from_elem(2, 3, 0.0);
        let b: Matrix<f64> = Matrix::from_elem(4, 2, 0.0);
        assert!(matches!(
            matmul(&a, &b),
            Err(ModelError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn matmul_identity_is_neutral() {
        let a = Matrix::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let id = Matrix::identity(3);
        assert_eq!(matmul(&a, &id).unwrap(), a);
    }

    #[test]
    fn matmul_known_product() {
        let a = Matrix::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = Matrix::from_shape_vec((2, 2), vec![5.0, 6.0, 7.0, 8.0]).unwrap();
        let c = matmul(&a, &b).unwrap();
        assert_eq!(c.to_vec(), vec![19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn add_row_broadcasts_over_rows() {
        let a = Matrix::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let v = Matrix::from_shape_vec((1, 3), vec![10.0, 20.0, 30.0]).unwrap();
        let out = add_row(&a, &v).unwrap();
        assert_eq!(out.to_vec(), vec![11.0, 22.0, 33.0, 14.0, 25.0, 36.0]);
    }

    #[test]
    fn add_row_rejects_multi_row_vector() {
        let a: Matrix<f64> = Matrix::from_elem(2, 3, 0.0);
        let v: Matrix<f64> = Matrix::from_elem(2, 3, 0.0);
        assert!(matches!(
            add_row(&a, &v),
            Err(ModelError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn scale_multiplies_every_element() {
        let a = Matrix::from_shape_vec((2, 2), vec![1.0, -2.0, 3.0, -4.0]).unwrap();
        assert_eq!(scale(0.5, &a).to_vec(), vec![0.5, -1.0, 1.5, -2.0]);
    }

    #[test]
    fn hadamard_multiplies_elementwise() {
        let a = Matrix::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = Matrix::from_shape_vec((2, 2), vec![2.0, 0.0, -1.0, 0.5]).unwrap();
        assert_eq!(hadamard(&a, &b).unwrap().to_vec(), vec![2.0, 0.0, -3.0, 2.0]);
    }

    #[test]
    fn ln_propagates_ieee_values() {
        let a = Matrix::from_shape_vec((1, 3), vec![1.0, 0.0, -1.0]).unwrap();
        let out = ln(&a);
        assert_eq!(out[(0, 0)], 0.0);
        assert!(out[(0, 1)].is_infinite() && out[(0, 1)] < 0.0);
        assert!(out[(0, 2)].is_nan());
    }

    #[test]
    fn sum_accumulates_row_major() {
        let a = Matrix::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(sum(&a), 10.0);
        let empty: Matrix<f64> = Matrix::zeros(0, 0);
        assert_eq!(sum(&empty), 0.0);
    }
}
