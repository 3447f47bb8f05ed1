use std::error::Error;
use std::fmt;
use std::ops::{Index, IndexMut};

use num_traits::{One, Zero};

use crate::error::ModelError;

/// Dense 2-D container, row-major flat storage.
///
/// Every operation returns a new `Matrix`; instances never alias. A matrix
/// with zero rows has zero columns: shapes `(0, c)` normalize to `(0, 0)`
/// at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Matrix<T> {
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<T>) -> Result<Self, ShapeError> {
        let (rows, cols) = shape;
        if data.len() != rows * cols {
            return Err(ShapeError {
                rows,
                cols,
                len: data.len(),
            });
        }
        let cols = if rows == 0 { 0 } else { cols };
        Ok(Self { data, rows, cols })
    }

    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, ShapeError> {
        Self::from_shape_vec((rows, cols), data)
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn row_slice(&self, row: usize) -> &[T] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    pub fn mapv<U, F>(&self, mut f: F) -> Matrix<U>
    where
        F: FnMut(&T) -> U,
    {
        Matrix {
            data: self.data.iter().map(|v| f(v)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.clone()
    }
}

impl<T> Matrix<T>
where
    T: Clone,
{
    pub fn from_elem(rows: usize, cols: usize, value: T) -> Self {
        let cols = if rows == 0 { 0 } else { cols };
        Matrix {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    /// Contiguous row range `[from, to)`. `to` is clamped to `nrows()`;
    /// a start beyond the matrix (or beyond the clamped end) fails with
    /// `InvalidRange`.
    pub fn slice_rows(&self, from: usize, to: usize) -> Result<Matrix<T>, ModelError> {
        let to = to.min(self.rows);
        if from > to {
            return Err(ModelError::InvalidRange {
                start: from,
                end: to,
                limit: self.rows,
            });
        }
        let data = self.data[self.offset(from, 0)..self.offset(to, 0)].to_vec();
        let rows = to - from;
        let cols = if rows == 0 { 0 } else { self.cols };
        Ok(Matrix { data, rows, cols })
    }

    pub fn transpose(&self) -> Matrix<T> {
        let mut data = Vec::with_capacity(self.rows * self.cols);
        for col in 0..self.cols {
            for row in 0..self.rows {
                data.push(self[(row, col)].clone());
            }
        }
        let rows = self.cols;
        let cols = if rows == 0 { 0 } else { self.rows };
        Matrix {
            data,
            rows,
            cols,
        }
    }
}

impl<T> Matrix<T>
where
    T: Clone + Zero,
{
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix::from_elem(rows, cols, T::zero())
    }
}

impl<T> Matrix<T>
where
    T: Clone + One,
{
    pub fn ones(rows: usize, cols: usize) -> Self {
        Matrix::from_elem(rows, cols, T::one())
    }
}

impl<T> Matrix<T>
where
    T: Clone + Zero + One,
{
    pub fn identity(n: usize) -> Self {
        let mut m = Matrix::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        m
    }
}

impl<T> Matrix<T>
where
    T: PartialOrd,
{
    /// Per-row index of the maximum element, ties broken by first occurrence.
    pub fn argmax_rows(&self) -> Vec<usize> {
        (0..self.rows).map(|r| row_argmax(self.row_slice(r))).collect()
    }

    /// Per-row index of the single nonzero entry of a one-hot encoded row.
    ///
    /// Shares `argmax_rows`'s tie and ordering contract, so rows that are
    /// not strictly one-hot decode to their first maximal entry.
    pub fn onehot_decode_rows(&self) -> Vec<usize> {
        self.argmax_rows()
    }
}

fn row_argmax<T: PartialOrd>(row: &[T]) -> usize {
    assert!(!row.is_empty(), "argmax of an empty row");
    let mut best = 0;
    for (idx, value) in row.iter().enumerate().skip(1) {
        if *value > row[best] {
            best = idx;
        }
    }
    best
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            write!(f, "[")?;
            for (idx, value) in self.row_slice(row).iter().enumerate() {
                write!(f, "{}", value)?;
                if idx + 1 != self.cols {
                    write!(f, ", ")?;
                }
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

/// Buffer length and requested shape disagree at construction.
#[derive(Debug, Clone)]
pub struct ShapeError {
    rows: usize,
    cols: usize,
    len: usize,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid shape ({}, {}) for buffer of length {}",
            self.rows, self.cols, self.len
        )
    }
}

impl Error for ShapeError {}
