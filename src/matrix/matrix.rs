use crate::error::{MatrixError, Result};
use crate::rings::element::Element;
use crate::rings::scalar::Scalar;
use itertools::Itertools;
use std::fmt;
use std::ops;

/// Dense row-major matrix. Always at least 1x1 and never reshaped: every
/// operation returns a fresh instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T = Scalar> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

/// Right hand side of a multiplication, checked explicitly before dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand<T = Scalar> {
    Scalar(T),
    Matrix(Matrix<T>),
}

impl<T> From<Matrix<T>> for Operand<T> {
    fn from(matrix: Matrix<T>) -> Operand<T> {
        Operand::Matrix(matrix)
    }
}

impl<T: Element> Matrix<T> {
    pub fn new(lines: Vec<Vec<T>>) -> Result<Matrix<T>> {
        let cols = match lines.first() {
            Some(first) => first.len(),
            None => {
                return Err(MatrixError::InvalidShape(
                    "matrix data must be a non-empty list of rows".into(),
                ))
            }
        };
        if cols == 0 {
            return Err(MatrixError::InvalidShape("rows must not be empty".into()));
        }
        if let Some((i, line)) = lines.iter().find_position(|line| line.len() != cols) {
            return Err(MatrixError::InvalidShape(format!(
                "all rows must have the same length: row {} has {} elements, expected {}",
                i,
                line.len(),
                cols
            )));
        }

        Ok(Matrix {
            rows: lines.len(),
            cols,
            cells: lines.into_iter().flatten().collect(),
        })
    }

    /// Builds a `rows x cols` matrix whose cell `(i, j)` is `f(i, j)`.
    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(usize, usize) -> T,
    ) -> Result<Matrix<T>> {
        if rows == 0 || cols == 0 {
            return Err(MatrixError::InvalidDimension { rows, cols });
        }
        let mut cells = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                cells.push(f(i, j));
            }
        }
        Ok(Matrix { rows, cols, cells })
    }

    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<T>) -> Matrix<T> {
        debug_assert!(rows > 0 && cols > 0 && cells.len() == rows * cols);
        Matrix { rows, cols, cells }
    }

    pub fn identity(n: usize) -> Result<Matrix<T>> {
        Matrix::from_fn(n, n, |i, j| if i == j { T::one() } else { T::zero() })
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Matrix<T>> {
        Matrix::from_fn(rows, cols, |_, _| T::zero())
    }

    pub fn to_list(&self) -> Vec<Vec<T>> {
        self.cells
            .chunks(self.cols)
            .map(|line| line.into())
            .collect()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[inline(always)]
    pub fn at(&self, row: usize, col: usize) -> T {
        self.cells[row * self.cols + col].clone()
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.cells.chunks(self.cols)
    }

    pub(crate) fn cells(&self) -> &[T] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for k in 0..self.cols {
            self.cells.swap(a * self.cols + k, b * self.cols + k);
        }
    }

    fn zip_with(&self, rhs: &Matrix<T>, f: impl Fn(T, T) -> T) -> Result<Matrix<T>> {
        if self.shape() != rhs.shape() {
            return Err(MatrixError::ShapeMismatch {
                lhs: self.shape(),
                rhs: rhs.shape(),
            });
        }

        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .cells
                .iter()
                .zip(rhs.cells.iter())
                .map(|(a, b)| f(a.to_owned(), b.to_owned()))
                .collect(),
        })
    }

    pub fn add(&self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        self.zip_with(rhs, |a, b| a + b)
    }

    pub fn sub(&self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        self.zip_with(rhs, |a, b| a - b)
    }

    pub fn scalar_multiply(&self, k: &T) -> Matrix<T> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(|x| x.clone() * k.clone()).collect(),
        }
    }

    pub fn multiply(&self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        if self.cols != rhs.rows {
            return Err(MatrixError::DimensionMismatch(format!(
                "multiplication requires A.cols == B.rows, got {:?} * {:?}",
                self.shape(),
                rhs.shape()
            )));
        }

        Ok(Matrix {
            rows: self.rows,
            cols: rhs.cols,
            cells: (0..self.rows)
                .flat_map(|i| {
                    (0..rhs.cols)
                        .map(move |j| (0..self.cols).map(|k| self.at(i, k) * rhs.at(k, j)).sum())
                })
                .collect(),
        })
    }

    pub fn mul_operand(&self, rhs: &Operand<T>) -> Result<Matrix<T>> {
        match rhs {
            Operand::Scalar(k) => Ok(self.scalar_multiply(k)),
            Operand::Matrix(m) => self.multiply(m),
        }
    }

    pub fn transpose(&self) -> Matrix<T> {
        Matrix {
            rows: self.cols,
            cols: self.rows,
            cells: (0..self.cols)
                .flat_map(|c| (0..self.rows).map(move |r| self.at(r, c)))
                .collect(),
        }
    }
}

impl<T: Element> TryFrom<Vec<Vec<T>>> for Matrix<T> {
    type Error = MatrixError;

    fn try_from(lines: Vec<Vec<T>>) -> Result<Matrix<T>> {
        Matrix::new(lines)
    }
}

impl<T> ops::Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(row < self.rows && col < self.cols, "index out of bounds");
        &self.cells[row * self.cols + col]
    }
}

// Columns are right-justified to the widest rendered value of the column.
impl<T: Element> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.cells.iter().map(|x| x.to_string()).collect();
        let widths: Vec<usize> = (0..self.cols)
            .map(|j| {
                (0..self.rows)
                    .map(|i| rendered[i * self.cols + j].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let text = rendered
            .chunks(self.cols)
            .map(|line| {
                line.iter()
                    .zip(widths.iter())
                    .map(|(value, width)| format!("{:>width$}", value, width = *width))
                    .join(" ")
            })
            .join("\n");
        f.write_str(&text)
    }
}

impl<T: Element> ops::Add<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>>;

    fn add(self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        Matrix::add(self, rhs)
    }
}

impl<T: Element> ops::Sub<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>>;

    fn sub(self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        Matrix::sub(self, rhs)
    }
}

impl<T: Element> ops::Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>>;

    fn mul(self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        self.multiply(rhs)
    }
}

// Scalar multiplication, with the scalar on either side.
macro_rules! impl_scalar_mul {
    ($scalar:ty) => {
        impl ops::Mul<$scalar> for &Matrix<$scalar> {
            type Output = Matrix<$scalar>;

            fn mul(self, k: $scalar) -> Matrix<$scalar> {
                self.scalar_multiply(&k)
            }
        }

        impl ops::Mul<&Matrix<$scalar>> for $scalar {
            type Output = Matrix<$scalar>;

            fn mul(self, rhs: &Matrix<$scalar>) -> Matrix<$scalar> {
                rhs.scalar_multiply(&self)
            }
        }
    };
}

impl_scalar_mul!(f64);
impl_scalar_mul!(Scalar);

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
