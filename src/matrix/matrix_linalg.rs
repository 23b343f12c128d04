use crate::error::{MatrixError, Result};
use crate::matrix::matrix::Matrix;
use crate::rings::element::Element;
use log::trace;

/// Tolerance of `approx_equal` when none is given, also used by `is_orthogonal`.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Entries at or below this magnitude count as zero when computing the rank.
pub const RANK_EPSILON: f64 = 1e-12;

impl<T: Element> Matrix<T> {
    /// The matrix without row `row` and column `col`.
    pub fn minor(&self, row: usize, col: usize) -> Result<Matrix<T>> {
        if self.rows() < 2 || self.cols() < 2 {
            return Err(MatrixError::InvalidShape(format!(
                "the minor of a {}x{} matrix is empty",
                self.rows(),
                self.cols()
            )));
        }
        if row >= self.rows() || col >= self.cols() {
            return Err(MatrixError::DimensionMismatch(format!(
                "cannot remove row {} and column {} from a {}x{} matrix",
                row,
                col,
                self.rows(),
                self.cols()
            )));
        }
        Ok(self.minor_unchecked(row, col))
    }

    fn minor_unchecked(&self, row: usize, col: usize) -> Matrix<T> {
        let cells = self
            .iter_rows()
            .enumerate()
            .filter(|(r, _)| *r != row)
            .flat_map(|(_, line)| {
                line.iter()
                    .enumerate()
                    .filter(move |(c, _)| *c != col)
                    .map(|(_, x)| x.clone())
            })
            .collect();
        Matrix::from_cells(self.rows() - 1, self.cols() - 1, cells)
    }

    /// Cofactor expansion along the first row, with closed forms up to 3x3.
    ///
    /// The generic branch is factorial in the size of the matrix and applies
    /// no pivoting, so float input accumulates rounding error.
    pub fn det(&self) -> Result<T> {
        if !self.is_square() {
            return Err(MatrixError::not_square("Determinant", self.shape()));
        }
        Ok(self.det_unchecked())
    }

    fn det_unchecked(&self) -> T {
        let at = |r, c| self.at(r, c);
        match self.rows() {
            1 => at(0, 0),
            2 => at(0, 0) * at(1, 1) - at(0, 1) * at(1, 0),
            3 => {
                at(0, 0) * (at(1, 1) * at(2, 2) - at(1, 2) * at(2, 1))
                    - at(0, 1) * (at(1, 0) * at(2, 2) - at(1, 2) * at(2, 0))
                    + at(0, 2) * (at(1, 0) * at(2, 1) - at(1, 1) * at(2, 0))
            }
            n => (0..n)
                .map(|col| {
                    let term = at(0, col) * self.minor_unchecked(0, col).det_unchecked();
                    if col % 2 == 0 {
                        term
                    } else {
                        -term
                    }
                })
                .sum(),
        }
    }

    fn cofactor(&self, row: usize, col: usize) -> T {
        let minor_det = self.minor_unchecked(row, col).det_unchecked();
        if (row + col) % 2 == 0 {
            minor_det
        } else {
            -minor_det
        }
    }

    /// Inverse through the adjugate. Singularity is an exact comparison of
    /// the determinant against zero.
    pub fn inverse(&self) -> Result<Matrix<T>> {
        if !self.is_square() {
            return Err(MatrixError::not_square("Inverse", self.shape()));
        }

        let det = self.det_unchecked();
        if det == T::zero() {
            return Err(MatrixError::Singular);
        }
        let scale = T::one() / det;

        let adjugate = match self.rows() {
            1 => Matrix::from_cells(1, 1, vec![T::one()]),
            2 => Matrix::from_cells(
                2,
                2,
                vec![
                    self.at(1, 1),
                    -self.at(0, 1),
                    -self.at(1, 0),
                    self.at(0, 0),
                ],
            ),
            n => Matrix::from_fn(n, n, |r, c| self.cofactor(r, c))?.transpose(),
        };

        Ok(adjugate.scalar_multiply(&scale))
    }

    // Returns the reduced copy and the pivot column of each leading row.
    fn reduce(&self) -> (Matrix<T>, Vec<usize>) {
        let mut mat = self.clone();
        let (rows, cols) = mat.shape();
        let mut pivot_cols = Vec::with_capacity(rows.min(cols));
        let mut row = 0;

        for col in 0..cols {
            if row >= rows {
                break;
            }

            let pivot_row = match (row..rows).find(|&r| mat.at(r, col) != T::zero()) {
                Some(r) => r,
                None => {
                    trace!("column {} has no pivot", col);
                    continue;
                }
            };

            if pivot_row != row {
                trace!("swapping rows {} and {}", row, pivot_row);
                mat.swap_rows(row, pivot_row);
            }

            let pivot_val = mat.at(row, col);
            let cells = mat.cells_mut();
            for x in cells[row * cols..(row + 1) * cols].iter_mut() {
                *x = x.clone() / pivot_val.clone();
            }

            for r in 0..rows {
                if r == row {
                    continue;
                }

                let factor = cells[r * cols + col].clone();
                for k in 0..cols {
                    let reduced = cells[r * cols + k].clone()
                        - factor.clone() * cells[row * cols + k].clone();
                    cells[r * cols + k] = reduced;
                }
            }

            pivot_cols.push(col);
            row += 1;
        }

        (mat, pivot_cols)
    }

    /// Reduced row echelon form, computed on a copy.
    ///
    /// The pivot of each column is the first nonzero candidate, not the
    /// largest one, so ill-conditioned float input can lose precision.
    pub fn gauss_jordan(&self) -> Matrix<T> {
        self.reduce().0
    }

    /// Solves `self * x = b` for a column vector `b`.
    pub fn solve(&self, b: &Matrix<T>) -> Result<Matrix<T>> {
        if !self.is_square() {
            return Err(MatrixError::not_square("Solve", self.shape()));
        }
        let n = self.rows();
        if b.shape() != (n, 1) {
            return Err(MatrixError::InvalidShape(format!(
                "b must be a {}x1 column vector, got {}x{}",
                n,
                b.rows(),
                b.cols()
            )));
        }

        let augmented = Matrix::from_fn(n, n + 1, |i, j| {
            if j < n {
                self.at(i, j)
            } else {
                b.at(i, 0)
            }
        })?;
        let (reduced, pivot_cols) = augmented.reduce();

        // A coefficient column without pivot leaves the system without a unique solution
        if pivot_cols.iter().filter(|&&c| c < n).count() < n {
            return Err(MatrixError::Singular);
        }

        Matrix::from_fn(n, 1, |i, _| reduced.at(i, n))
    }

    pub fn rank(&self) -> usize {
        self.gauss_jordan()
            .iter_rows()
            .filter(|line| line.iter().any(|x| x.magnitude() > RANK_EPSILON))
            .count()
    }

    pub fn trace(&self) -> Result<T> {
        if !self.is_square() {
            return Err(MatrixError::not_square("Trace", self.shape()));
        }
        Ok((0..self.rows()).map(|i| self.at(i, i)).sum())
    }

    /// Exact elementwise comparison with the transpose.
    pub fn is_symmetric(&self) -> bool {
        *self == self.transpose()
    }

    pub fn is_orthogonal(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        self.multiply(&self.transpose())
            .and_then(|product| {
                Ok(product.approx_equal(&Matrix::identity(self.rows())?, DEFAULT_EPSILON))
            })
            .unwrap_or(false)
    }

    pub fn approx_equal(&self, other: &Matrix<T>, eps: f64) -> bool {
        self.shape() == other.shape()
            && self
                .cells()
                .iter()
                .zip(other.cells().iter())
                .all(|(a, b)| (a.clone() - b.clone()).magnitude() <= eps)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
