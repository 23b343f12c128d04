use crate::error::{MatrixError, Result};
use crate::matrix::matrix::Matrix;
use crate::rings::element::Element;
use crate::rings::scalar::Scalar;
use rand::Rng;
use std::fmt::Display;

fn check_range<N: PartialOrd + Display>(min: N, max: N) -> Result<()> {
    // `!(<=)` so that NaN bounds are rejected too
    if !(min <= max) {
        return Err(MatrixError::EmptyRange {
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(())
}

// uniform sampling of floats needs a finite, representable width
fn check_float_range(min: f64, max: f64) -> Result<()> {
    check_range(min, max)?;
    if !(min.is_finite() && max.is_finite() && (max - min).is_finite()) {
        return Err(MatrixError::UnboundedRange { min, max });
    }
    Ok(())
}

// random generation

/// Matrix of uniform integers in `min..=max`.
pub fn random_matrix<R: Rng + ?Sized>(
    rng: &mut R,
    rows: usize,
    cols: usize,
    min: i64,
    max: i64,
) -> Result<Matrix<Scalar>> {
    check_range(min, max)?;
    Matrix::from_fn(rows, cols, |_, _| Scalar::from(rng.gen_range(min..=max)))
}

/// Matrix of uniform floats in `min..=max`.
pub fn random_float_matrix<R: Rng + ?Sized>(
    rng: &mut R,
    rows: usize,
    cols: usize,
    min: f64,
    max: f64,
) -> Result<Matrix<Scalar>> {
    check_float_range(min, max)?;
    Matrix::from_fn(rows, cols, |_, _| Scalar::from(rng.gen_range(min..=max)))
}

/// `n x 1` column vector of uniform integers in `min..=max`.
pub fn random_vector<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    min: i64,
    max: i64,
) -> Result<Matrix<Scalar>> {
    random_matrix(rng, n, 1, min, max)
}

// special matrices

pub fn diagonal_matrix<T: Element>(values: &[T]) -> Result<Matrix<T>> {
    let n = values.len();
    Matrix::from_fn(n, n, |i, j| {
        if i == j {
            values[i].clone()
        } else {
            T::zero()
        }
    })
}

/// `value` times the identity.
pub fn scalar_matrix<T: Element>(n: usize, value: T) -> Result<Matrix<T>> {
    Matrix::from_fn(n, n, |i, j| if i == j { value.clone() } else { T::zero() })
}

// validation helpers

pub fn is_square<T: Element>(a: &Matrix<T>) -> bool {
    a.is_square()
}

pub fn is_zero_matrix<T: Element>(a: &Matrix<T>) -> bool {
    a.iter_rows().flatten().all(|x| *x == T::zero())
}

pub fn is_identity<T: Element>(a: &Matrix<T>, eps: f64) -> bool {
    if !a.is_square() {
        return false;
    }
    match Matrix::identity(a.rows()) {
        Ok(id) => a.approx_equal(&id, eps),
        Err(_) => false,
    }
}

// conversions

pub fn list_to_matrix<T: Element>(lines: Vec<Vec<T>>) -> Result<Matrix<T>> {
    Matrix::new(lines)
}

pub fn vector_to_list<T: Element>(vec: &Matrix<T>) -> Result<Vec<T>> {
    if vec.cols() != 1 {
        return Err(MatrixError::InvalidShape(format!(
            "only n x 1 vectors convert to a list, got {}x{}",
            vec.rows(),
            vec.cols()
        )));
    }
    Ok(vec.iter_rows().map(|line| line[0].clone()).collect())
}

// concatenation

/// `[a | b]`: the columns of `b` appended to the right of `a`.
pub fn hstack<T: Element>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    if a.rows() != b.rows() {
        return Err(MatrixError::DimensionMismatch(format!(
            "horizontal stacking needs the same number of rows, got {} and {}",
            a.rows(),
            b.rows()
        )));
    }
    Matrix::from_fn(a.rows(), a.cols() + b.cols(), |i, j| {
        if j < a.cols() {
            a.at(i, j)
        } else {
            b.at(i, j - a.cols())
        }
    })
}

/// The rows of `b` appended below `a`.
pub fn vstack<T: Element>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    if a.cols() != b.cols() {
        return Err(MatrixError::DimensionMismatch(format!(
            "vertical stacking needs the same number of columns, got {} and {}",
            a.cols(),
            b.cols()
        )));
    }
    Ok(Matrix::from_cells(
        a.rows() + b.rows(),
        a.cols(),
        a.cells().iter().chain(b.cells().iter()).cloned().collect(),
    ))
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::matrix_linalg::DEFAULT_EPSILON;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn m(lines: Vec<Vec<i64>>) -> Matrix {
        Matrix::new(
            lines
                .into_iter()
                .map(|l| l.into_iter().map(Scalar::from).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_random_matrix() {
        let mut rng = StdRng::seed_from_u64(7);
        let r = random_matrix(&mut rng, 3, 4, 0, 9).unwrap();
        assert_eq!(r.shape(), (3, 4));
        assert!(r
            .iter_rows()
            .flatten()
            .all(|x| x.is_int() && (0.0..=9.0).contains(&x.to_float())));

        let again = random_matrix(&mut StdRng::seed_from_u64(7), 3, 4, 0, 9).unwrap();
        assert_eq!(r, again);

        let constant = random_matrix(&mut rng, 2, 2, 5, 5).unwrap();
        assert!(constant.iter_rows().flatten().all(|x| *x == Scalar::from(5)));
    }

    #[test]
    fn test_random_float_matrix_and_vector() {
        let mut rng = StdRng::seed_from_u64(42);
        let r = random_float_matrix(&mut rng, 2, 5, -1.0, 1.0).unwrap();
        assert_eq!(r.shape(), (2, 5));
        assert!(r.iter_rows().flatten().all(|x| {
            let v = x.to_float();
            !x.is_int() && (-1.0..=1.0).contains(&v)
        }));

        let v = random_vector(&mut rng, 4, 0, 10).unwrap();
        assert_eq!(v.shape(), (4, 1));
    }

    #[test]
    fn test_random_errors() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            random_matrix(&mut rng, 2, 2, 3, 1),
            Err(MatrixError::EmptyRange { .. })
        ));
        assert!(matches!(
            random_float_matrix(&mut rng, 2, 2, 0.0, f64::NAN),
            Err(MatrixError::EmptyRange { .. })
        ));
        assert!(matches!(
            random_float_matrix(&mut rng, 2, 2, 0.0, f64::INFINITY),
            Err(MatrixError::UnboundedRange { .. })
        ));
        assert!(matches!(
            random_float_matrix(&mut rng, 2, 2, f64::NEG_INFINITY, 0.0),
            Err(MatrixError::UnboundedRange { .. })
        ));
        assert!(matches!(
            random_float_matrix(&mut rng, 2, 2, -f64::MAX, f64::MAX),
            Err(MatrixError::UnboundedRange { .. })
        ));
        let wide = random_float_matrix(&mut rng, 2, 2, -f64::MAX / 2.0, f64::MAX / 2.0).unwrap();
        assert!(wide.iter_rows().flatten().all(|x| x.to_float().is_finite()));
        assert!(matches!(
            random_vector(&mut rng, 0, 0, 1),
            Err(MatrixError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_special_matrices() {
        let d = diagonal_matrix(&[Scalar::from(2), Scalar::from(5), Scalar::from(7)]).unwrap();
        assert_eq!(d, m(vec![vec![2, 0, 0], vec![0, 5, 0], vec![0, 0, 7]]));
        assert!(diagonal_matrix::<f64>(&[]).is_err());

        let s = scalar_matrix(3, 4.0).unwrap();
        assert_eq!(s.trace().unwrap(), 12.0);
        assert_eq!(s.det().unwrap(), 64.0);
    }

    #[test]
    fn test_validation_helpers() {
        assert!(is_square(&m(vec![vec![1, 2], vec![3, 4]])));
        assert!(!is_square(&m(vec![vec![1, 2]])));
        assert!(is_zero_matrix(&Matrix::<f64>::zeros(2, 2).unwrap()));
        assert!(!is_zero_matrix(&m(vec![vec![0, 1]])));
        assert!(is_identity(&Matrix::<f64>::identity(3).unwrap(), DEFAULT_EPSILON));
        assert!(!is_identity(&m(vec![vec![1, 0]]), DEFAULT_EPSILON));
        assert!(!is_identity(&m(vec![vec![1, 1], vec![0, 1]]), DEFAULT_EPSILON));
    }

    #[test]
    fn test_conversions() {
        let a = list_to_matrix(vec![
            vec![Scalar::from(9), Scalar::from(8)],
            vec![Scalar::from(7), Scalar::from(6)],
        ])
        .unwrap();
        assert_eq!(a, m(vec![vec![9, 8], vec![7, 6]]));

        let v = m(vec![vec![1], vec![2], vec![3]]);
        assert_eq!(
            vector_to_list(&v).unwrap(),
            vec![Scalar::from(1), Scalar::from(2), Scalar::from(3)]
        );
        assert!(matches!(
            vector_to_list(&a),
            Err(MatrixError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_stacking() {
        let a = m(vec![vec![1, 2], vec![3, 4]]);
        let b = m(vec![vec![1, 1], vec![1, 1]]);

        assert_eq!(
            hstack(&a, &b).unwrap(),
            m(vec![vec![1, 2, 1, 1], vec![3, 4, 1, 1]])
        );
        assert_eq!(
            vstack(&a, &b).unwrap(),
            m(vec![vec![1, 2], vec![3, 4], vec![1, 1], vec![1, 1]])
        );

        let c = m(vec![vec![5, 6, 7]]);
        assert!(matches!(
            hstack(&a, &c),
            Err(MatrixError::DimensionMismatch(_))
        ));
        assert!(matches!(
            vstack(&a, &c),
            Err(MatrixError::DimensionMismatch(_))
        ));
        assert_eq!(
            vstack(&c, &c).unwrap(),
            m(vec![vec![5, 6, 7], vec![5, 6, 7]])
        );
    }
}
