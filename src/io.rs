//! Plain text persistence: one matrix row per line, entries separated by a
//! single space. With `Scalar` cells a token containing `.` reads back as a
//! float and anything else as an integer. There is no support for exponents
//! and the format is not locale aware.

use crate::error::{MatrixError, Result};
use crate::matrix::matrix::Matrix;
use crate::rings::element::Element;
use itertools::Itertools;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

pub fn write_matrix<T: Element, W: Write>(writer: &mut W, matrix: &Matrix<T>) -> Result<()> {
    for line in matrix.iter_rows() {
        writeln!(writer, "{}", line.iter().join(" "))?;
    }
    Ok(())
}

pub fn read_matrix<T: Element + FromStr, R: BufRead>(reader: R) -> Result<Matrix<T>> {
    let mut lines = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<T>().map_err(|_| MatrixError::Parse {
                    line: i + 1,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<T>>>()?;
        lines.push(row);
    }
    Matrix::new(lines)
}

pub fn save_to_file<T: Element, P: AsRef<Path>>(matrix: &Matrix<T>, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_matrix(&mut writer, matrix)?;
    writer.flush()?;
    debug!(
        "saved {}x{} matrix to {}",
        matrix.rows(),
        matrix.cols(),
        path.display()
    );
    Ok(())
}

pub fn load_from_file<T: Element + FromStr, P: AsRef<Path>>(path: P) -> Result<Matrix<T>> {
    let path = path.as_ref();
    let matrix = read_matrix(BufReader::new(File::open(path)?))?;
    debug!(
        "loaded {}x{} matrix from {}",
        matrix.rows(),
        matrix.cols(),
        path.display()
    );
    Ok(matrix)
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rings::scalar::Scalar;

    fn write_to_string(matrix: &Matrix) -> String {
        let mut buffer = Vec::new();
        write_matrix(&mut buffer, matrix).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_write_matrix() {
        let a = Matrix::new(vec![
            vec![Scalar::from(1), Scalar::from(-2)],
            vec![Scalar::from(3.5), Scalar::from(4.0)],
        ])
        .unwrap();
        assert_eq!(write_to_string(&a), "1 -2\n3.5 4.0\n");
    }

    #[test]
    fn test_read_matrix_keeps_integer_and_float_kinds() {
        let a: Matrix = read_matrix("1 2.0\n  -3   4 \n".as_bytes()).unwrap();
        assert_eq!(a.shape(), (2, 2));
        assert!(a.at(0, 0).is_int());
        assert!(!a.at(0, 1).is_int());
        assert!(a.at(1, 0).is_int());
        assert_eq!(a.at(1, 0), Scalar::from(-3));

        assert_eq!(write_to_string(&a), "1 2.0\n-3 4\n");
    }

    #[test]
    fn test_read_matrix_errors() {
        assert!(matches!(
            read_matrix::<Scalar, _>("1 2\n3 x\n".as_bytes()),
            Err(MatrixError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            read_matrix::<Scalar, _>("1 2\n3\n".as_bytes()),
            Err(MatrixError::InvalidShape(_))
        ));
        assert!(matches!(
            read_matrix::<Scalar, _>("1 2\n\n3 4\n".as_bytes()),
            Err(MatrixError::InvalidShape(_))
        ));
        assert!(matches!(
            read_matrix::<Scalar, _>("".as_bytes()),
            Err(MatrixError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_read_matrix_f64() {
        let a: Matrix<f64> = read_matrix("1 2.5\n3 4\n".as_bytes()).unwrap();
        assert_eq!(a.to_list(), vec![vec![1.0, 2.5], vec![3.0, 4.0]]);
    }
}
