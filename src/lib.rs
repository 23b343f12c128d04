//! Dense matrices of real numbers: arithmetic, determinant, inverse,
//! Gauss-Jordan reduction, linear solve, rank and the usual predicates.

pub mod error;
pub mod matrix {
    pub mod matrix;
    pub mod matrix_linalg;
}
pub mod rings {
    pub mod element;
    pub mod scalar;
}

pub mod io;
pub mod utils;

#[cfg(feature = "python")]
pub mod python;

pub use error::{MatrixError, Result};
pub use matrix::matrix::{Matrix, Operand};
pub use matrix::matrix_linalg::{DEFAULT_EPSILON, RANK_EPSILON};
pub use rings::element::Element;
pub use rings::scalar::Scalar;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn matrix_engine(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::PyMatrix>()?;
    m.add_function(wrap_pyfunction!(python::hstack, m)?)?;
    m.add_function(wrap_pyfunction!(python::vstack, m)?)?;
    m.add_function(wrap_pyfunction!(python::save_to_file, m)?)?;
    m.add_function(wrap_pyfunction!(python::load_from_file, m)?)?;
    Ok(())
}
