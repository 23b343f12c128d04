use crate::error::MatrixError;
use crate::io;
use crate::matrix::matrix::{Matrix, Operand};
use crate::matrix::matrix_linalg::DEFAULT_EPSILON;
use crate::rings::scalar::Scalar;
use crate::utils;
use num_bigint::BigInt;
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use std::path::PathBuf;

impl From<MatrixError> for PyErr {
    fn from(error: MatrixError) -> PyErr {
        match error {
            MatrixError::UnsupportedOperand(_) => PyTypeError::new_err(error.to_string()),
            MatrixError::Io(error) => error.into(),
            _ => PyValueError::new_err(error.to_string()),
        }
    }
}

// Python ints stay exact, anything else numeric becomes a float
impl<'py> FromPyObject<'py> for Scalar {
    fn extract_bound(ob: &Bound<'py, PyAny>) -> PyResult<Self> {
        if let Ok(i) = ob.extract::<BigInt>() {
            return Ok(Scalar::Int(i));
        }
        match ob.extract::<f64>() {
            Ok(f) => Ok(Scalar::Float(f)),
            Err(_) => Err(PyTypeError::new_err("expected an int or a float")),
        }
    }
}

impl<'py> IntoPyObject<'py> for Scalar {
    type Target = PyAny;
    type Output = Bound<'py, PyAny>;
    type Error = PyErr;

    fn into_pyobject(self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
        match self {
            Scalar::Int(i) => Ok(i.into_pyobject(py)?.into_any()),
            Scalar::Float(f) => Ok(f.into_pyobject(py)?.into_any()),
        }
    }
}

fn extract_operand(other: &Bound<'_, PyAny>) -> PyResult<Operand<Scalar>> {
    if let Ok(matrix) = other.downcast::<PyMatrix>() {
        return Ok(Operand::Matrix(matrix.get().inner.clone()));
    }
    match other.extract::<Scalar>() {
        Ok(k) => Ok(Operand::Scalar(k)),
        Err(_) => Err(MatrixError::UnsupportedOperand("multiplication".into()).into()),
    }
}

#[derive(Debug, Clone)]
#[pyclass(frozen, name = "Matrix", module = "matrix_engine")]
pub struct PyMatrix {
    pub inner: Matrix<Scalar>,
}

impl From<Matrix<Scalar>> for PyMatrix {
    fn from(inner: Matrix<Scalar>) -> PyMatrix {
        PyMatrix { inner }
    }
}

#[pymethods]
impl PyMatrix {
    #[new]
    pub fn new(data: Vec<Vec<Scalar>>) -> PyResult<PyMatrix> {
        Ok(Matrix::new(data)?.into())
    }

    #[staticmethod]
    pub fn identity(n: usize) -> PyResult<PyMatrix> {
        Ok(Matrix::identity(n)?.into())
    }

    #[staticmethod]
    pub fn zeros(rows: usize, cols: usize) -> PyResult<PyMatrix> {
        Ok(Matrix::zeros(rows, cols)?.into())
    }

    pub fn to_list(&self) -> Vec<Vec<Scalar>> {
        self.inner.to_list()
    }

    #[getter]
    pub fn rows(&self) -> usize {
        self.inner.rows()
    }

    #[getter]
    pub fn cols(&self) -> usize {
        self.inner.cols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.inner.shape()
    }

    pub fn copy(&self) -> PyMatrix {
        self.clone()
    }

    pub fn __repr__(&self) -> String {
        self.inner.to_string()
    }

    pub fn __eq__(&self, other: PyRef<'_, PyMatrix>) -> bool {
        self.inner == other.inner
    }

    pub fn __add__(&self, other: PyRef<'_, PyMatrix>) -> PyResult<PyMatrix> {
        Ok(self.inner.add(&other.inner)?.into())
    }

    pub fn __sub__(&self, other: PyRef<'_, PyMatrix>) -> PyResult<PyMatrix> {
        Ok(self.inner.sub(&other.inner)?.into())
    }

    pub fn __mul__(&self, other: &Bound<'_, PyAny>) -> PyResult<PyMatrix> {
        Ok(self.inner.mul_operand(&extract_operand(other)?)?.into())
    }

    pub fn __rmul__(&self, other: &Bound<'_, PyAny>) -> PyResult<PyMatrix> {
        match extract_operand(other)? {
            Operand::Matrix(lhs) => Ok(lhs.multiply(&self.inner)?.into()),
            Operand::Scalar(k) => Ok(self.inner.scalar_multiply(&k).into()),
        }
    }

    pub fn transpose(&self) -> PyMatrix {
        self.inner.transpose().into()
    }

    pub fn minor(&self, row: usize, col: usize) -> PyResult<PyMatrix> {
        Ok(self.inner.minor(row, col)?.into())
    }

    pub fn det(&self) -> PyResult<Scalar> {
        Ok(self.inner.det()?)
    }

    pub fn inverse(&self) -> PyResult<PyMatrix> {
        Ok(self.inner.inverse()?.into())
    }

    pub fn gauss_jordan(&self) -> PyMatrix {
        self.inner.gauss_jordan().into()
    }

    pub fn solve(&self, b: PyRef<'_, PyMatrix>) -> PyResult<PyMatrix> {
        Ok(self.inner.solve(&b.inner)?.into())
    }

    pub fn rank(&self) -> usize {
        self.inner.rank()
    }

    pub fn trace(&self) -> PyResult<Scalar> {
        Ok(self.inner.trace()?)
    }

    pub fn is_symmetric(&self) -> bool {
        self.inner.is_symmetric()
    }

    pub fn is_orthogonal(&self) -> bool {
        self.inner.is_orthogonal()
    }

    #[pyo3(signature = (other, eps=DEFAULT_EPSILON))]
    pub fn approx_equal(&self, other: PyRef<'_, PyMatrix>, eps: f64) -> bool {
        self.inner.approx_equal(&other.inner, eps)
    }
}

#[pyfunction]
pub fn hstack(a: PyRef<'_, PyMatrix>, b: PyRef<'_, PyMatrix>) -> PyResult<PyMatrix> {
    Ok(utils::hstack(&a.inner, &b.inner)?.into())
}

#[pyfunction]
pub fn vstack(a: PyRef<'_, PyMatrix>, b: PyRef<'_, PyMatrix>) -> PyResult<PyMatrix> {
    Ok(utils::vstack(&a.inner, &b.inner)?.into())
}

#[pyfunction]
#[pyo3(signature = (a, filename=PathBuf::from("matrix.txt")))]
pub fn save_to_file(a: PyRef<'_, PyMatrix>, filename: PathBuf) -> PyResult<()> {
    Ok(io::save_to_file(&a.inner, filename)?)
}

#[pyfunction]
#[pyo3(signature = (filename=PathBuf::from("matrix.txt")))]
pub fn load_from_file(filename: PathBuf) -> PyResult<PyMatrix> {
    Ok(io::load_from_file(filename)?.into())
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
