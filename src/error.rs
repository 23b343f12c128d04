use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatrixError>;

#[derive(Error, Debug)]
pub enum MatrixError {
    /// Empty input, ragged rows, or a vector of the wrong shape.
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    #[error("Invalid dimension {rows}x{cols}: both sizes must be at least 1")]
    InvalidDimension { rows: usize, cols: usize },

    #[error("Shape mismatch: {lhs:?} vs {rhs:?}")]
    ShapeMismatch {
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    /// Incompatible inner (multiply) or outer (stacking) dimensions.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("{op} is defined only for square matrices, got {rows}x{cols}")]
    NotSquare {
        op: &'static str,
        rows: usize,
        cols: usize,
    },

    #[error("Matrix is singular")]
    Singular,

    #[error("Unsupported operand type for {0}")]
    UnsupportedOperand(String),

    #[error("Empty range: min {min} is greater than max {max}")]
    EmptyRange { min: String, max: String },

    #[error("Unbounded range: {min}..={max} must be finite with a finite width")]
    UnboundedRange { min: f64, max: f64 },

    #[error("Cannot parse {token:?} on line {line}")]
    Parse { line: usize, token: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MatrixError {
    pub(crate) fn not_square(op: &'static str, shape: (usize, usize)) -> Self {
        MatrixError::NotSquare {
            op,
            rows: shape.0,
            cols: shape.1,
        }
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
