use num_bigint::BigInt;
use num_traits::{One, ToPrimitive, Zero};
use std::fmt;
use std::fmt::Display;
use std::ops;
use std::str::FromStr;
use thiserror::Error;

/// A real number that remembers whether it is an exact integer or a float.
///
/// Integer arithmetic stays exact for `+`, `-` and `*`. Mixing with a float
/// promotes to float, and `/` always produces a float.
#[derive(Debug, Clone)]
pub enum Scalar {
    Int(BigInt),
    Float(f64),
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid number {token:?}")]
pub struct ParseScalarError {
    pub token: String,
}

impl Scalar {
    pub fn to_float(&self) -> f64 {
        match self {
            Scalar::Int(i) => i.to_f64().unwrap_or(f64::NAN),
            Scalar::Float(f) => *f,
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Scalar::Int(_))
    }
}

impl ops::Add for Scalar {
    type Output = Scalar;

    fn add(self, rhs: Scalar) -> Scalar {
        match (self, rhs) {
            (Scalar::Int(a), Scalar::Int(b)) => Scalar::Int(a + b),
            (a, b) => Scalar::Float(a.to_float() + b.to_float()),
        }
    }
}

impl ops::Sub for Scalar {
    type Output = Scalar;

    fn sub(self, rhs: Scalar) -> Scalar {
        match (self, rhs) {
            (Scalar::Int(a), Scalar::Int(b)) => Scalar::Int(a - b),
            (a, b) => Scalar::Float(a.to_float() - b.to_float()),
        }
    }
}

impl ops::Mul for Scalar {
    type Output = Scalar;

    fn mul(self, rhs: Scalar) -> Scalar {
        match (self, rhs) {
            (Scalar::Int(a), Scalar::Int(b)) => Scalar::Int(a * b),
            (a, b) => Scalar::Float(a.to_float() * b.to_float()),
        }
    }
}

impl ops::Div for Scalar {
    type Output = Scalar;

    fn div(self, rhs: Scalar) -> Scalar {
        Scalar::Float(self.to_float() / rhs.to_float())
    }
}

impl ops::Neg for Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        match self {
            Scalar::Int(i) => Scalar::Int(-i),
            Scalar::Float(f) => Scalar::Float(-f),
        }
    }
}

impl Zero for Scalar {
    fn zero() -> Scalar {
        Scalar::Int(BigInt::zero())
    }

    fn is_zero(&self) -> bool {
        match self {
            Scalar::Int(i) => i.is_zero(),
            Scalar::Float(f) => *f == 0.0,
        }
    }
}

impl One for Scalar {
    fn one() -> Scalar {
        Scalar::Int(BigInt::one())
    }
}

impl PartialEq for Scalar {
    fn eq(&self, rhs: &Scalar) -> bool {
        match (self, rhs) {
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (a, b) => a.to_float() == b.to_float(),
        }
    }
}

impl std::iter::Sum<Scalar> for Scalar {
    fn sum<I: Iterator<Item = Scalar>>(iter: I) -> Scalar {
        iter.fold(Scalar::zero(), |acc, s| acc + s)
    }
}

impl ToPrimitive for Scalar {
    fn to_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int(i) => i.to_i64(),
            Scalar::Float(f) => f.to_i64(),
        }
    }

    fn to_u64(&self) -> Option<u64> {
        match self {
            Scalar::Int(i) => i.to_u64(),
            Scalar::Float(f) => f.to_u64(),
        }
    }

    fn to_f64(&self) -> Option<f64> {
        Some(self.to_float())
    }
}

// A float always renders with a `.` so that the text format can tell it
// apart from an integer when reading it back.
impl Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{:.1}", v),
            Scalar::Float(v) => write!(f, "{}", v),
        }
    }
}

impl FromStr for Scalar {
    type Err = ParseScalarError;

    fn from_str(s: &str) -> Result<Scalar, ParseScalarError> {
        let err = || ParseScalarError {
            token: s.to_string(),
        };
        if s.contains('.') {
            return s.parse::<f64>().map(Scalar::Float).map_err(|_| err());
        }
        BigInt::from_str(s).map(Scalar::Int).map_err(|_| err())
    }
}

impl From<BigInt> for Scalar {
    fn from(value: BigInt) -> Scalar {
        Scalar::Int(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Scalar {
        Scalar::Int(BigInt::from(value))
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Scalar {
        Scalar::Int(BigInt::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Scalar {
        Scalar::Float(value)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
