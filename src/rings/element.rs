use num_traits::{One, ToPrimitive, Zero};
use std::ops::{Add, Div, Mul, Neg, Sub};

pub trait Element:  // Avoid repeating all the traits
    Clone
    + Zero
    + One
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + std::iter::Sum<Self>
    + ToPrimitive
    + std::fmt::Display
    + std::fmt::Debug
{
    /// Magnitude used by the tolerance based checks. NaN when the value has
    /// no `f64` representation.
    fn magnitude(&self) -> f64 {
        self.to_f64().map_or(f64::NAN, f64::abs)
    }
}

impl<T> Element for T where
    T: Clone
        + Zero
        + One
        + PartialEq
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Div<Output = T>
        + Neg<Output = T>
        + std::iter::Sum<T>
        + ToPrimitive
        + std::fmt::Display
        + std::fmt::Debug
{
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude() {
        assert_eq!((-2.5f64).magnitude(), 2.5);
        assert_eq!(0f64.magnitude(), 0.0);
        assert!(f64::NAN.magnitude().is_nan());
    }
}
