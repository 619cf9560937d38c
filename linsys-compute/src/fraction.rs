//! Exact rational numbers.

use crate::error::{kind::DivisionByZero, Error};
use rug::{Integer, Rational};
use std::{cmp::Ordering, fmt, ops::{Add, Mul, Neg, Sub}};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An exact rational number, always stored in lowest terms.
///
/// The sign of the fraction lives in the numerator of the underlying [`Rational`]; the denominator
/// is always positive, and zero is always represented as `0/1`. [`Fraction::numerator`] returns
/// the magnitude of the numerator, and [`Fraction::sign`] the sign, so that a fraction can also be
/// viewed as a `(sign, numerator, denominator)` triple.
///
/// Arithmetic never overflows and never rounds. Division is the only operation that can fail, so
/// it is provided as [`Fraction::checked_div`] instead of through the [`std::ops::Div`] trait.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fraction(Rational);

impl Fraction {
    /// Creates a fraction `numerator / denominator`, reduced to lowest terms.
    ///
    /// Returns [`DivisionByZero`] if the denominator is zero.
    pub fn new(numerator: impl Into<Integer>, denominator: impl Into<Integer>) -> Result<Self, Error> {
        let numerator: Integer = numerator.into();
        let denominator: Integer = denominator.into();
        if denominator.cmp0() == Ordering::Equal {
            return Err(Error::spanless(DivisionByZero));
        }
        Ok(Self(Rational::from((numerator, denominator))))
    }

    /// Returns the fraction `0`.
    pub fn zero() -> Self {
        Self(Rational::new())
    }

    /// Returns the fraction `1`.
    pub fn one() -> Self {
        Self(Rational::from(1))
    }

    /// Returns the sign of the fraction: `-1` if it is negative, and `1` otherwise (zero is
    /// positive).
    pub fn sign(&self) -> i8 {
        if self.is_negative() { -1 } else { 1 }
    }

    /// Returns the magnitude of the numerator.
    pub fn numerator(&self) -> Integer {
        Integer::from(self.0.numer().abs_ref())
    }

    /// Returns the denominator, which is always positive.
    pub fn denominator(&self) -> &Integer {
        self.0.denom()
    }

    /// Returns true if the fraction is zero.
    pub fn is_zero(&self) -> bool {
        self.0.cmp0() == Ordering::Equal
    }

    /// Returns true if the fraction is exactly one.
    pub fn is_one(&self) -> bool {
        *self.0.numer() == 1 && *self.0.denom() == 1
    }

    /// Returns true if the fraction is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.0.cmp0() == Ordering::Less
    }

    /// Returns true if the denominator is one.
    pub fn is_integer(&self) -> bool {
        *self.0.denom() == 1
    }

    /// Returns the absolute value of the fraction.
    pub fn abs(&self) -> Self {
        Self(Rational::from(self.0.abs_ref()))
    }

    /// Divides this fraction by another.
    ///
    /// Returns [`DivisionByZero`] if `other` is zero.
    pub fn checked_div(&self, other: &Fraction) -> Result<Self, Error> {
        if other.is_zero() {
            return Err(Error::spanless(DivisionByZero));
        }
        Ok(Self(Rational::from(&self.0 / &other.0)))
    }

    /// Returns the reciprocal of the fraction.
    ///
    /// Returns [`DivisionByZero`] if the fraction is zero.
    pub fn checked_recip(&self) -> Result<Self, Error> {
        Self::one().checked_div(self)
    }
}

/// Implements a binary operator for owned and borrowed fractions.
macro_rules! impl_op {
    ($trait:ident, $method:ident) => {
        impl $trait for Fraction {
            type Output = Fraction;

            fn $method(self, rhs: Fraction) -> Fraction {
                Fraction(self.0.$method(rhs.0))
            }
        }

        impl $trait<&Fraction> for Fraction {
            type Output = Fraction;

            fn $method(self, rhs: &Fraction) -> Fraction {
                Fraction(self.0.$method(&rhs.0))
            }
        }

        impl $trait<&Fraction> for &Fraction {
            type Output = Fraction;

            fn $method(self, rhs: &Fraction) -> Fraction {
                Fraction(Rational::from((&self.0).$method(&rhs.0)))
            }
        }
    };
}

impl_op!(Add, add);
impl_op!(Sub, sub);
impl_op!(Mul, mul);

impl Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction(-self.0)
    }
}

impl Neg for &Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction(Rational::from(-&self.0))
    }
}

/// Implements [`From`] for types that [`Rational`] can be built from without loss.
macro_rules! impl_from {
    ($($ty:ty)*) => {
        $(
            impl From<$ty> for Fraction {
                fn from(n: $ty) -> Self {
                    Self(Rational::from(n))
                }
            }
        )*
    };
}

impl_from!(i32 i64 u32 u64 Integer Rational);

impl PartialEq<i32> for Fraction {
    fn eq(&self, other: &i32) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
