use crate::{
    error::{kind::NonNumericCoefficient, Error},
    fraction::Fraction,
};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The coefficient of a term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Coefficient {
    /// A number, such as the `3/2` in `3/2y`.
    Numeric(Fraction),

    /// A named weight scaled by a number, such as the `2a` in `2a*x`.
    ///
    /// Symbolic coefficients can be scaled and negated, but nothing can be divided by them.
    Symbolic {
        /// The name of the weight.
        name: String,

        /// The number the weight is multiplied by.
        scale: Fraction,
    },
}

impl Default for Coefficient {
    fn default() -> Self {
        Self::one()
    }
}

impl Coefficient {
    /// Returns the coefficient `1`.
    pub fn one() -> Self {
        Self::Numeric(Fraction::one())
    }

    /// Returns the coefficient `0`.
    pub fn zero() -> Self {
        Self::Numeric(Fraction::zero())
    }

    /// Creates a symbolic coefficient with a scale of one.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbolic { name: name.into(), scale: Fraction::one() }
    }

    /// Returns the numeric value of the coefficient, or [`None`] if it is symbolic.
    pub fn as_numeric(&self) -> Option<&Fraction> {
        match self {
            Self::Numeric(value) => Some(value),
            Self::Symbolic { .. } => None,
        }
    }

    /// Returns the numeric value of the coefficient, or [`NonNumericCoefficient`] if it is
    /// symbolic.
    pub fn numeric(&self) -> Result<&Fraction, Error> {
        match self {
            Self::Numeric(value) => Ok(value),
            Self::Symbolic { name, .. } => Err(Error::spanless(NonNumericCoefficient { name: name.clone() })),
        }
    }

    /// Returns the number part of the coefficient: the value itself, or the scale of the symbol.
    pub fn scale(&self) -> &Fraction {
        match self {
            Self::Numeric(value) => value,
            Self::Symbolic { scale, .. } => scale,
        }
    }

    /// Returns the name of the symbol, if the coefficient is symbolic.
    pub fn symbol_name(&self) -> Option<&str> {
        match self {
            Self::Numeric(_) => None,
            Self::Symbolic { name, .. } => Some(name),
        }
    }

    /// Returns true if the coefficient is zero.
    pub fn is_zero(&self) -> bool {
        self.scale().is_zero()
    }

    /// Returns true if the coefficient is exactly the number `1`.
    pub fn is_one(&self) -> bool {
        matches!(self, Self::Numeric(value) if value.is_one())
    }

    /// Returns true if the number part of the coefficient is negative.
    pub fn is_negative(&self) -> bool {
        self.scale().is_negative()
    }

    /// Returns a coefficient with the same symbol (if any) and the given scale.
    fn with_scale(&self, scale: Fraction) -> Self {
        match self {
            Self::Numeric(_) => Self::Numeric(scale),
            Self::Symbolic { name, .. } => Self::Symbolic { name: name.clone(), scale },
        }
    }

    /// Returns the coefficient with a non-negative number part.
    pub fn abs(&self) -> Self {
        self.with_scale(self.scale().abs())
    }

    /// Returns the coefficient multiplied by the given number.
    pub fn scaled(&self, factor: &Fraction) -> Self {
        self.with_scale(self.scale() * factor)
    }

    /// Returns the coefficient divided by the given number.
    pub fn divided(&self, divisor: &Fraction) -> Result<Self, Error> {
        Ok(self.with_scale(self.scale().checked_div(divisor)?))
    }

    /// Multiplies two coefficients. At most one of them can be symbolic.
    pub fn product(&self, other: &Coefficient) -> Result<Self, Error> {
        match (self, other) {
            (Self::Numeric(a), b) => Ok(b.scaled(a)),
            (a, Self::Numeric(b)) => Ok(a.scaled(b)),
            (Self::Symbolic { .. }, Self::Symbolic { name, .. }) => {
                Err(Error::spanless(NonNumericCoefficient { name: name.clone() }))
            },
        }
    }
}

impl std::ops::Neg for &Coefficient {
    type Output = Coefficient;

    fn neg(self) -> Coefficient {
        self.with_scale(-self.scale())
    }
}

impl From<Fraction> for Coefficient {
    fn from(value: Fraction) -> Self {
        Self::Numeric(value)
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{}", value),
            Self::Symbolic { name, scale } if scale.is_one() => write!(f, "{}", name),
            Self::Symbolic { name, scale } if *scale == -1 => write!(f, "-{}", name),
            Self::Symbolic { name, scale } => write!(f, "{}{}", scale, name),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn symbolic_scaling() {
        let weight = Coefficient::symbol("a");
        let scaled = weight.scaled(&Fraction::new(3, 2).unwrap());
        assert_eq!(scaled.to_string(), "3/2a");
        assert_eq!((-&scaled).to_string(), "-3/2a");
        assert!(scaled.numeric().unwrap_err().is::<NonNumericCoefficient>());
    }

    #[test]
    fn symbolic_products() {
        let two = Coefficient::from(Fraction::from(2));
        let weight = Coefficient::symbol("k");
        assert_eq!(two.product(&weight).unwrap().to_string(), "2k");
        assert!(weight.product(&weight).is_err());
    }
}
