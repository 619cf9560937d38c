use crate::{error::Error, fraction::Fraction, model::coefficient::Coefficient};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The sign written in front of a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operator {
    Plus,
    Minus,
}

impl Operator {
    /// Returns the operator with the opposite sign.
    pub fn flipped(self) -> Self {
        match self {
            Self::Plus => Self::Minus,
            Self::Minus => Self::Plus,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
        }
    }
}

/// One addend of a side of an equation: `[operator] coefficient [variable]`.
///
/// The first term of a side may have no operator, which means an implicit `+`. Terms produced by
/// this crate are normalized: the coefficient is non-negative and the sign is carried by the
/// operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Term {
    /// The sign written in front of the term, if any.
    pub operator: Option<Operator>,

    /// The coefficient of the term.
    pub coefficient: Coefficient,

    /// The variable of the term, or [`None`] for a constant.
    pub variable: Option<String>,
}

impl Term {
    /// Creates a term from its parts, as written.
    pub fn new(operator: Option<Operator>, coefficient: Coefficient, variable: Option<String>) -> Self {
        Self { operator, coefficient, variable }
    }

    /// Creates a normalized term with the given signed coefficient: a negative coefficient
    /// becomes a [`Operator::Minus`] with its magnitude.
    pub fn signed(coefficient: Coefficient, variable: Option<String>) -> Self {
        let operator = if coefficient.is_negative() { Operator::Minus } else { Operator::Plus };
        Self {
            operator: Some(operator),
            coefficient: coefficient.abs(),
            variable,
        }
    }

    /// Creates the normalized term `value · variable`.
    pub fn numeric(value: Fraction, variable: Option<&str>) -> Self {
        Self::signed(Coefficient::Numeric(value), variable.map(str::to_string))
    }

    /// Creates the normalized constant term `value`.
    pub fn constant(value: Fraction) -> Self {
        Self::numeric(value, None)
    }

    /// Creates the term `1 · variable`, with no operator.
    pub fn unit(variable: &str) -> Self {
        Self::new(None, Coefficient::one(), Some(variable.to_string()))
    }

    /// Returns true if the term has no variable.
    pub fn is_constant(&self) -> bool {
        self.variable.is_none()
    }

    /// Returns true if the term names the given variable.
    pub fn names(&self, variable: &str) -> bool {
        self.variable.as_deref() == Some(variable)
    }

    /// Returns the coefficient with the operator applied to it.
    pub fn signed_coefficient(&self) -> Coefficient {
        match self.operator {
            Some(Operator::Minus) => -&self.coefficient,
            _ => self.coefficient.clone(),
        }
    }

    /// Returns the numeric value of the signed coefficient, or an error if it is symbolic.
    pub fn signed_value(&self) -> Result<Fraction, Error> {
        self.signed_coefficient().numeric().cloned()
    }

    /// Returns the term with the opposite sign.
    pub fn negated(&self) -> Self {
        Self::signed(-&self.signed_coefficient(), self.variable.clone())
    }

    /// Returns the term multiplied by the given number.
    pub fn scaled(&self, factor: &Fraction) -> Self {
        if factor.is_one() {
            return self.clone();
        }
        Self::signed(self.signed_coefficient().scaled(factor), self.variable.clone())
    }

    /// Returns the term divided by the given number. Dividing by `1` returns the term unchanged.
    pub fn divided(&self, divisor: &Fraction) -> Result<Self, Error> {
        if divisor.is_one() {
            return Ok(self.clone());
        }
        Ok(Self::signed(self.signed_coefficient().divided(divisor)?, self.variable.clone()))
    }

    /// Writes the term without its operator.
    fn fmt_magnitude(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.coefficient, &self.variable) {
            (coefficient, None) => write!(f, "{}", coefficient),
            (coefficient, Some(variable)) if coefficient.is_one() => write!(f, "{}", variable),
            (Coefficient::Numeric(value), Some(variable)) if *value == -1 => write!(f, "-{}", variable),
            (Coefficient::Numeric(value), Some(variable)) => write!(f, "{}{}", value, variable),
            (coefficient, Some(variable)) => write!(f, "{}*{}", coefficient, variable),
        }
    }
}

/// Normalizes the operators of a side in place: the first term loses an explicit `+`, and every
/// other term gets an explicit operator.
pub(crate) fn normalize_operators(terms: &mut [Term]) {
    for (i, term) in terms.iter_mut().enumerate() {
        match (i, term.operator) {
            (0, Some(Operator::Plus)) => term.operator = None,
            (i, None) if i > 0 => term.operator = Some(Operator::Plus),
            _ => {},
        }
    }
}

/// Writes the terms of a side: `2x - 3y + 1`.
pub(crate) fn fmt_side(terms: &[Term], f: &mut fmt::Formatter) -> fmt::Result {
    for (i, term) in terms.iter().enumerate() {
        match (i, term.operator) {
            (0, Some(Operator::Minus)) => write!(f, "-")?,
            (0, _) => {},
            (_, Some(Operator::Minus)) => write!(f, " - ")?,
            (_, _) => write!(f, " + ")?,
        }
        term.fmt_magnitude(f)?;
    }
    Ok(())
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.operator == Some(Operator::Minus) {
            write!(f, "-")?;
        }
        self.fmt_magnitude(f)
    }
}
