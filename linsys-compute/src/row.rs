//! Rows of coefficients, and the elementary row operations of the elimination method.

use crate::{
    ctxt::Ctxt,
    error::{
        kind::{UnknownVariable, UnsupportedRelation, ZeroFactor},
        Error,
    },
    fraction::Fraction,
    model::{Equation, Term},
    transform::to_standard_form,
};
use linsys_parser::parser::token::op::RelationKind;
use log::debug;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the two variables of a system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Variable {
    First,
    Second,
}

impl Variable {
    /// Returns the other variable.
    pub fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }

    /// Returns the name of this variable among the given pair of names.
    pub fn name<'a>(self, vars: (&'a str, &'a str)) -> &'a str {
        match self {
            Self::First => vars.0,
            Self::Second => vars.1,
        }
    }
}

/// The value of one variable, read from a row of the shape `1·v + 0·w = c`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    /// The variable that was solved for.
    pub variable: Variable,

    /// The value of the variable.
    pub value: Fraction,
}

/// An equation `first·v + second·w = cost` of a system of two variables, written as the row of
/// its coefficients.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Row {
    /// The coefficient of the first variable.
    pub first: Fraction,

    /// The coefficient of the second variable.
    pub second: Fraction,

    /// The constant on the right-hand side.
    pub cost: Fraction,
}

impl Row {
    /// Creates a row from its components.
    pub fn new(first: impl Into<Fraction>, second: impl Into<Fraction>, cost: impl Into<Fraction>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            cost: cost.into(),
        }
    }

    /// Returns the coefficient of the given variable.
    pub fn coefficient(&self, variable: Variable) -> &Fraction {
        match variable {
            Variable::First => &self.first,
            Variable::Second => &self.second,
        }
    }

    /// Returns the three components of the row.
    pub fn components(&self) -> [&Fraction; 3] {
        [&self.first, &self.second, &self.cost]
    }

    /// Builds a row from its components, rejecting it if any component is out of range.
    fn checked(first: Fraction, second: Fraction, cost: Fraction, ctxt: &Ctxt) -> Result<Self, Error> {
        let row = Self { first, second, cost };
        ctxt.check_all(row.components())?;
        Ok(row)
    }

    /// Adds two rows component-wise.
    pub fn add(&self, other: &Row, ctxt: &Ctxt) -> Result<Self, Error> {
        let result = Self::checked(
            &self.first + &other.first,
            &self.second + &other.second,
            &self.cost + &other.cost,
            ctxt,
        );
        debug!("{} + {} = {:?}", self, other, result.as_ref().map(ToString::to_string));
        result
    }

    /// Subtracts another row from this one, component-wise.
    pub fn subtract(&self, other: &Row, ctxt: &Ctxt) -> Result<Self, Error> {
        let result = Self::checked(
            &self.first - &other.first,
            &self.second - &other.second,
            &self.cost - &other.cost,
            ctxt,
        );
        debug!("{} - {} = {:?}", self, other, result.as_ref().map(ToString::to_string));
        result
    }

    /// Multiplies every component of the row by the factor.
    ///
    /// Multiplying by zero would erase the equation from the system, so it fails with
    /// [`ZeroFactor`].
    pub fn multiply(&self, factor: &Fraction, ctxt: &Ctxt) -> Result<Self, Error> {
        if factor.is_zero() {
            return Err(Error::spanless(ZeroFactor));
        }
        let result = Self::checked(&self.first * factor, &self.second * factor, &self.cost * factor, ctxt);
        debug!("{} * {} = {:?}", self, factor, result.as_ref().map(ToString::to_string));
        result
    }

    /// Divides every component of the row by the factor.
    ///
    /// Dividing by zero fails with [`DivisionByZero`](crate::error::kind::DivisionByZero), which
    /// is checked before the range.
    pub fn divide(&self, factor: &Fraction, ctxt: &Ctxt) -> Result<Self, Error> {
        let result = Self::checked(
            self.first.checked_div(factor)?,
            self.second.checked_div(factor)?,
            self.cost.checked_div(factor)?,
            ctxt,
        );
        debug!("{} / {} = {:?}", self, factor, result.as_ref().map(ToString::to_string));
        result
    }

    /// Reads the row of an equation in the two given variables. The equation is brought to
    /// standard form first, so `x = 1 + y` becomes the row `(1, -1, 1)`.
    ///
    /// Fails with [`UnsupportedRelation`] for inequalities, [`UnknownVariable`] if the equation
    /// names a third variable, and
    /// [`NonNumericCoefficient`](crate::error::kind::NonNumericCoefficient) if a coefficient is
    /// symbolic.
    pub fn from_equation(equation: &Equation, vars: (&str, &str)) -> Result<Self, Error> {
        if equation.relation() != RelationKind::Equal {
            return Err(Error::spanless(UnsupportedRelation { relation: equation.relation().to_string() }));
        }

        let standard = to_standard_form(equation);
        let mut row = Self::new(0, 0, 0);
        for term in standard.left() {
            let value = term.signed_value()?;
            match term.variable.as_deref() {
                Some(v) if v == vars.0 => row.first = value,
                Some(v) if v == vars.1 => row.second = value,
                Some(v) => return Err(Error::spanless(UnknownVariable { variable: v.to_string() })),
                // only the `0` placeholder of an empty side is left here
                None => {},
            }
        }
        for term in standard.right() {
            row.cost = &row.cost + &term.signed_value()?;
        }
        Ok(row)
    }

    /// Builds the two starting rows of an elimination exercise.
    pub fn initialize_rows(first: &Equation, second: &Equation, vars: (&str, &str)) -> Result<[Self; 2], Error> {
        let rows = [Self::from_equation(first, vars)?, Self::from_equation(second, vars)?];
        debug!("initialized rows {} and {}", rows[0], rows[1]);
        Ok(rows)
    }

    /// Writes the row as an equation in the given variables. Terms with a zero coefficient are
    /// left out, unless both coefficients are zero.
    pub fn to_equation(&self, vars: (&str, &str)) -> Result<Equation, Error> {
        let mut left = [(&self.first, vars.0), (&self.second, vars.1)]
            .into_iter()
            .filter(|(value, _)| !value.is_zero())
            .map(|(value, variable)| Term::numeric(value.clone(), Some(variable)))
            .collect::<Vec<_>>();
        if left.is_empty() {
            left.push(Term::constant(Fraction::zero()));
        }
        Equation::new(left, vec![Term::constant(self.cost.clone())], RelationKind::Equal)
    }

    /// If the row solves for one variable, that is, one coefficient is exactly `1` and the other
    /// is exactly `0`, returns the solution.
    pub fn solution(&self) -> Option<Solution> {
        let variable = if self.first.is_one() && self.second.is_zero() {
            Variable::First
        } else if self.second.is_one() && self.first.is_zero() {
            Variable::Second
        } else {
            return None;
        };
        Some(Solution { variable, value: self.cost.clone() })
    }

    /// Returns the variable whose coefficient is zero, if the other one is not.
    pub fn vanished(&self) -> Option<Variable> {
        match (self.first.is_zero(), self.second.is_zero()) {
            (true, false) => Some(Variable::First),
            (false, true) => Some(Variable::Second),
            _ => None,
        }
    }

    /// Returns true if the row reads `0 = 0`: both variables were eliminated, and the equation
    /// holds for every value.
    pub fn is_identity(&self) -> bool {
        self.first.is_zero() && self.second.is_zero() && self.cost.is_zero()
    }

    /// Returns true if the row reads `0 = c` with `c ≠ 0`: the system has no solution.
    pub fn is_contradiction(&self) -> bool {
        self.first.is_zero() && self.second.is_zero() && !self.cost.is_zero()
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.first, self.second, self.cost)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::kind::{DivisionByZero, NonNumericCoefficient, OperationOutOfRange};
    use crate::model::Coefficient;
    use pretty_assertions::assert_eq;
    use super::*;

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    fn eq(source: &str) -> Equation {
        source.parse().unwrap()
    }

    #[test]
    fn initialize_example_rows() {
        let rows = Row::initialize_rows(&eq("2x + 3y = 12"), &eq("x - y = 1"), ("x", "y")).unwrap();
        assert_eq!(rows, [Row::new(2, 3, 12), Row::new(1, -1, 1)]);
    }

    #[test]
    fn rows_from_any_shape() {
        assert_eq!(Row::from_equation(&eq("x = 1 + y"), ("x", "y")).unwrap(), Row::new(1, -1, 1));
        assert_eq!(Row::from_equation(&eq("3 = y"), ("x", "y")).unwrap(), Row::new(0, -1, -3));
        assert_eq!(Row::from_equation(&eq("y + 2 = 1/2x - 4"), ("x", "y")).unwrap(), Row::new(frac(-1, 2), 1, -6));
    }

    #[test]
    fn rows_reject_bad_equations() {
        let err = Row::from_equation(&eq("x + z = 1"), ("x", "y")).unwrap_err();
        assert!(err.is::<UnknownVariable>());

        let err = Row::from_equation(&eq("x < 1"), ("x", "y")).unwrap_err();
        assert!(err.is::<UnsupportedRelation>());

        let weighted = Equation::new(
            vec![Term::new(None, Coefficient::symbol("a"), Some("x".to_string()))],
            vec![Term::constant(Fraction::one())],
            RelationKind::Equal,
        ).unwrap();
        let err = Row::from_equation(&weighted, ("x", "y")).unwrap_err();
        assert!(err.is::<NonNumericCoefficient>());
    }

    #[test]
    fn add() {
        let ctxt = Ctxt::default();
        let sum = Row::new(2, 3, 12).add(&Row::new(1, -1, 1), &ctxt).unwrap();
        assert_eq!(sum, Row::new(3, 2, 13));
    }

    #[test]
    fn divide() {
        let ctxt = Ctxt::default();
        let quotient = Row::new(2, 3, 12).divide(&Fraction::from(2), &ctxt).unwrap();
        assert_eq!(quotient, Row::new(1, frac(3, 2), 6));
        assert_eq!(quotient.to_string(), "(1, 3/2, 6)");
    }

    #[test]
    fn divide_by_zero() {
        let err = Row::new(2, 3, 12).divide(&Fraction::zero(), &Ctxt::default()).unwrap_err();
        assert!(err.is::<DivisionByZero>());
        assert!(!err.is::<OperationOutOfRange>());
    }

    #[test]
    fn multiply_by_zero() {
        let err = Row::new(2, 3, 12).multiply(&Fraction::zero(), &Ctxt::default()).unwrap_err();
        assert!(err.is::<ZeroFactor>());
    }

    #[test]
    fn out_of_range() {
        let ctxt = Ctxt::default();
        let err = Row::new(500, 1, 1).add(&Row::new(500, 1, 1), &ctxt).unwrap_err();
        assert!(err.is::<OperationOutOfRange>());

        let err = Row::new(1, 2, 3).divide(&Fraction::from(1000), &ctxt).unwrap_err();
        assert!(err.is::<OperationOutOfRange>());

        let err = Row::new(1, 2, 3).multiply(&frac(1, 1000), &ctxt).unwrap_err();
        assert!(err.is::<OperationOutOfRange>());
    }

    /// Adding a row and then subtracting it again gives back the original row.
    #[test]
    fn additive_inverse() {
        let ctxt = Ctxt::default();
        let rows = [
            Row::new(2, 3, 12),
            Row::new(1, -1, 1),
            Row::new(frac(1, 2), frac(-7, 3), 0),
            Row::new(0, 0, frac(5, 9)),
        ];
        for a in &rows {
            for b in &rows {
                let sum = a.add(b, &ctxt).unwrap();
                assert_eq!(sum.subtract(b, &ctxt).unwrap(), *a);
            }
        }
    }

    #[test]
    fn solutions() {
        assert_eq!(Row::new(1, 0, 3).solution(), Some(Solution { variable: Variable::First, value: frac(3, 1) }));
        assert_eq!(Row::new(0, 1, frac(-1, 2)).solution(), Some(Solution {
            variable: Variable::Second,
            value: frac(-1, 2),
        }));
        assert_eq!(Row::new(-1, 0, 3).solution(), None);
        assert_eq!(Row::new(1, 1, 3).solution(), None);
        assert_eq!(Row::new(2, 0, 3).vanished(), Some(Variable::Second));
    }

    #[test]
    fn degenerate_rows() {
        assert!(Row::new(0, 0, 0).is_identity());
        assert!(Row::new(0, 0, 4).is_contradiction());
        assert_eq!(Row::new(0, 0, 4).vanished(), None);
    }

    #[test]
    fn back_to_equation() {
        assert_eq!(Row::new(3, -2, 13).to_equation(("x", "y")).unwrap().to_string(), "3x - 2y = 13");
        assert_eq!(Row::new(0, 1, -2).to_equation(("x", "y")).unwrap().to_string(), "y = -2");
        assert_eq!(Row::new(0, 0, 0).to_equation(("x", "y")).unwrap().to_string(), "0 = 0");
    }
}
