use crate::{
    error::{
        kind::{DuplicateVariable, EmptySide, UnknownVariable},
        Error,
    },
    eval::Eval,
    fraction::Fraction,
    model::{
        coefficient::Coefficient,
        term::{fmt_side, normalize_operators, Operator, Term},
    },
};
use linsys_parser::parser::{
    ast::equation::{EquationExpr, SideExpr, TermExpr},
    token::op::{RelationKind, UnaryOpKind},
    Parser,
};
use log::debug;
use std::{collections::HashMap, fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the two sides of an equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Left,
    Right,
}

/// A linear equation or inequality: `left relation right`.
///
/// Both sides are non-empty, and each side names any given variable at most once. Equations are
/// immutable; every transformation builds a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equation {
    left: Vec<Term>,
    right: Vec<Term>,
    relation: RelationKind,
}

impl Equation {
    /// Creates an equation, checking that both sides are non-empty and that no side names a
    /// variable twice.
    ///
    /// The operators of the terms are normalized: the first term of a side has no explicit `+`.
    pub fn new(left: Vec<Term>, right: Vec<Term>, relation: RelationKind) -> Result<Self, Error> {
        for side in [&left, &right] {
            check_side(side)?;
        }
        Ok(Self::new_unchecked(left, right, relation))
    }

    /// Creates an equation whose sides are already known to be valid.
    pub(crate) fn new_unchecked(mut left: Vec<Term>, mut right: Vec<Term>, relation: RelationKind) -> Self {
        normalize_operators(&mut left);
        normalize_operators(&mut right);
        Self { left, right, relation }
    }

    /// Builds an equation from its syntax tree, evaluating every coefficient exactly.
    ///
    /// Errors point at the offending part of the source the tree was parsed from.
    pub fn from_expr(expr: &EquationExpr) -> Result<Self, Error> {
        let left = terms_from_side(&expr.left)?;
        let right = terms_from_side(&expr.right)?;
        Ok(Self::new_unchecked(left, right, expr.relation.kind))
    }

    /// Returns the terms of the left side.
    pub fn left(&self) -> &[Term] {
        &self.left
    }

    /// Returns the terms of the right side.
    pub fn right(&self) -> &[Term] {
        &self.right
    }

    /// Returns the terms of the given side.
    pub fn side(&self, side: Side) -> &[Term] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Returns the relation between both sides.
    pub fn relation(&self) -> RelationKind {
        self.relation
    }

    /// Returns true if the variable appears on either side.
    pub fn contains(&self, variable: &str) -> bool {
        self.side_of(variable).is_some()
    }

    /// Returns the side the variable appears on (the left side is searched first), along with the
    /// index of its term on that side.
    pub fn side_of(&self, variable: &str) -> Option<(Side, usize)> {
        self.left.iter()
            .position(|term| term.names(variable))
            .map(|i| (Side::Left, i))
            .or_else(|| {
                self.right.iter()
                    .position(|term| term.names(variable))
                    .map(|i| (Side::Right, i))
            })
    }

    /// Returns the term naming the variable on the given side.
    pub fn term(&self, side: Side, variable: &str) -> Option<&Term> {
        self.side(side).iter().find(|term| term.names(variable))
    }

    /// Returns true if the given side consists of a single term.
    pub fn is_single_term(&self, side: Side) -> bool {
        self.side(side).len() == 1
    }

    /// Returns the variables of the equation, in order of first appearance.
    pub fn variables(&self) -> Vec<&str> {
        let mut variables = Vec::new();
        for term in self.left.iter().chain(&self.right) {
            if let Some(variable) = term.variable.as_deref() {
                if !variables.contains(&variable) {
                    variables.push(variable);
                }
            }
        }
        variables
    }

    /// If the equation has the shape `v = expression`, where `v` has coefficient exactly `1` and
    /// does not appear in `expression`, returns `v` and `expression`.
    pub fn isolation(&self) -> Option<(&str, &[Term])> {
        let [term] = self.left.as_slice() else {
            return None;
        };
        let variable = term.variable.as_deref()?;
        let positive = term.operator != Some(Operator::Minus);
        if positive && term.coefficient.is_one() && !self.right.iter().any(|t| t.names(variable)) {
            Some((variable, &self.right))
        } else {
            None
        }
    }

    /// If the equation has the shape `v = c`, where `c` is a number, returns `v` and `c`.
    pub fn solution(&self) -> Option<(&str, Fraction)> {
        if self.relation != RelationKind::Equal {
            return None;
        }
        let (variable, expression) = self.isolation()?;
        match expression {
            [term] if term.is_constant() => Some((variable, term.signed_value().ok()?)),
            _ => None,
        }
    }

    /// Evaluates one side of the equation for the given variable assignment.
    pub fn evaluate_side(&self, side: Side, values: &HashMap<String, Fraction>) -> Result<Fraction, Error> {
        self.side(side).iter().try_fold(Fraction::zero(), |sum, term| {
            let coefficient = term.signed_value()?;
            let value = match &term.variable {
                Some(variable) => {
                    let value = values.get(variable)
                        .ok_or_else(|| Error::spanless(UnknownVariable { variable: variable.clone() }))?;
                    coefficient * value
                },
                None => coefficient,
            };
            Ok(sum + value)
        })
    }

    /// Returns true if the relation holds for the given variable assignment, using exact
    /// arithmetic.
    pub fn holds(&self, values: &HashMap<String, Fraction>) -> Result<bool, Error> {
        let left = self.evaluate_side(Side::Left, values)?;
        let right = self.evaluate_side(Side::Right, values)?;
        Ok(match self.relation {
            RelationKind::Less => left < right,
            RelationKind::Equal => left == right,
            RelationKind::Greater => left > right,
        })
    }

    /// Returns every numeric coefficient of the equation.
    pub fn coefficients(&self) -> impl Iterator<Item = &Fraction> {
        self.left.iter()
            .chain(&self.right)
            .filter_map(|term| term.coefficient.as_numeric())
    }
}

/// Checks that a side is non-empty and names each variable at most once.
fn check_side(terms: &[Term]) -> Result<(), Error> {
    if terms.is_empty() {
        return Err(Error::spanless(EmptySide));
    }
    for (i, term) in terms.iter().enumerate() {
        if let Some(variable) = &term.variable {
            if terms[..i].iter().any(|other| other.names(variable)) {
                return Err(Error::spanless(DuplicateVariable { variable: variable.clone() }));
            }
        }
    }
    Ok(())
}

/// Builds a term from its syntax tree.
fn term_from_expr(expr: &TermExpr) -> Result<Term, Error> {
    let operator = expr.sign.as_ref().map(|sign| match sign.kind {
        UnaryOpKind::Pos => Operator::Plus,
        UnaryOpKind::Neg => Operator::Minus,
    });
    let coefficient = match &expr.coefficient {
        Some(coefficient) => Coefficient::Numeric(coefficient.eval()?),
        None => Coefficient::one(),
    };
    Ok(Term::new(operator, coefficient, expr.variable.as_ref().map(|v| v.name.clone())))
}

/// Builds the terms of a side from its syntax tree, rejecting duplicate variables.
fn terms_from_side(side: &SideExpr) -> Result<Vec<Term>, Error> {
    let mut terms = Vec::with_capacity(side.terms.len());
    for expr in &side.terms {
        let term = term_from_expr(expr)?;
        if let Some(variable) = &term.variable {
            if terms.iter().any(|other: &Term| other.names(variable)) {
                return Err(Error::new(vec![expr.span.clone()], DuplicateVariable { variable: variable.clone() }));
            }
        }
        terms.push(term);
    }
    Ok(terms)
}

impl FromStr for Equation {
    type Err = Error;

    /// Parses and evaluates an equation, such as `2x + 3y = 12`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser::new(s);
        let expr = parser.try_parse_full::<EquationExpr>()?;
        let equation = Self::from_expr(&expr)?;
        debug!("parsed equation `{}`", equation);
        Ok(equation)
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_side(&self.left, f)?;
        write!(f, " {} ", self.relation)?;
        fmt_side(&self.right, f)
    }
}
