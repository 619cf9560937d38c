use crate::{
    error::{
        kind::{DivisionByZero, EquationOutOfBounds, VariableNotPresent, ZeroFactor},
        Error,
    },
    fraction::Fraction,
    model::{Equation, Side, Term},
    transform::simplify::combine_side,
};
use linsys_parser::parser::token::op::RelationKind;
use log::debug;

/// Isolates the target variable, returning an equation `target = expression` whose left side is
/// the target with coefficient exactly `1`.
///
/// The left side is searched first. Every term of the other side is divided by the coefficient of
/// the target, and the remaining terms of the target's side are divided, negated and appended
/// after them. Like terms are not collected, and dividing by a coefficient of `1` leaves a term
/// unchanged, so isolating an already isolated variable returns the same equation.
///
/// If the target also appears on the other side, that term is moved across first and its
/// coefficient is subtracted from the target's. If a moved term names a variable that already
/// appears on the new right side, the like terms of that side are combined.
///
/// For inequalities, the relation is reversed once if the target came from the right side, and
/// once more if its coefficient is negative.
///
/// # Errors
///
/// - [`VariableNotPresent`] if the target appears on neither side.
/// - [`NonNumericCoefficient`](crate::error::kind::NonNumericCoefficient) if the coefficient of
///   the target is symbolic.
/// - [`DivisionByZero`] if the coefficient of the target is zero, or if the target terms of both
///   sides cancel.
pub fn compute_transformed_equation(equation: &Equation, target: &str) -> Result<Equation, Error> {
    let (side, index) = equation.side_of(target)
        .ok_or_else(|| Error::spanless(VariableNotPresent { variable: target.to_string() }))?;
    let (source, other) = match side {
        Side::Left => (equation.left(), equation.right()),
        Side::Right => (equation.right(), equation.left()),
    };

    let mut factor = source[index].signed_value()?;
    let across = other.iter().position(|term| term.variable.as_deref() == Some(target));
    if let Some(i) = across {
        factor = &factor - &other[i].signed_value()?;
    }
    if factor.is_zero() {
        return Err(Error::spanless(DivisionByZero));
    }

    let mut right = other.iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != across)
        .map(|(_, term)| term.divided(&factor))
        .collect::<Result<Vec<_>, _>>()?;
    for (i, term) in source.iter().enumerate() {
        if i != index {
            right.push(term.divided(&factor)?.negated());
        }
    }
    if right.is_empty() {
        right.push(Term::constant(Fraction::zero()));
    } else if has_repeated_variable(&right) {
        right = combine_side(&right);
    }

    let mut relation = equation.relation();
    if side == Side::Right {
        relation = relation.reversed();
    }
    if factor.is_negative() {
        relation = relation.reversed();
    }

    let result = Equation::new(vec![Term::unit(target)], right, relation)?;
    debug!("isolated `{}` in `{}`: `{}`", target, equation, result);
    Ok(result)
}

fn has_repeated_variable(terms: &[Term]) -> bool {
    terms.iter()
        .enumerate()
        .filter_map(|(i, term)| Some((i, term.variable.as_deref()?)))
        .any(|(i, variable)| terms[..i].iter().any(|t| t.variable.as_deref() == Some(variable)))
}

/// Isolates the target variable in the equation at the given index of a system.
///
/// Returns [`EquationOutOfBounds`] if there is no equation at that index.
pub fn transform_equation(equations: &[Equation], index: usize, target: &str) -> Result<Equation, Error> {
    let equation = equations.get(index)
        .ok_or_else(|| Error::spanless(EquationOutOfBounds { index, len: equations.len() }))?;
    compute_transformed_equation(equation, target)
}

/// Divides every term on both sides of the equation by the factor. Dividing by a negative factor
/// reverses an inequality.
///
/// Returns [`DivisionByZero`] if the factor is zero.
pub fn divide_equation_by_factor(equation: &Equation, factor: &Fraction) -> Result<Equation, Error> {
    if factor.is_zero() {
        return Err(Error::spanless(DivisionByZero));
    }
    let divide = |terms: &[Term]| terms.iter()
        .map(|term| term.divided(factor))
        .collect::<Result<Vec<_>, _>>();
    let result = Equation::new_unchecked(
        divide(equation.left())?,
        divide(equation.right())?,
        relation_after_scaling(equation, factor),
    );
    debug!("`{}` / {} = `{}`", equation, factor, result);
    Ok(result)
}

/// Multiplies every term on both sides of the equation by the factor. Multiplying by a negative
/// factor reverses an inequality.
///
/// Returns [`ZeroFactor`] if the factor is zero.
pub fn multiply_equation_by_factor(equation: &Equation, factor: &Fraction) -> Result<Equation, Error> {
    if factor.is_zero() {
        return Err(Error::spanless(ZeroFactor));
    }
    let multiply = |terms: &[Term]| terms.iter()
        .map(|term| term.scaled(factor))
        .collect::<Vec<_>>();
    let result = Equation::new_unchecked(
        multiply(equation.left()),
        multiply(equation.right()),
        relation_after_scaling(equation, factor),
    );
    debug!("`{}` * {} = `{}`", equation, factor, result);
    Ok(result)
}

fn relation_after_scaling(equation: &Equation, factor: &Fraction) -> RelationKind {
    if factor.is_negative() {
        equation.relation().reversed()
    } else {
        equation.relation()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::kind::NonNumericCoefficient;
    use crate::model::Coefficient;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use super::*;

    fn eq(source: &str) -> Equation {
        source.parse().unwrap()
    }

    fn isolate(source: &str, target: &str) -> String {
        compute_transformed_equation(&eq(source), target).unwrap().to_string()
    }

    #[test]
    fn example_isolation() {
        assert_eq!(isolate("x - y = 1", "x"), "x = 1 + y");
    }

    #[test]
    fn sole_left_term() {
        assert_eq!(isolate("2x = 4 - 3y", "x"), "x = 2 - 3/2y");
        assert_eq!(isolate("-x = 4", "x"), "x = -4");
    }

    #[test]
    fn several_left_terms() {
        assert_eq!(isolate("2x + 3y = 12", "x"), "x = 6 - 3/2y");
        assert_eq!(isolate("2x + 3y = 12", "y"), "y = 4 - 2/3x");
        assert_eq!(isolate("4 - 2y + x = 0", "y"), "y = 0 + 2 + 1/2x");
    }

    #[test]
    fn target_on_the_right() {
        assert_eq!(isolate("12 = 2x + 3y", "y"), "y = 4 - 2/3x");
        assert_eq!(isolate("1 = y", "y"), "y = 1");
    }

    #[test]
    fn inequalities() {
        assert_eq!(isolate("-2x < 4", "x"), "x > -2");
        assert_eq!(isolate("4 < 2x", "x"), "x > 2");
        assert_eq!(isolate("4 < -2x", "x"), "x < -2");
        assert_eq!(isolate("x + y > 3", "x"), "x > 3 - y");
    }

    #[test]
    fn already_isolated() {
        let equation = eq("x = 1 + y");
        assert_eq!(compute_transformed_equation(&equation, "x").unwrap(), equation);

        let equation = eq("y = -3/2x + 6");
        assert_eq!(compute_transformed_equation(&equation, "y").unwrap(), equation);
    }

    /// Substituting the isolated expression back into `a·x + b·y = c` gives back `c`.
    #[test]
    fn round_trip() {
        for source in ["2x + 3y = 12", "x - y = 1", "-3x + 1/2y = 5/4", "7/3x = 2 - y"] {
            let equation = eq(source);
            let isolated = compute_transformed_equation(&equation, "x").unwrap();
            for y in [-3, 0, 1, 8] {
                let y = Fraction::from(y);
                let mut values = HashMap::from([("y".to_string(), y)]);
                let x = isolated.evaluate_side(Side::Right, &values).unwrap();
                values.insert("x".to_string(), x);
                assert!(equation.holds(&values).unwrap(), "{} with {:?}", source, values);
            }
        }
    }

    #[test]
    fn variable_not_present() {
        let err = compute_transformed_equation(&eq("x - y = 1"), "z").unwrap_err();
        assert_eq!(err.downcast_ref::<VariableNotPresent>(), Some(&VariableNotPresent {
            variable: "z".to_string(),
        }));
    }

    #[test]
    fn zero_coefficient() {
        let err = compute_transformed_equation(&eq("0x + y = 1"), "x").unwrap_err();
        assert!(err.is::<DivisionByZero>());
    }

    #[test]
    fn symbolic_coefficient() {
        let equation = Equation::new(
            vec![Term::new(None, Coefficient::symbol("a"), Some("x".to_string()))],
            vec![Term::unit("y")],
            RelationKind::Equal,
        ).unwrap();
        let err = compute_transformed_equation(&equation, "x").unwrap_err();
        assert!(err.is::<NonNumericCoefficient>());

        let isolated = compute_transformed_equation(&equation, "y").unwrap();
        assert_eq!(isolated.to_string(), "y = a*x");
    }

    #[test]
    fn moved_term_meets_like_term() {
        assert_eq!(isolate("x + y = y + 1", "x"), "x = 1");
        assert_eq!(isolate("2x + 3y = 12 + y", "x"), "x = 6 - y");
    }

    #[test]
    fn target_on_both_sides() {
        assert_eq!(isolate("2x + 3y = 12 + y", "y"), "y = 6 - x");
        assert_eq!(isolate("x = 3 - 2x", "x"), "x = 1");

        let err = compute_transformed_equation(&eq("x + 1 = x + 2"), "x").unwrap_err();
        assert!(err.is::<DivisionByZero>());
    }

    #[test]
    fn transform_in_system() {
        let system = [eq("2x + 3y = 12"), eq("x - y = 1")];
        assert_eq!(transform_equation(&system, 1, "x").unwrap().to_string(), "x = 1 + y");

        let err = transform_equation(&system, 2, "x").unwrap_err();
        assert!(err.is::<EquationOutOfBounds>());
    }

    #[test]
    fn divide_by_factor() {
        let equation = eq("2x + 4y < 6");
        assert_eq!(divide_equation_by_factor(&equation, &Fraction::from(2)).unwrap().to_string(), "x + 2y < 3");
        assert_eq!(divide_equation_by_factor(&equation, &Fraction::from(-2)).unwrap().to_string(), "-x - 2y > -3");

        let err = divide_equation_by_factor(&equation, &Fraction::zero()).unwrap_err();
        assert!(err.is::<DivisionByZero>());
    }

    #[test]
    fn multiply_by_factor() {
        let equation = eq("1/2x - y = 3");
        assert_eq!(multiply_equation_by_factor(&equation, &Fraction::from(2)).unwrap().to_string(), "x - 2y = 6");

        let err = multiply_equation_by_factor(&equation, &Fraction::zero()).unwrap_err();
        assert!(err.is::<ZeroFactor>());
    }
}
