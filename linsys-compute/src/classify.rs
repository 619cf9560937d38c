//! Pure queries describing the shape of equations, used to decide which steps are available.

use crate::{
    fraction::Fraction,
    model::Equation,
    row::{Row, Variable},
};

#[cfg(feature = "serde")]
use serde_repr::{Deserialize_repr, Serialize_repr};

/// The shape of an equation, as far as the solving methods are concerned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
#[repr(u8)]
pub enum IsolatedIn {
    /// No variable is isolated, and elimination needs more than one scaling step.
    #[default]
    None,

    /// The first variable is isolated with coefficient `1` or `-1`.
    First,

    /// The second variable is isolated with coefficient `1` or `-1`.
    Second,

    /// The first variable is alone on the left side, but still multiplied by a number.
    FirstMultiple,

    /// The second variable is alone on the left side, but still multiplied by a number.
    SecondMultiple,

    /// Adding or subtracting the two equations eliminates a variable right away.
    Elimination,

    /// Scaling the first equation by an integer makes a variable eliminable.
    EliminationFirst,

    /// Scaling the second equation by an integer makes a variable eliminable.
    EliminationSecond,
}

/// Classifies an equation by the variable on its left side.
///
/// If the left side is a single term naming one of the two variables, and that variable does not
/// appear on the right side, the result is [`IsolatedIn::First`] / [`IsolatedIn::Second`] when
/// the coefficient has magnitude `1`, and [`IsolatedIn::FirstMultiple`] /
/// [`IsolatedIn::SecondMultiple`] for any other non-zero number. Every other shape is
/// [`IsolatedIn::None`].
pub fn classify_isolation(equation: &Equation, vars: (&str, &str)) -> IsolatedIn {
    let [term] = equation.left() else {
        return IsolatedIn::None;
    };
    let Some(variable) = term.variable.as_deref() else {
        return IsolatedIn::None;
    };
    if equation.right().iter().any(|t| t.names(variable)) {
        return IsolatedIn::None;
    }
    let Some(value) = term.coefficient.as_numeric() else {
        return IsolatedIn::None;
    };
    if value.is_zero() {
        return IsolatedIn::None;
    }

    let unit = value.abs().is_one();
    match (variable == vars.0, variable == vars.1, unit) {
        (true, _, true) => IsolatedIn::First,
        (true, _, false) => IsolatedIn::FirstMultiple,
        (_, true, true) => IsolatedIn::Second,
        (_, true, false) => IsolatedIn::SecondMultiple,
        _ => IsolatedIn::None,
    }
}

/// Returns true if `factor · a == b` for an integer factor other than `1` and `-1`.
fn is_integer_multiple(a: &Fraction, b: &Fraction) -> bool {
    match b.checked_div(a) {
        Ok(ratio) => ratio.is_integer() && !ratio.abs().is_one(),
        Err(_) => false,
    }
}

/// Classifies a pair of equations by how close they are to eliminating a variable.
///
/// Both equations are read as rows in standard form. The result is [`IsolatedIn::Elimination`] if
/// some variable has coefficients of equal, non-zero magnitude in both rows,
/// [`IsolatedIn::EliminationFirst`] if multiplying the first row by an integer gets there,
/// [`IsolatedIn::EliminationSecond`] if multiplying the second row does, and
/// [`IsolatedIn::None`] otherwise, including when the equations cannot be read as rows.
pub fn classify_elimination(first: &Equation, second: &Equation, vars: (&str, &str)) -> IsolatedIn {
    let Ok([a, b]) = Row::initialize_rows(first, second, vars) else {
        return IsolatedIn::None;
    };

    let pairs = [Variable::First, Variable::Second]
        .map(|variable| (a.coefficient(variable), b.coefficient(variable)));
    let usable = |(x, y): &(&Fraction, &Fraction)| !x.is_zero() && !y.is_zero();

    if pairs.iter().filter(|pair| usable(pair)).any(|(x, y)| x.abs() == y.abs()) {
        IsolatedIn::Elimination
    } else if pairs.iter().filter(|pair| usable(pair)).any(|(x, y)| is_integer_multiple(x, y)) {
        IsolatedIn::EliminationFirst
    } else if pairs.iter().filter(|pair| usable(pair)).any(|(x, y)| is_integer_multiple(y, x)) {
        IsolatedIn::EliminationSecond
    } else {
        IsolatedIn::None
    }
}

/// Classifies both equations of a system. Each equation is classified by
/// [`classify_isolation`] first; if it does not isolate a variable, the pair is classified by
/// [`classify_elimination`].
pub fn classify_system(first: &Equation, second: &Equation, vars: (&str, &str)) -> [IsolatedIn; 2] {
    let elimination = classify_elimination(first, second, vars);
    [first, second].map(|equation| match classify_isolation(equation, vars) {
        IsolatedIn::None => elimination,
        isolated => isolated,
    })
}

/// Returns true if adding or subtracting the two equations can be used to solve the system.
///
/// Elimination is not applicable if each variable appears in exactly one of the equations, such as
/// in `x = 2` and `y = 3`. The result does not depend on the order of the equations.
pub fn is_elimination_method_applicable(first: &Equation, second: &Equation, a: &str, b: &str) -> bool {
    let xor_a = first.contains(a) != second.contains(a);
    let xor_b = first.contains(b) != second.contains(b);
    !(xor_a && xor_b)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    const VARS: (&str, &str) = ("x", "y");

    fn eq(source: &str) -> Equation {
        source.parse().unwrap()
    }

    #[test]
    fn isolation() {
        assert_eq!(classify_isolation(&eq("x = 1 + y"), VARS), IsolatedIn::First);
        assert_eq!(classify_isolation(&eq("-y = 2x"), VARS), IsolatedIn::Second);
        assert_eq!(classify_isolation(&eq("2x = 4 - y"), VARS), IsolatedIn::FirstMultiple);
        assert_eq!(classify_isolation(&eq("1/2y = 3"), VARS), IsolatedIn::SecondMultiple);
    }

    #[test]
    fn not_isolated() {
        assert_eq!(classify_isolation(&eq("x - y = 1"), VARS), IsolatedIn::None);
        assert_eq!(classify_isolation(&eq("x = 1 + x"), VARS), IsolatedIn::None);
        assert_eq!(classify_isolation(&eq("3 = x"), VARS), IsolatedIn::None);
        assert_eq!(classify_isolation(&eq("0y = 3"), VARS), IsolatedIn::None);
        assert_eq!(classify_isolation(&eq("z = 3"), VARS), IsolatedIn::None);
    }

    #[test]
    fn elimination() {
        assert_eq!(classify_elimination(&eq("2x + 3y = 12"), &eq("2x - y = 1"), VARS), IsolatedIn::Elimination);
        assert_eq!(classify_elimination(&eq("2x + 3y = 12"), &eq("4x = 3 + y"), VARS), IsolatedIn::EliminationFirst);
        assert_eq!(classify_elimination(&eq("4x + 3y = 12"), &eq("2x - 5y = 1"), VARS), IsolatedIn::EliminationSecond);
        assert_eq!(classify_elimination(&eq("2x + 3y = 12"), &eq("3x - 2y = 1"), VARS), IsolatedIn::None);
    }

    #[test]
    fn elimination_of_unreadable_rows() {
        assert_eq!(classify_elimination(&eq("x < 3"), &eq("x + y = 1"), VARS), IsolatedIn::None);
        assert_eq!(classify_elimination(&eq("x + z = 3"), &eq("x + y = 1"), VARS), IsolatedIn::None);
    }

    #[test]
    fn system() {
        assert_eq!(
            classify_system(&eq("2x + 3y = 12"), &eq("x = 1 + y"), VARS),
            [IsolatedIn::EliminationSecond, IsolatedIn::First],
        );
    }

    #[test]
    fn applicability() {
        let pairs = [
            ("x = 2", "y = 3", false),
            ("x + y = 2", "y = 3", true),
            ("x + y = 2", "x - y = 3", true),
            ("x = 2", "x + y = 3", true),
            ("2 = 2", "x + y = 3", false),
        ];
        for (first, second, expected) in pairs {
            let (first, second) = (eq(first), eq(second));
            assert_eq!(is_elimination_method_applicable(&first, &second, "x", "y"), expected);
            assert_eq!(
                is_elimination_method_applicable(&first, &second, "x", "y"),
                is_elimination_method_applicable(&second, &first, "x", "y"),
            );
        }
    }
}
