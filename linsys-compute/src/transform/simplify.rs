use crate::{
    fraction::Fraction,
    model::{Coefficient, Equation, Term},
};
use log::debug;

/// A run of like terms being added together.
struct Group<'a> {
    variable: Option<&'a str>,
    symbol: Option<&'a str>,
    sum: Fraction,
}

/// Adds up the like terms of a side, in order of first appearance. Terms are like if they name
/// the same variable (or none) and have the same symbolic weight (or none).
///
/// Terms that add up to zero are dropped, but a `0` constant is kept if the whole side cancels.
pub(crate) fn combine_side(terms: &[Term]) -> Vec<Term> {
    let mut groups: Vec<Group> = Vec::new();
    for term in terms {
        let value = term.signed_coefficient();
        let variable = term.variable.as_deref();
        let symbol = term.coefficient.symbol_name();
        match groups.iter_mut().find(|g| g.variable == variable && g.symbol == symbol) {
            Some(group) => group.sum = &group.sum + value.scale(),
            None => groups.push(Group { variable, symbol, sum: value.scale().clone() }),
        }
    }

    let combined = groups.into_iter()
        .filter(|group| !group.sum.is_zero())
        .map(|Group { variable, symbol, sum }| {
            let coefficient = match symbol {
                Some(name) => Coefficient::Symbolic { name: name.to_string(), scale: sum },
                None => Coefficient::Numeric(sum),
            };
            Term::signed(coefficient, variable.map(str::to_string))
        })
        .collect::<Vec<_>>();

    if combined.is_empty() {
        vec![Term::constant(Fraction::zero())]
    } else {
        combined
    }
}

/// Collects the like terms on each side of the equation.
///
/// Both sides are handled separately; no term crosses the relation.
pub fn combine_like_terms(equation: &Equation) -> Equation {
    let result = Equation::new_unchecked(
        combine_side(equation.left()),
        combine_side(equation.right()),
        equation.relation(),
    );
    debug!("combined `{}` into `{}`", equation, result);
    result
}

/// Brings the equation to standard form: every variable term on the left side, every constant on
/// the right side, and like terms combined. `y + 2 = 1/2x - 4` becomes `y - 1/2x = -6`.
pub fn to_standard_form(equation: &Equation) -> Equation {
    let mut left = Vec::new();
    let mut right = Vec::new();
    for term in equation.left() {
        if term.is_constant() {
            right.push(term.negated());
        } else {
            left.push(term.clone());
        }
    }
    for term in equation.right() {
        if term.is_constant() {
            right.push(term.clone());
        } else {
            left.push(term.negated());
        }
    }

    let result = Equation::new_unchecked(combine_side(&left), combine_side(&right), equation.relation());
    debug!("standard form of `{}` is `{}`", equation, result);
    result
}

#[cfg(test)]
mod tests {
    use linsys_parser::parser::token::op::RelationKind;
    use pretty_assertions::assert_eq;
    use super::*;

    fn eq(source: &str) -> Equation {
        source.parse().unwrap()
    }

    #[test]
    fn combine_constants() {
        assert_eq!(combine_like_terms(&eq("y = 0 + 2 + 1/2x")).to_string(), "y = 2 + 1/2x");
        assert_eq!(combine_like_terms(&eq("x - 3 = 1 + 2")).to_string(), "x - 3 = 3");
    }

    #[test]
    fn side_cancels_to_zero() {
        assert_eq!(combine_like_terms(&eq("x = 2 - 2")).to_string(), "x = 0");
    }

    #[test]
    fn symbolic_terms_stay_apart() {
        let equation = Equation::new_unchecked(
            vec![
                Term::new(None, Coefficient::symbol("a"), Some("x".to_string())),
                Term::numeric(Fraction::from(2), Some("x")),
                Term::new(None, Coefficient::symbol("a").scaled(&Fraction::from(3)), Some("x".to_string())),
            ],
            vec![Term::constant(Fraction::one())],
            RelationKind::Equal,
        );
        assert_eq!(combine_like_terms(&equation).to_string(), "4a*x + 2x = 1");
    }

    #[test]
    fn standard_form() {
        assert_eq!(to_standard_form(&eq("y + 2 = 1/2x - 4")).to_string(), "y - 1/2x = -6");
        assert_eq!(to_standard_form(&eq("x = 1 + y")).to_string(), "x - y = 1");
        assert_eq!(to_standard_form(&eq("2x + 3y = 12")), eq("2x + 3y = 12"));
        assert_eq!(to_standard_form(&eq("3 > y")).to_string(), "-y > -3");
    }

    #[test]
    fn standard_form_of_identity() {
        assert_eq!(to_standard_form(&eq("x + 1 = x + 1")).to_string(), "0 = 0");
    }
}
