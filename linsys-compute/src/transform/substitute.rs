use crate::{
    error::{
        kind::{DifferentIsolatedVariables, NotIsolated, UnsupportedRelation, VariableNotPresent},
        Error,
    },
    model::{Equation, Term},
    transform::simplify::combine_side,
};
use linsys_parser::parser::token::op::RelationKind;
use log::debug;

/// Returns the variable and expression of an isolated equation `v = expression`.
fn isolation_of(equation: &Equation) -> Result<(&str, &[Term]), Error> {
    equation.isolation().ok_or_else(|| Error::spanless(NotIsolated))
}

/// Replaces every term `c·v` of a side with `expression` scaled by `c`.
fn substitute_side(terms: &[Term], variable: &str, expression: &[Term]) -> Result<Vec<Term>, Error> {
    let mut result = Vec::with_capacity(terms.len() + expression.len());
    for term in terms {
        if !term.names(variable) {
            result.push(term.clone());
            continue;
        }
        let factor = term.signed_coefficient();
        for addend in expression {
            let coefficient = factor.product(&addend.signed_coefficient())?;
            result.push(Term::signed(coefficient, addend.variable.clone()));
        }
    }
    Ok(result)
}

/// Substitutes an isolated variable into another equation.
///
/// `isolated` must have the shape `v = expression`. Each term `c·v` of `target` is replaced by
/// `expression` scaled by `c`, and like terms are then combined on each side, so that the result
/// still names each variable at most once per side.
///
/// # Errors
///
/// - [`NotIsolated`] if `isolated` does not isolate a variable.
/// - [`UnsupportedRelation`] if `isolated` is an inequality.
/// - [`VariableNotPresent`] if the isolated variable does not appear in `target`.
/// - [`NonNumericCoefficient`](crate::error::kind::NonNumericCoefficient) if two symbolic
///   coefficients would have to be multiplied.
/// - [`DuplicateVariable`](crate::error::kind::DuplicateVariable) if a variable ends up with a
///   numeric and a symbolic coefficient on the same side.
pub fn substitute(target: &Equation, isolated: &Equation) -> Result<Equation, Error> {
    let (variable, expression) = isolation_of(isolated)?;
    if isolated.relation() != RelationKind::Equal {
        return Err(Error::spanless(UnsupportedRelation { relation: isolated.relation().to_string() }));
    }
    if !target.contains(variable) {
        return Err(Error::spanless(VariableNotPresent { variable: variable.to_string() }));
    }

    let left = substitute_side(target.left(), variable, expression)?;
    let right = substitute_side(target.right(), variable, expression)?;
    let result = Equation::new(combine_side(&left), combine_side(&right), target.relation())?;
    debug!("substituted `{}` into `{}`: `{}`", isolated, target, result);
    Ok(result)
}

/// Equates the expressions of two equations that isolate the same variable: `v = a` and `v = b`
/// give `a = b`.
///
/// If one of the equations is an inequality, its relation carries over to the result, so `v < a`
/// and `v = b` give `a > b`.
///
/// # Errors
///
/// - [`NotIsolated`] if either equation does not isolate a variable.
/// - [`DifferentIsolatedVariables`] if the equations isolate different variables.
/// - [`UnsupportedRelation`] if both equations are inequalities.
pub fn equalize(first: &Equation, second: &Equation) -> Result<Equation, Error> {
    let (first_variable, first_expression) = isolation_of(first)?;
    let (second_variable, second_expression) = isolation_of(second)?;
    if first_variable != second_variable {
        return Err(Error::spanless(DifferentIsolatedVariables {
            first: first_variable.to_string(),
            second: second_variable.to_string(),
        }));
    }

    let relation = match (first.relation(), second.relation()) {
        (RelationKind::Equal, relation) => relation,
        (relation, RelationKind::Equal) => relation.reversed(),
        (_, relation) => {
            return Err(Error::spanless(UnsupportedRelation { relation: relation.to_string() }));
        },
    };

    let result = Equation::new(first_expression.to_vec(), second_expression.to_vec(), relation)?;
    debug!("equated `{}` and `{}`: `{}`", first, second, result);
    Ok(result)
}
