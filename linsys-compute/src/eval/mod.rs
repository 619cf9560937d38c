//! Exact evaluation of factor expressions and written coefficients.

mod expr;
mod literal;

use crate::{error::Error, fraction::Fraction};
use linsys_parser::parser::{ast::expr::Expr, Parser};
use std::str::FromStr;

/// Any syntax tree that evaluates to an exact [`Fraction`].
pub trait Eval {
    /// Evaluates the tree. Errors point at the part of the source that caused them.
    fn eval(&self) -> Result<Fraction, Error>;
}

/// Parses and evaluates a factor expression typed by the user, such as `-3/2` or `(1 + 1/2) * 2`.
pub fn eval_factor(source: &str) -> Result<Fraction, Error> {
    let mut parser = Parser::new(source);
    let expr = parser.try_parse_full::<Expr>()?;
    expr.eval()
}

impl FromStr for Fraction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        eval_factor(s)
    }
}

/// Eval tests depend on the parser, so ensure that parser tests pass before running these.
#[cfg(test)]
mod tests {
    use crate::error::kind::DivisionByZero;
    use linsys_parser::parser::error::kind::{UnclosedParenthesis, UnexpectedEof};
    use pretty_assertions::assert_eq;
    use super::*;

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    #[test]
    fn integer() {
        assert_eq!(eval_factor("16").unwrap(), frac(16, 1));
    }

    #[test]
    fn fraction() {
        assert_eq!(eval_factor("3/2").unwrap(), frac(3, 2));
        assert_eq!(eval_factor("-3/4").unwrap(), frac(-3, 4));
        assert_eq!(eval_factor("6/-4").unwrap(), frac(-3, 2));
    }

    #[test]
    fn decimal() {
        assert_eq!(eval_factor("2.5").unwrap(), frac(5, 2));
        assert_eq!(eval_factor(".125").unwrap(), frac(1, 8));
        assert_eq!(eval_factor("0.1 + 0.2").unwrap(), frac(3, 10));
    }

    #[test]
    fn nested() {
        assert_eq!(eval_factor("((1 + 9) / 5) * 3").unwrap(), frac(6, 1));
        assert_eq!(eval_factor("-(1 - 1/3)").unwrap(), frac(-2, 3));
        assert_eq!(eval_factor("8 / 4 / 2").unwrap(), frac(1, 1));
    }

    #[test]
    fn divide_by_zero() {
        let err = eval_factor("1 / (2 - 2)").unwrap_err();
        assert!(err.is::<DivisionByZero>());
        assert_eq!(err.spans, vec![4..11]);
    }

    #[test]
    fn malformed() {
        assert!(eval_factor("(1 + 2").unwrap_err().is::<UnclosedParenthesis>());
        assert!(eval_factor("3 *").unwrap_err().is::<UnexpectedEof>());
        assert!("".parse::<Fraction>().is_err());
    }
}
