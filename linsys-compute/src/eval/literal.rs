use crate::{
    error::{kind::InvalidDecimal, Error},
    eval::Eval,
    fraction::Fraction,
    primitive::{int_from_str, rational_from_decimal},
};
use linsys_parser::parser::ast::{
    equation::CoefficientExpr,
    literal::{LitDecimal, LitInt, Literal},
};

impl Eval for LitInt {
    fn eval(&self) -> Result<Fraction, Error> {
        int_from_str(&self.value)
            .map(Fraction::from)
            .ok_or_else(|| Error::new(vec![self.span.clone()], InvalidDecimal { literal: self.value.clone() }))
    }
}

impl Eval for LitDecimal {
    fn eval(&self) -> Result<Fraction, Error> {
        let (integer, fractional) = self.parts();
        rational_from_decimal(integer, fractional)
            .map(Fraction::from)
            .ok_or_else(|| Error::new(vec![self.span.clone()], InvalidDecimal { literal: self.value.clone() }))
    }
}

impl Eval for Literal {
    fn eval(&self) -> Result<Fraction, Error> {
        match self {
            Literal::Int(int) => int.eval(),
            Literal::Decimal(decimal) => decimal.eval(),
        }
    }
}

impl Eval for CoefficientExpr {
    fn eval(&self) -> Result<Fraction, Error> {
        let numerator = self.numerator.eval()?;
        match &self.denominator {
            Some(denominator) => numerator
                .checked_div(&denominator.eval()?)
                .map_err(|err| err.or_spans(|| vec![denominator.span()])),
            None => Ok(numerator),
        }
    }
}
