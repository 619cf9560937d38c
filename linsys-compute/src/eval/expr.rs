use crate::{error::Error, eval::Eval, fraction::Fraction};
use linsys_parser::parser::{
    ast::{binary::Binary, expr::Expr, paren::Paren, unary::Unary},
    token::op::{BinOpKind, UnaryOpKind},
};

impl Eval for Expr {
    fn eval(&self) -> Result<Fraction, Error> {
        match self {
            Expr::Literal(literal) => literal.eval(),
            Expr::Paren(paren) => paren.eval(),
            Expr::Unary(unary) => unary.eval(),
            Expr::Binary(binary) => binary.eval(),
        }
    }
}

impl Eval for Paren {
    fn eval(&self) -> Result<Fraction, Error> {
        self.expr.eval()
    }
}

impl Eval for Unary {
    fn eval(&self) -> Result<Fraction, Error> {
        let operand = self.operand.eval()?;
        Ok(match self.op.kind {
            UnaryOpKind::Pos => operand,
            UnaryOpKind::Neg => -operand,
        })
    }
}

impl Eval for Binary {
    fn eval(&self) -> Result<Fraction, Error> {
        let left = self.lhs.eval()?;
        let right = self.rhs.eval()?;
        match self.op.kind {
            BinOpKind::Add => Ok(left + right),
            BinOpKind::Sub => Ok(left - right),
            BinOpKind::Mul => Ok(left * right),
            BinOpKind::Div => left
                .checked_div(&right)
                .map_err(|err| err.or_spans(|| vec![self.rhs.span()])),
        }
    }
}
