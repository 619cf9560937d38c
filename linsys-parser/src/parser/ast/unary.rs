use crate::{
    parser::{
        ast::{binary::Binary, expr::{Expr, Primary}},
        error::Error,
        token::op::{UnaryOp, UnaryOpKind},
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary expression, such as `-2`. Unary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parse a unary expression. Unary operators are right-associative, so the operand is parsed
    /// with the precedence of the operator: `-3/4` is `(-3)/4`, and `--3` is `-(-3)`.
    pub fn parse(input: &mut Parser) -> Result<Self, Error> {
        let op = input.try_parse::<UnaryOp>()?;
        let start_span = op.span.start;
        let operand = {
            let lhs = Unary::parse_or_lower(input)?;
            Binary::parse_expr(input, lhs, op.precedence())?
        };
        let end_span = operand.span().end;
        Ok(Self {
            operand: Box::new(operand),
            op,
            span: start_span..end_span,
        })
    }

    /// Parses a unary expression, or lower precedence expressions (a primary expression).
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        match input.peek_kind() {
            Some(TokenKind::Add | TokenKind::Sub) => Self::parse(input).map(Expr::Unary),
            _ => input.try_parse::<Primary>().map(Expr::from),
        }
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.op.kind {
            UnaryOpKind::Pos => write!(f, "+{}", self.operand),
            UnaryOpKind::Neg => write!(f, "-{}", self.operand),
        }
    }
}

