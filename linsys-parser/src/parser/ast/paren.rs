use crate::{
    parser::{
        ast::expr::Expr,
        error::{kind, Error},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parenthesized expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this expression was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.expect(&[TokenKind::OpenParen])?;
        if input.peek_kind() == Some(TokenKind::CloseParen) {
            return Err(Error::new(vec![open_paren.span.start..input.peek_span().end], kind::EmptyParenthesis));
        }

        let expr = input.try_parse::<Expr>()?;
        match input.next_token() {
            Ok(token) if token.kind == TokenKind::CloseParen => Ok(Self {
                expr: Box::new(expr),
                span: open_paren.span.start..token.span.end,
            }),
            _ => Err(Error::new(vec![open_paren.span], kind::UnclosedParenthesis { opening: true })),
        }
    }
}

impl fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.expr)
    }
}

