use crate::{
    parser::{
        error::{kind, Error},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An integer literal, represented as a [`String`] so that arbitrarily large values survive
/// parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitInt {
    /// The value of the integer literal as a string.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitInt {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let int = input.expect(&[TokenKind::Int])?;
        Ok(Self {
            value: int.text,
            span: int.span,
        })
    }
}

impl fmt::Display for LitInt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A decimal literal, such as `2.5` or `.75`, represented as a [`String`].
///
/// Decimals are never converted to floating-point numbers; the evaluator turns the digits into an
/// exact fraction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitDecimal {
    /// The value of the decimal literal as a string.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl LitDecimal {
    /// Returns the digits before and after the decimal point. The integer part is `"0"` if it
    /// was omitted.
    pub fn parts(&self) -> (&str, &str) {
        let (integer, fractional) = self.value.split_once('.').unwrap_or((self.value.as_str(), ""));
        if integer.is_empty() {
            ("0", fractional)
        } else {
            (integer, fractional)
        }
    }
}

impl Parse for LitDecimal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let decimal = input.expect(&[TokenKind::Decimal])?;
        Ok(Self {
            value: decimal.text,
            span: decimal.span,
        })
    }
}

impl fmt::Display for LitDecimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A symbol / identifier literal, used to name variables.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitSym {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.expect(&[TokenKind::Name])?;
        Ok(Self {
            name: token.text,
            span: token.span,
        })
    }
}

impl fmt::Display for LitSym {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A number literal written directly into the input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    /// An integer literal, such as `12`.
    Int(LitInt),

    /// A decimal literal, such as `0.5`.
    Decimal(LitDecimal),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Int(int) => int.span.clone(),
            Literal::Decimal(decimal) => decimal.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        match input.peek_kind() {
            Some(TokenKind::Int) => input.try_parse::<LitInt>().map(Literal::Int),
            Some(TokenKind::Decimal) => input.try_parse::<LitDecimal>().map(Literal::Decimal),
            Some(found) => Err(Error::new(vec![input.peek_span()], kind::UnexpectedToken {
                expected: &[TokenKind::Int, TokenKind::Decimal],
                found,
            })),
            None => Err(Error::new(vec![input.eof_span()], kind::UnexpectedEof)),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Int(int) => int.fmt(f),
            Literal::Decimal(decimal) => decimal.fmt(f),
        }
    }
}
