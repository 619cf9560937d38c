pub mod op;

use crate::{
    parser::{error::{kind, Error}, Parser},
    tokenizer::{Token, TokenKind},
};
use std::ops::Range;

/// A token that the parser asked for by kind, with the text it was read from.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Lexeme {
    pub(crate) text: String,
    pub(crate) span: Range<usize>,
}

impl From<Token<'_>> for Lexeme {
    fn from(token: Token<'_>) -> Self {
        Self { text: token.lexeme.to_owned(), span: token.span }
    }
}

impl Parser<'_> {
    /// Consumes the next non-whitespace token if it is one of the expected kinds. Otherwise, the
    /// stream is left unchanged and [`kind::UnexpectedToken`] is returned.
    pub(crate) fn expect(&mut self, expected: &'static [TokenKind]) -> Result<Lexeme, Error> {
        self.try_parse_with_fn(|input| {
            let token = input.next_token()?;
            if expected.contains(&token.kind) {
                Ok(Lexeme::from(token))
            } else {
                Err(Error::new(vec![token.span], kind::UnexpectedToken { expected, found: token.kind }))
            }
        })
    }
}
