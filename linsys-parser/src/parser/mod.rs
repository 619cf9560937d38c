pub mod ast;
pub mod error;
pub mod token;

use error::{Error, kind};
use linsys_error::ErrorKind;
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// A high-level parser for factor expressions and equations. This is the type to use to parse an
/// arbitrary piece of user input into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Set the cursor of this parser to the cursor of another parser. The other parser should be
    /// a clone of this one, used to look ahead.
    pub fn set_cursor(&mut self, other: &Self) {
        self.cursor = other.cursor;
    }

    /// Returns the next non-whitespace token without moving the cursor. Returns [`None`] if there
    /// are no more tokens.
    pub fn peek_token(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Returns the kind of the next non-whitespace token without moving the cursor.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek_token().map(|token| token.kind)
    }

    /// Returns the span of the next non-whitespace token, or the end of the source code if there
    /// are no more tokens.
    pub fn peek_span(&self) -> Range<usize> {
        self.peek_token().map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_whitespace() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses multiple values (at least one) from the given stream of tokens, each
    /// delimited by a certain token. A trailing delimiter is allowed.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// values are returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_delimited<T: Parse>(&mut self, delimiter: TokenKind) -> Result<Vec<T>, Error> {
        let start = self.cursor;
        let mut values = Vec::new();

        loop {
            match self.try_parse::<T>() {
                Ok(value) => values.push(value),
                Err(err) => {
                    self.cursor = start;
                    return Err(err);
                },
            }

            if self.peek_kind() != Some(delimiter) {
                return Ok(values);
            }
            self.next_token()?;

            // trailing delimiter
            if self.peek_kind().is_none() {
                return Ok(values);
            }
        }
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser (trailing whitespace is fine); if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        match self.peek_token() {
            None => Ok(value),
            Some(token) => Err(Error::new(vec![token.span.clone()], kind::ExpectedEof)),
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Precedence of unary negation (`-`) and unary plus (`+`).
    Neg,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let left = *self as u8;
        let right = *other as u8;
        left.partial_cmp(&right)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{
        binary::Binary,
        equation::{CoefficientExpr, EquationExpr, SystemExpr, TermExpr},
        expr::Expr,
        literal::{Literal, LitDecimal, LitInt, LitSym},
        paren::Paren,
        unary::Unary,
    };
    use token::op::{BinOp, BinOpKind, RelationKind, UnaryOp, UnaryOpKind};

    fn int(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Int(LitInt { value: value.to_string(), span }))
    }

    #[test]
    fn literal_int() {
        let mut parser = Parser::new("16");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, int("16", 0..2));
    }

    #[test]
    fn literal_decimal() {
        let mut parser = Parser::new("2.25");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Literal(Literal::Decimal(LitDecimal {
            value: "2.25".to_string(),
            span: 0..4,
        })));
    }

    #[test]
    fn fraction() {
        let mut parser = Parser::new("3/2");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(int("3", 0..1)),
            op: BinOp { kind: BinOpKind::Div, span: 1..2 },
            rhs: Box::new(int("2", 2..3)),
            span: 0..3,
        }));
    }

    #[test]
    fn negative_fraction() {
        let mut parser = Parser::new("-3/4");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        // negation binds tighter than division
        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Unary(Unary {
                operand: Box::new(int("3", 1..2)),
                op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
                span: 0..2,
            })),
            op: BinOp { kind: BinOpKind::Div, span: 2..3 },
            rhs: Box::new(int("4", 3..4)),
            span: 0..4,
        }));
    }

    #[test]
    fn precedence() {
        let mut parser = Parser::new("1 + 2 * 3");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(int("1", 0..1)),
            op: BinOp { kind: BinOpKind::Add, span: 2..3 },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(int("2", 4..5)),
                op: BinOp { kind: BinOpKind::Mul, span: 6..7 },
                rhs: Box::new(int("3", 8..9)),
                span: 4..9,
            })),
            span: 0..9,
        }));
    }

    #[test]
    fn left_associative() {
        let mut parser = Parser::new("8 / 4 / 2");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(int("8", 0..1)),
                op: BinOp { kind: BinOpKind::Div, span: 2..3 },
                rhs: Box::new(int("4", 4..5)),
                span: 0..5,
            })),
            op: BinOp { kind: BinOpKind::Div, span: 6..7 },
            rhs: Box::new(int("2", 8..9)),
            span: 0..9,
        }));
    }

    #[test]
    fn parenthesized() {
        let mut parser = Parser::new("(1 + 1)/3");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Paren(Paren {
                expr: Box::new(Expr::Binary(Binary {
                    lhs: Box::new(int("1", 1..2)),
                    op: BinOp { kind: BinOpKind::Add, span: 3..4 },
                    rhs: Box::new(int("1", 5..6)),
                    span: 1..6,
                })),
                span: 0..7,
            })),
            op: BinOp { kind: BinOpKind::Div, span: 7..8 },
            rhs: Box::new(int("3", 8..9)),
            span: 0..9,
        }));
    }

    #[test]
    fn unclosed_parenthesis() {
        let mut parser = Parser::new("(1 + 2");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert!(err.is::<kind::UnclosedParenthesis>());
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn stray_closing_parenthesis() {
        let mut parser = Parser::new(")");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert_eq!(
            err.downcast_ref::<kind::UnclosedParenthesis>(),
            Some(&kind::UnclosedParenthesis { opening: false }),
        );
    }

    #[test]
    fn empty_parenthesis() {
        let mut parser = Parser::new("2 * ()");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert!(err.is::<kind::EmptyParenthesis>());
    }

    #[test]
    fn trailing_garbage() {
        let mut parser = Parser::new("3/2 abc");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert!(err.is::<kind::ExpectedEof>());
        assert_eq!(err.spans, vec![4..7]);
    }

    #[test]
    fn empty_input() {
        let mut parser = Parser::new("   ");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert!(err.is::<kind::UnexpectedEof>());
    }

    #[test]
    fn dangling_operator() {
        let mut parser = Parser::new("3 /");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert!(err.is::<kind::UnexpectedEof>());
    }

    #[test]
    fn simple_equation() {
        let mut parser = Parser::new("2x + 3y = 12");
        let eq = parser.try_parse_full::<EquationExpr>().unwrap();

        assert_eq!(eq.relation.kind, RelationKind::Equal);
        assert_eq!(eq.left.terms, vec![
            TermExpr {
                sign: None,
                coefficient: Some(CoefficientExpr {
                    numerator: Literal::Int(LitInt { value: "2".to_string(), span: 0..1 }),
                    denominator: None,
                    span: 0..1,
                }),
                variable: Some(LitSym { name: "x".to_string(), span: 1..2 }),
                span: 0..2,
            },
            TermExpr {
                sign: Some(UnaryOp { kind: UnaryOpKind::Pos, span: 3..4 }),
                coefficient: Some(CoefficientExpr {
                    numerator: Literal::Int(LitInt { value: "3".to_string(), span: 5..6 }),
                    denominator: None,
                    span: 5..6,
                }),
                variable: Some(LitSym { name: "y".to_string(), span: 6..7 }),
                span: 3..7,
            },
        ]);
        assert_eq!(eq.right.terms, vec![
            TermExpr {
                sign: None,
                coefficient: Some(CoefficientExpr {
                    numerator: Literal::Int(LitInt { value: "12".to_string(), span: 10..12 }),
                    denominator: None,
                    span: 10..12,
                }),
                variable: None,
                span: 10..12,
            },
        ]);
        assert_eq!(eq.span, 0..12);
    }

    #[test]
    fn equation_with_fractions_and_signs() {
        let mut parser = Parser::new("-x - 3/2 * y < 0.5");
        let eq = parser.try_parse_full::<EquationExpr>().unwrap();

        assert_eq!(eq.relation.kind, RelationKind::Less);
        assert_eq!(eq.left.terms.len(), 2);

        let first = &eq.left.terms[0];
        assert_eq!(first.sign.as_ref().map(|s| s.kind), Some(UnaryOpKind::Neg));
        assert!(first.coefficient.is_none());
        assert_eq!(first.variable.as_ref().map(|v| v.name.as_str()), Some("x"));

        let second = &eq.left.terms[1];
        assert_eq!(second.sign.as_ref().map(|s| s.kind), Some(UnaryOpKind::Neg));
        let coefficient = second.coefficient.as_ref().unwrap();
        assert_eq!(coefficient.numerator, Literal::Int(LitInt { value: "3".to_string(), span: 5..6 }));
        assert_eq!(coefficient.denominator, Some(Literal::Int(LitInt { value: "2".to_string(), span: 7..8 })));
        assert_eq!(second.variable.as_ref().map(|v| v.name.as_str()), Some("y"));

        assert_eq!(eq.right.terms[0].coefficient.as_ref().unwrap().numerator, Literal::Decimal(LitDecimal {
            value: "0.5".to_string(),
            span: 15..18,
        }));
    }

    #[test]
    fn missing_relation() {
        let mut parser = Parser::new("2x + 3y 12");
        let err = parser.try_parse_full::<EquationExpr>().unwrap_err();

        assert!(err.is::<kind::MissingRelation>());
        assert_eq!(err.spans, vec![8..10]);
    }

    #[test]
    fn missing_variable_after_mul() {
        let mut parser = Parser::new("2 * = 4");
        let err = parser.try_parse_full::<EquationExpr>().unwrap_err();

        assert!(err.is::<kind::MissingVariable>());
    }

    #[test]
    fn empty_side() {
        let mut parser = Parser::new("= 4");
        let err = parser.try_parse_full::<EquationExpr>().unwrap_err();

        assert!(err.is::<kind::ExpectedTerm>());
    }

    #[test]
    fn system() {
        let mut parser = Parser::new("2x + 3y = 12; x - y = 1;");
        let system = parser.try_parse_full::<SystemExpr>().unwrap();

        assert_eq!(system.equations.len(), 2);
        assert_eq!(system.equations[1].to_string(), "x - y = 1");
    }

    #[test]
    fn display_round_trip() {
        let source = "-1/2x + 3 * y > -4";
        let mut parser = Parser::new(source);
        let eq = parser.try_parse_full::<EquationExpr>().unwrap();
        assert_eq!(eq.to_string(), "-1/2x + 3y > -4");

        let mut parser = Parser::new("(1 + 2)/ -3");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr.to_string(), "(1 + 2) / -3");
    }
}
