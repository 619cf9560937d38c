//! Errors that can occur while parsing user input. All of these are reported to the user as
//! evaluation errors: the input could not be understood, and nothing was changed.

use ariadne::Fmt;
use linsys_attrs::ErrorKind;
use linsys_error::{ErrorKind, EXPR};
use crate::tokenizer::TokenKind;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "input".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// A term of an equation had neither a coefficient nor a variable.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected a term",
    labels = ["I expected to see a number or a variable here"],
    help = format!("terms look like {}, {}, or {}", "3x".fg(EXPR), "-1/2y".fg(EXPR), "7".fg(EXPR)),
)]
pub struct ExpectedTerm;

/// A multiplication sign in a term was not followed by a variable.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing variable after `*`",
    labels = ["I expected to see a variable name here"],
)]
pub struct MissingVariable;

/// An equation did not contain a relation symbol.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing relation in equation",
    labels = ["I expected to see `=`, `<`, or `>` here"],
    help = format!("equations look like {}", "2x + 3y = 12".fg(EXPR)),
)]
pub struct MissingRelation;
