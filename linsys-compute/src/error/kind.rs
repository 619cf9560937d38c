//! Errors that can occur while transforming equations and rows.
//!
//! Algebra functions return these errors without spans; the caller that knows where the operands
//! came from (such as the REPL) attaches them with [`linsys_error::Error::or_spans`].

use ariadne::Fmt;
use linsys_attrs::ErrorKind;
use linsys_error::{ErrorKind, EXPR};

/// Attempted to divide by zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "cannot divide by zero",
    labels = ["this factor is zero"],
    help = "division by zero is undefined; choose a different factor",
)]
pub struct DivisionByZero;

/// Attempted to multiply a row or an equation by zero, which would erase it from the system.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "cannot multiply by zero",
    labels = ["this factor is zero"],
    help = "multiplying by zero turns the equation into `0 = 0`, losing all of its information",
)]
pub struct ZeroFactor;

/// The result of an operation has a coefficient that is too large to be displayed legibly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the result of this operation is out of range",
    labels = ["this operation"],
    help = format!(
        "the result contains {}, but numerators can be at most {} and denominators at most {}",
        value.fg(EXPR),
        max_numerator,
        max_denominator,
    ),
    note = "try a different operation that keeps the numbers small",
)]
pub struct OperationOutOfRange {
    /// The offending value, formatted as a fraction.
    pub value: String,

    /// The largest allowed numerator.
    pub max_numerator: u32,

    /// The largest allowed denominator.
    pub max_denominator: u32,
}

/// A number literal could not be read as an exact number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a valid number", literal),
    labels = ["this literal"],
)]
pub struct InvalidDecimal {
    /// The literal that was written.
    pub literal: String,
}

/// The variable to isolate does not appear in the equation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the variable `{}` does not appear in this equation", variable),
    labels = ["this equation"],
    help = "only variables that appear on one of the sides can be isolated",
)]
pub struct VariableNotPresent {
    /// The name of the variable.
    pub variable: String,
}

/// A term has a symbolic coefficient where a number is required, such as when dividing by it.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the coefficient `{}` is not a number", name),
    labels = ["this coefficient"],
    help = "only numeric coefficients can be used to divide or to build a row",
)]
pub struct NonNumericCoefficient {
    /// The name of the symbolic coefficient.
    pub name: String,
}

/// An equation was expected to have a single variable with coefficient 1 on its left side.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "this equation does not isolate a variable",
    labels = ["this equation"],
    help = format!("isolate a variable first, so the equation looks like {}", "x = 1 + y".fg(EXPR)),
)]
pub struct NotIsolated;

/// Two equations isolate different variables, so they cannot be equated.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "these equations isolate different variables",
    labels = [
        format!("this equation isolates `{}`", first),
        format!("this equation isolates `{}`", second),
    ],
    help = "both equations must isolate the same variable",
)]
pub struct DifferentIsolatedVariables {
    /// The variable isolated by the first equation.
    pub first: String,

    /// The variable isolated by the second equation.
    pub second: String,
}

/// A side of an equation has no terms.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "a side of an equation cannot be empty",
    labels = ["this side"],
)]
pub struct EmptySide;

/// A variable appears more than once on the same side of an equation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the variable `{}` appears more than once on the same side", variable),
    labels = ["this term"],
    help = "combine like terms before entering the equation",
)]
pub struct DuplicateVariable {
    /// The name of the variable.
    pub variable: String,
}

/// An equation names a variable that is not one of the variables of the system.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown variable `{}`", variable),
    labels = ["this variable"],
)]
pub struct UnknownVariable {
    /// The name of the variable.
    pub variable: String,
}

/// The operation is only defined for equations, but an inequality was given.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("this operation is not supported for the `{}` relation", relation),
    labels = ["this inequality"],
)]
pub struct UnsupportedRelation {
    /// The relation of the equation.
    pub relation: String,
}

/// The session cannot perform the action in its current state.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot {} right now", action),
    help = format!("the exercise is currently {}", state),
)]
pub struct InvalidTransition {
    /// The action that was attempted.
    pub action: &'static str,

    /// A description of the current state.
    pub state: &'static str,
}

/// A row index does not refer to a visible row.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("there is no row {}", index + 1),
    labels = ["this row"],
    help = format!("there are {} rows", len),
)]
pub struct RowOutOfBounds {
    /// The zero-based index of the row.
    pub index: usize,

    /// The number of visible rows.
    pub len: usize,
}

/// An equation index does not refer to an equation of the system or notebook.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("there is no equation {}", index + 1),
    labels = ["this equation"],
    help = format!("there are {} equations", len),
)]
pub struct EquationOutOfBounds {
    /// The zero-based index of the equation.
    pub index: usize,

    /// The number of equations.
    pub len: usize,
}

/// The same row was selected twice for an operation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("row {} is already selected", index + 1),
    labels = ["this row"],
)]
pub struct RowAlreadySelected {
    /// The zero-based index of the row.
    pub index: usize,
}

/// A multiplication or division was confirmed without a factor.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing factor",
    help = format!("enter a number such as {} or {}", "2".fg(EXPR), "-3/2".fg(EXPR)),
)]
pub struct MissingFactor;

/// There is no step left to undo.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "nothing to undo")]
pub struct NothingToUndo;

/// There is no undone step to redo.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "nothing to redo")]
pub struct NothingToRedo;
