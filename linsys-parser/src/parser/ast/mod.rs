//! Syntax trees for the two kinds of user input: factor expressions (such as `-3/2`, typed when
//! multiplying or dividing a row) and equations (such as `2x + 3y = 12`).

pub mod binary;
pub mod equation;
pub mod expr;
pub mod literal;
pub mod paren;
pub mod unary;

pub use binary::Binary;
pub use equation::{CoefficientExpr, EquationExpr, SideExpr, SystemExpr, TermExpr};
pub use expr::{Expr, Primary};
pub use literal::{Literal, LitDecimal, LitInt, LitSym};
pub use paren::Paren;
pub use unary::Unary;
